use poll_abi::{parse_address, Address, AddressError, CreatePoll, Timestamp};
use thiserror::Error;

/// fewest candidates the contract accepts for a poll
pub const MIN_CANDIDATES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("the poll needs a title")]
    EmptyTitle,
    #[error("at least {} candidates are needed, found {found}", MIN_CANDIDATES)]
    TooFewCandidates { found: usize },
    #[error("both the start and the end time must be set")]
    MissingTime,
    #[error("end time {end} is not after start time {start}")]
    EndNotAfterStart { start: Timestamp, end: Timestamp },
    #[error("start time {start} is in the past")]
    StartInPast { start: Timestamp },
    #[error("a private poll needs at least one whitelisted address")]
    EmptyWhitelist,
    #[error("invalid whitelist entry")]
    InvalidWhitelistAddress(#[source] AddressError),
}

/// The poll creation form as the user fills it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollDraft {
    pub title: String,
    pub candidates: Vec<String>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub is_public: bool,
    /// one address per line
    pub whitelist: String,
}

impl Default for PollDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            candidates: vec![String::new(); MIN_CANDIDATES],
            start_time: None,
            end_time: None,
            is_public: true,
            whitelist: String::new(),
        }
    }
}

impl PollDraft {
    pub fn add_candidate(&mut self) {
        self.candidates.push(String::new());
    }

    /// remove the candidate field at `index`
    ///
    /// the form never shows fewer than [`MIN_CANDIDATES`] fields, returns
    /// whether a field was removed.
    pub fn remove_candidate(&mut self, index: usize) -> bool {
        if self.candidates.len() > MIN_CANDIDATES && index < self.candidates.len() {
            self.candidates.remove(index);
            true
        } else {
            false
        }
    }

    pub fn set_candidate(&mut self, index: usize, name: impl Into<String>) {
        if let Some(candidate) = self.candidates.get_mut(index) {
            *candidate = name.into();
        }
    }

    /// addresses of the whitelist text, blank lines skipped
    pub fn whitelist_addresses(&self) -> Result<Vec<Address>, DraftError> {
        self.whitelist
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| parse_address(line).map_err(DraftError::InvalidWhitelistAddress))
            .collect()
    }

    /// check the form at `now` and build the `createPoll` arguments
    ///
    /// blank candidate fields are dropped, the others are sent as typed. A
    /// public poll always sends an empty whitelist, whatever the text holds.
    pub fn validate(&self, now: Timestamp) -> Result<CreatePoll, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }

        let candidate_names: Vec<String> = self
            .candidates
            .iter()
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .collect();
        if candidate_names.len() < MIN_CANDIDATES {
            return Err(DraftError::TooFewCandidates {
                found: candidate_names.len(),
            });
        }

        let (start, end) = match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(DraftError::MissingTime),
        };
        if start >= end {
            return Err(DraftError::EndNotAfterStart { start, end });
        }
        if start < now {
            return Err(DraftError::StartInPast { start });
        }

        let whitelist = if self.is_public {
            Vec::new()
        } else {
            let addresses = self.whitelist_addresses()?;
            if addresses.is_empty() {
                return Err(DraftError::EmptyWhitelist);
            }
            addresses
        };

        Ok(CreatePoll {
            title: title.to_owned(),
            candidate_names,
            start_time: start,
            end_time: end,
            is_public: self.is_public,
            whitelist,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: Timestamp = 1_700_000_000;

    fn draft() -> PollDraft {
        PollDraft {
            title: "  Class Rep ".to_owned(),
            candidates: vec!["An".to_owned(), " ".to_owned(), " Bình ".to_owned()],
            start_time: Some(NOW + 60),
            end_time: Some(NOW + 3600),
            ..PollDraft::default()
        }
    }

    #[test]
    fn public_draft_becomes_create_poll() {
        let create = draft().validate(NOW).unwrap();
        assert_eq!(create.title, "Class Rep");
        assert_eq!(create.candidate_names, vec!["An", " Bình "]);
        assert_eq!((create.start_time, create.end_time), (NOW + 60, NOW + 3600));
        assert!(create.is_public);
        assert!(create.whitelist.is_empty());
    }

    #[test]
    fn public_draft_ignores_whitelist_text() {
        let mut draft = draft();
        draft.whitelist = "not an address".to_owned();
        assert!(draft.validate(NOW).unwrap().whitelist.is_empty());
    }

    #[test]
    fn private_draft_parses_whitelist() {
        let mut draft = draft();
        draft.is_public = false;
        draft.whitelist = format!(
            "\n  0x{}\n\n0x{}  \n",
            "ab".repeat(20),
            "CD".repeat(20)
        );
        let create = draft.validate(NOW).unwrap();
        assert_eq!(
            create.whitelist,
            vec![Address::repeat_byte(0xab), Address::repeat_byte(0xcd)]
        );
    }

    #[test]
    fn private_draft_needs_a_whitelist() {
        let mut draft = draft();
        draft.is_public = false;
        draft.whitelist = " \n\n".to_owned();
        assert_eq!(draft.validate(NOW), Err(DraftError::EmptyWhitelist));

        draft.whitelist = "0x1234".to_owned();
        assert!(matches!(
            draft.validate(NOW),
            Err(DraftError::InvalidWhitelistAddress(_))
        ));
    }

    #[test]
    fn each_failure_is_reported() {
        let mut untitled = draft();
        untitled.title = "   ".to_owned();
        assert_eq!(untitled.validate(NOW), Err(DraftError::EmptyTitle));

        let mut lonely = draft();
        lonely.candidates = vec!["An".to_owned(), "".to_owned()];
        assert_eq!(
            lonely.validate(NOW),
            Err(DraftError::TooFewCandidates { found: 1 })
        );

        let mut undated = draft();
        undated.end_time = None;
        assert_eq!(undated.validate(NOW), Err(DraftError::MissingTime));

        let mut inverted = draft();
        inverted.end_time = inverted.start_time;
        assert_eq!(
            inverted.validate(NOW),
            Err(DraftError::EndNotAfterStart {
                start: NOW + 60,
                end: NOW + 60
            })
        );

        let mut late = draft();
        late.start_time = Some(NOW - 1);
        assert_eq!(
            late.validate(NOW),
            Err(DraftError::StartInPast { start: NOW - 1 })
        );
    }

    #[test]
    fn candidate_fields_never_drop_below_minimum() {
        let mut draft = PollDraft::default();
        assert!(!draft.remove_candidate(0));
        draft.add_candidate();
        draft.set_candidate(2, "Chi");
        assert!(draft.remove_candidate(0));
        assert_eq!(draft.candidates, vec!["".to_owned(), "Chi".to_owned()]);
        assert!(!draft.remove_candidate(1));
    }
}
