use std::fmt;

/// longest raw message kept for an unrecognized failure
pub const MAX_RAW_MESSAGE_CHARS: usize = 120;

/// Why a `createPoll` or `vote` did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WriteRejection {
    /// the user dismissed the signing request
    UserDeclined,
    AlreadyVoted,
    NotWhitelisted,
    NotStarted,
    AlreadyEnded,
    InvalidTiming,
    TooFewCandidates,
    InsufficientFunds,
    /// the transaction was mined but reverted
    TransactionFailed,
    /// nothing known matched, holds the start of the raw message
    Unrecognized(String),
}

fn markers() -> [(&'static str, WriteRejection); 9] {
    [
        ("user rejected", WriteRejection::UserDeclined),
        ("user denied", WriteRejection::UserDeclined),
        ("ban da bo phieu roi", WriteRejection::AlreadyVoted),
        ("khong co quyen bo phieu", WriteRejection::NotWhitelisted),
        ("chua den gio bo phieu", WriteRejection::NotStarted),
        ("da het gio bo phieu", WriteRejection::AlreadyEnded),
        ("thoi gian khong hop le", WriteRejection::InvalidTiming),
        ("can it nhat 2 ung cu vien", WriteRejection::TooFewCandidates),
        ("insufficient funds", WriteRejection::InsufficientFunds),
    ]
}

impl WriteRejection {
    /// map a raw wallet or contract message onto a known rejection
    ///
    /// matching ignores case and looks anywhere in the message, revert
    /// reasons usually come wrapped in provider text.
    pub fn classify(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        markers()
            .into_iter()
            .find(|(needle, _)| lowered.contains(needle))
            .map(|(_, rejection)| rejection)
            .unwrap_or_else(|| WriteRejection::Unrecognized(truncate(raw)))
    }

    pub fn message(&self) -> String {
        match self {
            WriteRejection::UserDeclined => "You declined the transaction.".to_owned(),
            WriteRejection::AlreadyVoted => "You have already voted in this poll.".to_owned(),
            WriteRejection::NotWhitelisted => {
                "Your account is not on this poll's whitelist.".to_owned()
            }
            WriteRejection::NotStarted => "Voting has not started yet.".to_owned(),
            WriteRejection::AlreadyEnded => "Voting has already ended.".to_owned(),
            WriteRejection::InvalidTiming => {
                "The poll's start and end times are invalid.".to_owned()
            }
            WriteRejection::TooFewCandidates => "A poll needs at least 2 candidates.".to_owned(),
            WriteRejection::InsufficientFunds => {
                "The account cannot pay for the transaction fee.".to_owned()
            }
            WriteRejection::TransactionFailed => "The transaction failed on chain.".to_owned(),
            WriteRejection::Unrecognized(raw) => format!("Transaction failed: {}", raw),
        }
    }
}

impl fmt::Display for WriteRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// first non blank line of `raw`, cut at [`MAX_RAW_MESSAGE_CHARS`]
fn truncate(raw: &str) -> String {
    let line = raw
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");
    if line.chars().count() > MAX_RAW_MESSAGE_CHARS {
        let mut cut: String = line.chars().take(MAX_RAW_MESSAGE_CHARS).collect();
        cut.push('…');
        cut
    } else {
        line.to_owned()
    }
}
