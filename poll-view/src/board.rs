//! State of the voting page, held between events.
//!
//! The board owns the last answer of every read and the user's choices. All
//! derived values (statuses, countdowns, the filtered list, eligibility) are
//! recomputed from those against the `now` handed in, nothing derived is
//! stored.

use crate::{
    can_offer_vote, derive_status, filter_polls, format_time_remaining, is_malformed,
    reconcile_selection, vote_eligibility, FilterState, Loadable, PollStatus, SubmissionPhase,
    TimeLabels, WriteRejection,
};
use poll_abi::{Address, Candidate, CandidateId, Poll, PollId, Timestamp};
use std::collections::BTreeSet;
use std::fmt::Display;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why the vote action was refused before reaching the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteBlocked {
    #[error("no poll is selected")]
    NothingSelected,
    #[error("no account is connected")]
    NoAccount,
    #[error("poll {0} is not loaded")]
    UnknownPoll(PollId),
    #[error("voting has not started yet")]
    NotStarted,
    #[error("voting has already ended")]
    Ended,
    #[error("this account has already voted")]
    AlreadyVoted,
    #[error("whether this account has voted is not known yet")]
    VotedStatusUnknown,
    #[error("a vote is already being submitted")]
    SubmissionPending,
    #[error("poll has no candidate {0}")]
    UnknownCandidate(CandidateId),
}

impl VoteBlocked {
    /// the contract rejection the same attempt would have ended in
    pub fn as_rejection(&self) -> Option<WriteRejection> {
        match self {
            VoteBlocked::NotStarted => Some(WriteRejection::NotStarted),
            VoteBlocked::Ended => Some(WriteRejection::AlreadyEnded),
            VoteBlocked::AlreadyVoted => Some(WriteRejection::AlreadyVoted),
            _ => None,
        }
    }
}

/// One entry of the poll list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollCard {
    pub poll: Poll,
    pub status: PollStatus,
    pub time_remaining: String,
    /// the record's window is empty or inverted
    pub malformed: bool,
    pub mine: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRow {
    pub id: CandidateId,
    pub name: String,
    pub vote_count: u64,
    pub can_vote: bool,
}

/// Everything shown next to the selected poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollDetailView {
    pub poll: Poll,
    pub status: PollStatus,
    pub time_remaining: String,
    pub candidates: Loadable<Vec<CandidateRow>>,
    pub voters: Loadable<Vec<Address>>,
    pub total_votes: Loadable<u64>,
    pub has_voted: Loadable<bool>,
    pub can_vote: bool,
    pub submission: SubmissionPhase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PollDetail {
    poll_id: PollId,
    candidates: Loadable<Vec<Candidate>>,
    voters: Loadable<BTreeSet<Address>>,
    total_votes: Loadable<u64>,
    has_voted: Loadable<bool>,
}

impl PollDetail {
    fn new(poll_id: PollId, account: Option<&Address>) -> Self {
        Self {
            poll_id,
            candidates: Loadable::Loading,
            voters: Loadable::Loading,
            total_votes: Loadable::Loading,
            has_voted: has_voted_placeholder(account),
        }
    }
}

/// The last vote sent from this board, with the account that signed it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Submission {
    poll_id: PollId,
    voter: Address,
    phase: SubmissionPhase,
}

fn has_voted_placeholder(account: Option<&Address>) -> Loadable<bool> {
    match account {
        Some(_) => Loadable::Loading,
        None => Loadable::Unavailable(VoteBlocked::NoAccount.to_string()),
    }
}

/// The voting page.
#[derive(Debug, Clone, Default)]
pub struct PollBoard {
    polls: Loadable<Vec<Poll>>,
    filter: FilterState,
    account: Option<Address>,
    selected: Option<PollId>,
    detail: Option<PollDetail>,
    /// outlives selection, filter and account changes: a sent vote cannot be
    /// taken back
    submission: Option<Submission>,
    labels: TimeLabels,
}

impl PollBoard {
    pub fn new(labels: TimeLabels) -> Self {
        Self {
            labels,
            ..Self::default()
        }
    }

    pub fn polls(&self) -> &Loadable<Vec<Poll>> {
        &self.polls
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn account(&self) -> Option<&Address> {
        self.account.as_ref()
    }

    pub fn selected(&self) -> Option<PollId> {
        self.selected
    }

    /// the poll and phase of the last vote sent, whatever is selected
    pub fn submission(&self) -> Option<(PollId, &SubmissionPhase)> {
        self.submission
            .as_ref()
            .map(|submission| (submission.poll_id, &submission.phase))
    }

    /// the phase that applies to `poll_id` for the connected account
    ///
    /// a vote in flight blocks every poll, as the wallet handles one at a
    /// time. A settled vote only concerns its own poll and signer.
    pub fn phase_for(&self, poll_id: PollId) -> SubmissionPhase {
        match &self.submission {
            Some(submission) if submission.phase.is_outstanding() => SubmissionPhase::Submitted,
            Some(submission)
                if submission.poll_id == poll_id && self.account == Some(submission.voter) =>
            {
                submission.phase.clone()
            }
            _ => SubmissionPhase::Idle,
        }
    }

    pub fn labels(&self) -> &TimeLabels {
        &self.labels
    }

    /// the polls passing the current filter, `None` until the list is loaded
    pub fn filtered_polls(&self, now: Timestamp) -> Option<Vec<Poll>> {
        self.polls
            .ready()
            .map(|polls| filter_polls(polls, &self.filter, self.account.as_ref(), now))
    }

    /// store the answer of a poll list read
    ///
    /// a failed read replaces the list with `Unavailable`, never with an
    /// empty list.
    pub fn set_polls<E: Display>(&mut self, polls: Result<Vec<Poll>, E>, now: Timestamp) {
        if let Ok(polls) = &polls {
            for poll in polls.iter().filter(|poll| is_malformed(poll)) {
                warn!(
                    poll_id = poll.id,
                    start_time = poll.start_time,
                    end_time = poll.end_time,
                    "poll has an empty voting window, shown as ended"
                );
            }
        }
        self.polls = Loadable::from_result(polls);
        self.reconcile(now);
    }

    pub fn set_filter(&mut self, filter: FilterState, now: Timestamp) {
        self.filter = filter;
        self.reconcile(now);
    }

    /// a wallet connected, disconnected or switched accounts
    ///
    /// the has-voted answer belonged to the previous account and is dropped.
    /// A vote still in flight keeps blocking new ones.
    pub fn set_account(&mut self, account: Option<Address>, now: Timestamp) {
        if self.account == account {
            return;
        }
        self.account = account;
        if let Some(detail) = &mut self.detail {
            detail.has_voted = has_voted_placeholder(self.account.as_ref());
        }
        self.reconcile(now);
    }

    /// select a poll, or clear the selection with `None`
    ///
    /// only a listed poll can be selected. Returns whether the selection is
    /// now `poll_id`; when it changed, the detail reads of the poll are due.
    pub fn select(&mut self, poll_id: Option<PollId>, now: Timestamp) -> bool {
        if poll_id == self.selected {
            return true;
        }
        let listed = match (poll_id, self.filtered_polls(now)) {
            (None, _) => true,
            (Some(id), Some(filtered)) => filtered.iter().any(|poll| poll.id == id),
            (Some(_), None) => false,
        };
        if !listed {
            debug!(?poll_id, "refusing to select a poll that is not listed");
            return false;
        }
        self.selected = poll_id;
        self.detail = poll_id.map(|id| PollDetail::new(id, self.account.as_ref()));
        true
    }

    /// the clock moved: statuses may have changed under the status filter
    pub fn tick(&mut self, now: Timestamp) {
        self.reconcile(now);
    }

    fn reconcile(&mut self, now: Timestamp) {
        let filtered = match self.filtered_polls(now) {
            Some(filtered) => filtered,
            // nothing to reconcile against until the list is known
            None => return,
        };
        let selected = reconcile_selection(self.selected, &filtered);
        if selected != self.selected {
            self.selected = selected;
            self.detail = None;
        }
    }

    fn detail_of(&mut self, poll_id: PollId) -> Option<&mut PollDetail> {
        match &mut self.detail {
            Some(detail) if detail.poll_id == poll_id => Some(detail),
            _ => {
                debug!(poll_id, "dropping detail read of a poll no longer selected");
                None
            }
        }
    }

    pub fn set_candidates<E: Display>(
        &mut self,
        poll_id: PollId,
        candidates: Result<Vec<Candidate>, E>,
    ) {
        if let Some(detail) = self.detail_of(poll_id) {
            detail.candidates = Loadable::from_result(candidates);
        }
    }

    pub fn set_voters<I, E>(&mut self, poll_id: PollId, voters: Result<I, E>)
    where
        I: IntoIterator<Item = Address>,
        E: Display,
    {
        if let Some(detail) = self.detail_of(poll_id) {
            detail.voters = Loadable::from_result(voters.map(|v| v.into_iter().collect()));
        }
    }

    pub fn set_total_votes<E: Display>(&mut self, poll_id: PollId, total_votes: Result<u64, E>) {
        if let Some(detail) = self.detail_of(poll_id) {
            detail.total_votes = Loadable::from_result(total_votes);
        }
    }

    /// store the has-voted answer for `voter`
    ///
    /// answers about another account than the connected one are ignored.
    pub fn set_has_voted<E: Display>(
        &mut self,
        poll_id: PollId,
        voter: Address,
        has_voted: Result<bool, E>,
    ) {
        if self.account != Some(voter) {
            debug!(poll_id, "dropping has-voted answer for another account");
            return;
        }
        if let Some(detail) = self.detail_of(poll_id) {
            detail.has_voted = Loadable::from_result(has_voted);
        }
    }

    /// the poll list as shown, `Loading` or `Unavailable` as long as the
    /// list read is
    pub fn visible_polls(&self, now: Timestamp) -> Loadable<Vec<PollCard>> {
        let account = self.account.as_ref();
        self.polls
            .as_ref()
            .map(|polls| filter_polls(polls, &self.filter, account, now))
            .map(|filtered| {
                filtered
                    .into_iter()
                    .map(|poll| PollCard {
                        status: derive_status(&poll, now),
                        time_remaining: format_time_remaining(&poll, now, &self.labels),
                        malformed: is_malformed(&poll),
                        mine: account == Some(&poll.creator),
                        selected: self.selected == Some(poll.id),
                        poll,
                    })
                    .collect()
            })
    }

    fn selected_poll(&self) -> Option<&Poll> {
        let id = self.selected?;
        self.polls.ready()?.iter().find(|poll| poll.id == id)
    }

    pub fn detail_view(&self, now: Timestamp) -> Option<PollDetailView> {
        let poll = self.selected_poll()?;
        let detail = self.detail.as_ref()?;
        let submission = self.phase_for(poll.id);
        let can_vote = can_offer_vote(poll, now, &detail.has_voted, &submission);
        let candidates = detail.candidates.clone().map(|candidates| {
            candidates
                .into_iter()
                .enumerate()
                .map(|(index, candidate)| CandidateRow {
                    id: index as CandidateId,
                    name: candidate.name,
                    vote_count: candidate.vote_count,
                    can_vote,
                })
                .collect()
        });
        Some(PollDetailView {
            poll: poll.clone(),
            status: derive_status(poll, now),
            time_remaining: format_time_remaining(poll, now, &self.labels),
            candidates,
            voters: detail.voters.clone().map(|voters| voters.into_iter().collect()),
            total_votes: detail.total_votes.clone(),
            has_voted: detail.has_voted.clone(),
            can_vote,
            submission,
        })
    }

    /// check a vote for `candidate_id` and mark it submitted
    ///
    /// on success the caller sends `vote(poll_id, candidate_id)`; the board
    /// refuses any further vote until the outcome is reported.
    pub fn begin_vote(
        &mut self,
        candidate_id: CandidateId,
        now: Timestamp,
    ) -> Result<(PollId, CandidateId), VoteBlocked> {
        let poll_id = self.selected.ok_or(VoteBlocked::NothingSelected)?;
        let voter = self.account.ok_or(VoteBlocked::NoAccount)?;
        match self.phase_for(poll_id) {
            SubmissionPhase::Submitted => return Err(VoteBlocked::SubmissionPending),
            SubmissionPhase::Confirmed => return Err(VoteBlocked::AlreadyVoted),
            SubmissionPhase::Idle | SubmissionPhase::Failed(_) => {}
        }
        let poll = self
            .selected_poll()
            .ok_or(VoteBlocked::UnknownPoll(poll_id))?;
        match derive_status(poll, now) {
            PollStatus::Upcoming => return Err(VoteBlocked::NotStarted),
            PollStatus::Ended => return Err(VoteBlocked::Ended),
            PollStatus::Active => {}
        }
        let detail = self
            .detail
            .as_ref()
            .ok_or(VoteBlocked::UnknownPoll(poll_id))?;
        let has_voted = match &detail.has_voted {
            Loadable::Ready(has_voted) => *has_voted,
            _ => return Err(VoteBlocked::VotedStatusUnknown),
        };
        if !vote_eligibility(poll, now, has_voted) {
            return Err(VoteBlocked::AlreadyVoted);
        }
        if let Loadable::Ready(candidates) = &detail.candidates {
            if candidate_id >= candidates.len() as CandidateId {
                return Err(VoteBlocked::UnknownCandidate(candidate_id));
            }
        }
        debug!(poll_id, candidate_id, "vote submitted");
        self.submission = Some(Submission {
            poll_id,
            voter,
            phase: SubmissionPhase::Submitted,
        });
        Ok((poll_id, candidate_id))
    }

    /// the vote in flight for `poll_id`, if that is the one being reported
    fn outstanding(&mut self, poll_id: PollId) -> Option<&mut Submission> {
        match &mut self.submission {
            Some(submission)
                if submission.poll_id == poll_id && submission.phase.is_outstanding() =>
            {
                Some(submission)
            }
            _ => {
                debug!(poll_id, "no vote in flight for this poll");
                None
            }
        }
    }

    /// the vote transaction of `poll_id` was mined
    ///
    /// settles the vote whatever is selected now.
    pub fn vote_confirmed(&mut self, poll_id: PollId) {
        let voter = match self.outstanding(poll_id) {
            Some(submission) => {
                submission.phase = SubmissionPhase::Confirmed;
                submission.voter
            }
            None => return,
        };
        info!(poll_id, "vote confirmed");
        match &mut self.detail {
            Some(detail) if detail.poll_id == poll_id && self.account == Some(voter) => {
                detail.has_voted = Loadable::Ready(true);
            }
            _ => {}
        }
    }

    /// the vote of `poll_id` was refused by the wallet or reverted
    pub fn vote_failed(&mut self, poll_id: PollId, rejection: WriteRejection) {
        if let Some(submission) = self.outstanding(poll_id) {
            warn!(poll_id, %rejection, "vote failed");
            submission.phase = SubmissionPhase::Failed(rejection);
        }
    }
}
