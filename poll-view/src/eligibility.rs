use crate::{derive_status, Loadable, PollStatus, WriteRejection};
use poll_abi::{Poll, Timestamp};

/// voting is open for `poll` at `now` and the account has not voted yet
///
/// recomputed on every call: the window may close between two renders.
pub fn vote_eligibility(poll: &Poll, now: Timestamp, has_voted: bool) -> bool {
    derive_status(poll, now) == PollStatus::Active && !has_voted
}

/// Where the last vote submission stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    /// sent to the wallet, waiting to be mined
    Submitted,
    Confirmed,
    Failed(WriteRejection),
}

impl SubmissionPhase {
    /// a vote is in flight, submitting another one would double vote
    pub fn is_outstanding(&self) -> bool {
        matches!(self, SubmissionPhase::Submitted)
    }

    /// the phase alone forbids offering the vote action
    ///
    /// a confirmed vote counts as cast until the has-voted read catches up.
    pub fn blocks_voting(&self) -> bool {
        matches!(self, SubmissionPhase::Submitted | SubmissionPhase::Confirmed)
    }

    pub fn rejection(&self) -> Option<&WriteRejection> {
        match self {
            SubmissionPhase::Failed(rejection) => Some(rejection),
            _ => None,
        }
    }
}

/// whether to show the vote action
///
/// an unknown has-voted answer is not taken as "not voted".
pub fn can_offer_vote(
    poll: &Poll,
    now: Timestamp,
    has_voted: &Loadable<bool>,
    phase: &SubmissionPhase,
) -> bool {
    match has_voted {
        Loadable::Ready(has_voted) => {
            !phase.blocks_voting() && vote_eligibility(poll, now, *has_voted)
        }
        Loadable::Loading | Loadable::Unavailable(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poll_abi::Address;
    use quickcheck_macros::quickcheck;

    fn poll() -> Poll {
        Poll {
            id: 5,
            title: "Class Rep".to_owned(),
            start_time: 1000,
            end_time: 2000,
            is_public: true,
            exists: true,
            creator: Address::zero(),
        }
    }

    #[test]
    fn only_active_polls_are_votable() {
        assert!(vote_eligibility(&poll(), 1500, false));
        assert!(!vote_eligibility(&poll(), 500, false));
        assert!(!vote_eligibility(&poll(), 2500, false));
    }

    #[test]
    fn vote_action_needs_a_known_answer() {
        let ready = Loadable::Ready(false);
        assert!(can_offer_vote(&poll(), 1500, &ready, &SubmissionPhase::Idle));
        assert!(!can_offer_vote(
            &poll(),
            1500,
            &Loadable::Loading,
            &SubmissionPhase::Idle
        ));
        assert!(!can_offer_vote(
            &poll(),
            1500,
            &Loadable::Unavailable("timeout".to_owned()),
            &SubmissionPhase::Idle
        ));
    }

    #[test]
    fn no_second_vote_while_one_is_pending() {
        let ready = Loadable::Ready(false);
        assert!(!can_offer_vote(&poll(), 1500, &ready, &SubmissionPhase::Submitted));
        assert!(!can_offer_vote(&poll(), 1500, &ready, &SubmissionPhase::Confirmed));
        let failed = SubmissionPhase::Failed(WriteRejection::UserDeclined);
        assert!(can_offer_vote(&poll(), 1500, &ready, &failed));
        assert_eq!(failed.rejection(), Some(&WriteRejection::UserDeclined));
    }

    #[quickcheck]
    fn voted_is_never_eligible(poll: Poll, now: u64) -> bool {
        !vote_eligibility(&poll, now, true)
            && !can_offer_vote(&poll, now, &Loadable::Ready(true), &SubmissionPhase::Idle)
    }
}
