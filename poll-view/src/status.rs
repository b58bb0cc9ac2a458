use poll_abi::{Poll, Timestamp};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Where a poll stands at a given instant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum PollStatus {
    Upcoming,
    Active,
    Ended,
}

/// a poll whose voting window is empty or inverted
///
/// the contract refuses to create such polls, so seeing one means the record
/// was corrupted or misread on the way.
pub fn is_malformed(poll: &Poll) -> bool {
    poll.end_time <= poll.start_time
}

/// status of `poll` at `now`
///
/// the window is inclusive: a poll is still active at its very `end_time`.
/// Malformed polls are always `Ended` so that they are never votable.
pub fn derive_status(poll: &Poll, now: Timestamp) -> PollStatus {
    if is_malformed(poll) {
        PollStatus::Ended
    } else if now < poll.start_time {
        PollStatus::Upcoming
    } else if now > poll.end_time {
        PollStatus::Ended
    } else {
        PollStatus::Active
    }
}
