//! # Poll view model
//!
//! Pure functions turning the poll records read from the voting contract into
//! what the client shows: the status of each poll at a given instant, how long
//! until it opens or closes, which polls pass the current search and filters,
//! and whether a vote may be offered.
//!
//! Nothing here performs I/O or keeps a clock. Every function takes the
//! current time as a parameter, so results are recomputed rather than cached
//! as time passes. Malformed or partial input never makes these functions
//! fail: malformed polls are reported as such and absent inputs are
//! [`Loadable::Loading`].
//!
//! [`PollBoard`] bundles the functions into the single state container a
//! view holds on to.

mod board;
mod countdown;
mod draft;
mod eligibility;
mod filter;
mod loadable;
mod rejection;
mod selection;
mod status;

pub use board::{CandidateRow, PollBoard, PollCard, PollDetailView, VoteBlocked};
pub use countdown::{format_duration, format_time_remaining, seconds_remaining, TimeLabels};
pub use draft::{DraftError, PollDraft, MIN_CANDIDATES};
pub use eligibility::{can_offer_vote, vote_eligibility, SubmissionPhase};
pub use filter::{filter_polls, matches_owner, matches_search, FilterState, StatusFilter};
pub use loadable::Loadable;
pub use rejection::{WriteRejection, MAX_RAW_MESSAGE_CHARS};
pub use selection::reconcile_selection;
pub use status::{derive_status, is_malformed, PollStatus};

pub use poll_abi::{Address, Candidate, CandidateId, Poll, PollId, Timestamp};
