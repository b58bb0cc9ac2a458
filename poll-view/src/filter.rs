use crate::{derive_status, PollStatus};
use poll_abi::{Address, Poll, Timestamp};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Which statuses the poll list shows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[cfg_attr(
    any(test, feature = "property-test-api"),
    derive(test_strategy::Arbitrary)
)]
#[strum(serialize_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Upcoming,
    Ended,
}

impl StatusFilter {
    pub fn accepts(self, status: PollStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == PollStatus::Active,
            StatusFilter::Upcoming => status == PollStatus::Upcoming,
            StatusFilter::Ended => status == PollStatus::Ended,
        }
    }
}

impl From<PollStatus> for StatusFilter {
    fn from(status: PollStatus) -> Self {
        match status {
            PollStatus::Upcoming => StatusFilter::Upcoming,
            PollStatus::Active => StatusFilter::Active,
            PollStatus::Ended => StatusFilter::Ended,
        }
    }
}

/// What the user narrowed the poll list down to. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "property-test-api"),
    derive(test_strategy::Arbitrary)
)]
pub struct FilterState {
    pub search_query: String,
    pub status_filter: StatusFilter,
    /// only polls created by the connected account
    pub mine_only: bool,
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        self.search_query.trim().is_empty()
            && self.status_filter == StatusFilter::All
            && !self.mine_only
    }
}

/// case-insensitive substring search over the title and the decimal id
///
/// surrounding whitespace in the query is ignored and a blank query matches
/// every poll.
pub fn matches_search(poll: &Poll, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    poll.title.to_lowercase().contains(&query) || poll.id.to_string().contains(&query)
}

/// ownership predicate of the "mine only" filter
///
/// without a known account nothing is "mine": the filter fails closed rather
/// than falling back to every poll.
pub fn matches_owner(poll: &Poll, mine_only: bool, account: Option<&Address>) -> bool {
    if !mine_only {
        return true;
    }
    match account {
        Some(account) => poll.creator == *account,
        None => false,
    }
}

/// the polls to list, in their original order
///
/// tombstoned polls never make it through, whatever the filter.
pub fn filter_polls(
    polls: &[Poll],
    filter: &FilterState,
    account: Option<&Address>,
    now: Timestamp,
) -> Vec<Poll> {
    polls
        .iter()
        .filter(|poll| poll.exists)
        .filter(|poll| matches_search(poll, &filter.search_query))
        .filter(|poll| filter.status_filter.accepts(derive_status(poll, now)))
        .filter(|poll| matches_owner(poll, filter.mine_only, account))
        .cloned()
        .collect()
}
