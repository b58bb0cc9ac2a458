use poll_abi::{Poll, PollId};
use tracing::debug;

/// keep the selection only while the selected poll is still listed
pub fn reconcile_selection(selected: Option<PollId>, filtered: &[Poll]) -> Option<PollId> {
    let id = selected?;
    if filtered.iter().any(|poll| poll.id == id) {
        Some(id)
    } else {
        debug!(poll_id = id, "selected poll filtered out, clearing selection");
        None
    }
}
