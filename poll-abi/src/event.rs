use crate::{Address, CandidateId, PollId};

/// Events emitted by the voting contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractEvent {
    PollCreated {
        poll_id: PollId,
        title: String,
        creator: Address,
    },
    Voted {
        poll_id: PollId,
        candidate_id: CandidateId,
        voter: Address,
    },
}

impl ContractEvent {
    pub fn poll_id(&self) -> PollId {
        match self {
            ContractEvent::PollCreated { poll_id, .. } | ContractEvent::Voted { poll_id, .. } => {
                *poll_id
            }
        }
    }
}
