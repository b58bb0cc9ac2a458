use crate::{Address, CandidateId, PollId, Timestamp, U256};
use ethabi::Token;

/// Parameters of the contract's `createPoll` function.
///
/// The contract itself rejects bad timings and too few candidates; building a
/// sound `CreatePoll` from user input is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePoll {
    pub title: String,
    pub candidate_names: Vec<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub is_public: bool,
    /// empty for public polls
    pub whitelist: Vec<Address>,
}

/// Every contract function the client calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    GetAllPolls,
    GetPoll(PollId),
    GetCandidates(PollId),
    GetVoters(PollId),
    GetTotalVotes(PollId),
    CheckIfVoted(PollId, Address),
    CreatePoll(CreatePoll),
    Vote {
        poll_id: PollId,
        candidate_id: CandidateId,
    },
}

impl ContractCall {
    /// name of the function in the contract ABI
    pub fn function_name(&self) -> &'static str {
        match self {
            ContractCall::GetAllPolls => "getAllPolls",
            ContractCall::GetPoll(_) => "getPoll",
            ContractCall::GetCandidates(_) => "getCandidates",
            ContractCall::GetVoters(_) => "getVoters",
            ContractCall::GetTotalVotes(_) => "getTotalVotes",
            ContractCall::CheckIfVoted(..) => "checkIfVoted",
            ContractCall::CreatePoll(_) => "createPoll",
            ContractCall::Vote { .. } => "vote",
        }
    }

    /// read-only calls are answered by `eth_call`, the others need a transaction
    pub fn is_read_only(&self) -> bool {
        !matches!(self, ContractCall::CreatePoll(_) | ContractCall::Vote { .. })
    }

    pub(crate) fn tokens(&self) -> Vec<Token> {
        match self {
            ContractCall::GetAllPolls => Vec::new(),
            ContractCall::GetPoll(id)
            | ContractCall::GetCandidates(id)
            | ContractCall::GetVoters(id)
            | ContractCall::GetTotalVotes(id) => vec![uint(*id)],
            ContractCall::CheckIfVoted(id, voter) => vec![uint(*id), Token::Address(*voter)],
            ContractCall::CreatePoll(create) => vec![
                Token::String(create.title.clone()),
                Token::Array(
                    create
                        .candidate_names
                        .iter()
                        .cloned()
                        .map(Token::String)
                        .collect(),
                ),
                uint(create.start_time),
                uint(create.end_time),
                Token::Bool(create.is_public),
                Token::Array(create.whitelist.iter().copied().map(Token::Address).collect()),
            ],
            ContractCall::Vote {
                poll_id,
                candidate_id,
            } => vec![uint(*poll_id), uint(*candidate_id)],
        }
    }
}

fn uint(value: u64) -> Token {
    Token::Uint(U256::from(value))
}
