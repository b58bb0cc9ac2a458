//! An in-memory chain answering contract calls with ABI encoded data.

use crate::{TransactionReceipt, TransactionRequest, Transport, TransportError};
use async_trait::async_trait;
use ethabi::{encode, Token};
use poll_abi::{
    Address, Candidate, ContractCall, Poll, PollId, RawLog, TxHash, VotingAbi, U256,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub fn sample_poll(id: PollId, title: &str) -> Poll {
    Poll {
        id,
        title: title.to_owned(),
        start_time: 1000,
        end_time: 2000,
        is_public: true,
        exists: true,
        creator: Address::repeat_byte(0xab),
    }
}

#[derive(Default)]
struct State {
    call_targets: Vec<Address>,
    sent: Vec<TransactionRequest>,
    pending: Vec<(TxHash, ContractCall)>,
    mined: HashMap<TxHash, TransactionReceipt>,
}

pub struct FakeChain {
    abi: VotingAbi,
    polls: Vec<Poll>,
    candidates: HashMap<PollId, Vec<Candidate>>,
    voters: HashMap<PollId, Vec<Address>>,
    failing: HashSet<&'static str>,
    rejecting: Option<String>,
    reverting: bool,
    state: Mutex<State>,
}

impl FakeChain {
    pub fn new() -> Self {
        Self {
            abi: VotingAbi::load().unwrap(),
            polls: Vec::new(),
            candidates: HashMap::new(),
            voters: HashMap::new(),
            failing: HashSet::new(),
            rejecting: None,
            reverting: false,
            state: Mutex::new(State::default()),
        }
    }

    /// the account the fake wallet signs with
    pub fn signer() -> Address {
        Address::repeat_byte(0x5e)
    }

    pub fn with_polls(mut self, polls: Vec<Poll>) -> Self {
        self.polls = polls;
        self
    }

    pub fn with_candidates(mut self, poll_id: PollId, candidates: Vec<Candidate>) -> Self {
        self.candidates.insert(poll_id, candidates);
        self
    }

    pub fn with_voters(mut self, poll_id: PollId, voters: Vec<Address>) -> Self {
        self.voters.insert(poll_id, voters);
        self
    }

    /// reads of `function` fail with a network error
    pub fn failing(mut self, function: &'static str) -> Self {
        self.failing.insert(function);
        self
    }

    /// the signer refuses every transaction with `message`
    pub fn rejecting(mut self, message: &str) -> Self {
        self.rejecting = Some(message.to_owned());
        self
    }

    /// mined transactions revert
    pub fn reverting(mut self) -> Self {
        self.reverting = true;
        self
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn last_call_target(&self) -> Option<Address> {
        self.state.lock().unwrap().call_targets.last().copied()
    }

    /// include every pending transaction in a block
    pub fn mine(&self) {
        let mut state = self.state.lock().unwrap();
        let pending = std::mem::take(&mut state.pending);
        for (hash, call) in pending {
            let logs = if self.reverting {
                Vec::new()
            } else {
                self.logs_of(&call)
            };
            state.mined.insert(
                hash,
                TransactionReceipt {
                    transaction_hash: hash,
                    succeeded: !self.reverting,
                    logs,
                },
            );
        }
    }

    fn logs_of(&self, call: &ContractCall) -> Vec<RawLog> {
        let contract = self.abi.contract();
        match call {
            ContractCall::Vote {
                poll_id,
                candidate_id,
            } => vec![RawLog {
                topics: vec![
                    contract.event("Voted").unwrap().signature(),
                    uint_topic(*poll_id),
                    Self::signer().into(),
                ],
                data: encode(&[Token::Uint(U256::from(*candidate_id))]),
            }],
            ContractCall::CreatePoll(create) => vec![RawLog {
                topics: vec![
                    contract.event("PollCreated").unwrap().signature(),
                    uint_topic(self.polls.len() as u64 + 1),
                    Self::signer().into(),
                ],
                data: encode(&[Token::String(create.title.clone())]),
            }],
            _ => Vec::new(),
        }
    }

    fn answer(&self, call: ContractCall) -> Result<Vec<u8>, TransportError> {
        let output = match call {
            ContractCall::GetAllPolls => {
                encode(&[Token::Array(self.polls.iter().map(poll_token).collect())])
            }
            ContractCall::GetPoll(id) => {
                let poll = self.polls.iter().find(|poll| poll.id == id).ok_or_else(|| {
                    TransportError::Rpc {
                        code: 3,
                        message: "execution reverted".to_owned(),
                    }
                })?;
                encode(&[poll_token(poll)])
            }
            ContractCall::GetCandidates(id) => encode(&[Token::Array(
                self.candidates_of(id)
                    .iter()
                    .map(|candidate| {
                        Token::Tuple(vec![
                            Token::String(candidate.name.clone()),
                            Token::Uint(U256::from(candidate.vote_count)),
                        ])
                    })
                    .collect(),
            )]),
            ContractCall::GetVoters(id) => encode(&[Token::Array(
                self.voters_of(id).iter().copied().map(Token::Address).collect(),
            )]),
            ContractCall::GetTotalVotes(id) => {
                let total: u64 = self.candidates_of(id).iter().map(|c| c.vote_count).sum();
                encode(&[Token::Uint(U256::from(total))])
            }
            ContractCall::CheckIfVoted(id, voter) => {
                encode(&[Token::Bool(self.voters_of(id).contains(&voter))])
            }
            ContractCall::CreatePoll(_) | ContractCall::Vote { .. } => {
                return Err(TransportError::Rpc {
                    code: -32000,
                    message: "state changing call sent as eth_call".to_owned(),
                })
            }
        };
        Ok(output)
    }

    fn candidates_of(&self, id: PollId) -> Vec<Candidate> {
        self.candidates.get(&id).cloned().unwrap_or_default()
    }

    fn voters_of(&self, id: PollId) -> Vec<Address> {
        self.voters.get(&id).cloned().unwrap_or_default()
    }
}

fn poll_token(poll: &Poll) -> Token {
    Token::Tuple(vec![
        Token::Uint(U256::from(poll.id)),
        Token::String(poll.title.clone()),
        Token::Uint(U256::from(poll.start_time)),
        Token::Uint(U256::from(poll.end_time)),
        Token::Bool(poll.is_public),
        Token::Bool(poll.exists),
        Token::Address(poll.creator),
    ])
}

fn uint_topic(value: u64) -> TxHash {
    let mut topic = [0u8; 32];
    U256::from(value).to_big_endian(&mut topic);
    TxHash::from(topic)
}

#[async_trait]
impl Transport for FakeChain {
    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        self.state.lock().unwrap().call_targets.push(to);
        let call = self
            .abi
            .decode_call(&data)
            .map_err(|e| TransportError::Network(e.to_string()))?;
        if self.failing.contains(call.function_name()) {
            return Err(TransportError::Network("connection reset by peer".to_owned()));
        }
        self.answer(call)
    }

    async fn send_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<TxHash, TransportError> {
        if let Some(message) = &self.rejecting {
            return Err(TransportError::Rejected(message.clone()));
        }
        let call = self
            .abi
            .decode_call(&request.data)
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let mut state = self.state.lock().unwrap();
        state.sent.push(request);
        let hash = TxHash::from_low_u64_be(state.sent.len() as u64);
        state.pending.push((hash, call));
        Ok(hash)
    }

    async fn receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>, TransportError> {
        Ok(self.state.lock().unwrap().mined.get(&hash).cloned())
    }
}
