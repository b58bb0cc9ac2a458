//! # The voting contract ABI
//!
//! [`VotingAbi`] wraps the JSON ABI of the deployed contract and turns
//! [`ContractCall`]s into call data, and call results back into records.
//!
//! `getAllPolls` and `getPoll` are decoded only down to their raw tuples: the
//! caller decides what a usable poll record is.

use crate::{
    token, AbiError, Address, Candidate, ContractCall, ContractEvent, CreatePoll, RawLog,
};
use ethabi::{Contract, Function, Token};

/// JSON ABI of the voting contract
pub const VOTING_ABI_JSON: &str = include_str!("../res/voting_abi.json");

#[derive(Debug, Clone)]
pub struct VotingAbi {
    contract: Contract,
}

impl VotingAbi {
    /// load the voting contract ABI shipped with this crate
    pub fn load() -> Result<Self, AbiError> {
        Self::from_json(VOTING_ABI_JSON)
    }

    /// load a compatible ABI, for example one exported by a newer contract build
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        let contract = Contract::load(json.as_bytes())?;
        Ok(Self { contract })
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    fn function(&self, name: &str) -> Result<&Function, AbiError> {
        Ok(self.contract.function(name)?)
    }

    /// selector followed by the ABI encoded arguments
    pub fn encode(&self, call: &ContractCall) -> Result<Vec<u8>, AbiError> {
        let function = self.function(call.function_name())?;
        Ok(function.encode_input(&call.tokens())?)
    }

    /// recover the call encoded in `data`
    pub fn decode_call(&self, data: &[u8]) -> Result<ContractCall, AbiError> {
        if data.len() < 4 {
            return Err(AbiError::ShortCallData(data.len()));
        }
        let (selector, arguments) = data.split_at(4);
        let function = self
            .contract
            .functions()
            .find(|f| f.short_signature()[..] == *selector)
            .ok_or_else(|| AbiError::UnknownSelector(hex::encode(selector)))?;
        let tokens = function.decode_input(arguments)?;

        let call = match function.name.as_str() {
            "getAllPolls" => ContractCall::GetAllPolls,
            "getPoll" => ContractCall::GetPoll(poll_id_argument("getPoll", tokens)?),
            "getCandidates" => {
                ContractCall::GetCandidates(poll_id_argument("getCandidates", tokens)?)
            }
            "getVoters" => ContractCall::GetVoters(poll_id_argument("getVoters", tokens)?),
            "getTotalVotes" => {
                ContractCall::GetTotalVotes(poll_id_argument("getTotalVotes", tokens)?)
            }
            "checkIfVoted" => {
                let [id, voter] = token::fields("checkIfVoted", tokens)?;
                ContractCall::CheckIfVoted(
                    token::uint("checkIfVoted", "pollId", id)?,
                    token::address("checkIfVoted", voter)?,
                )
            }
            "vote" => {
                let [poll_id, candidate_id] = token::fields("vote", tokens)?;
                ContractCall::Vote {
                    poll_id: token::uint("vote", "pollId", poll_id)?,
                    candidate_id: token::uint("vote", "candidateId", candidate_id)?,
                }
            }
            "createPoll" => ContractCall::CreatePoll(create_poll_arguments(tokens)?),
            _ => return Err(AbiError::UnknownSelector(hex::encode(selector))),
        };
        Ok(call)
    }

    /// the `tuple[]` returned by `getAllPolls`, one tuple token per poll
    pub fn decode_all_polls(&self, data: &[u8]) -> Result<Vec<Token>, AbiError> {
        const F: &str = "getAllPolls";
        let tokens = self.function(F)?.decode_output(data)?;
        token::array(F, token::single(F, tokens)?)
    }

    /// the tuple returned by `getPoll`
    pub fn decode_poll(&self, data: &[u8]) -> Result<Token, AbiError> {
        const F: &str = "getPoll";
        let tokens = self.function(F)?.decode_output(data)?;
        token::single(F, tokens)
    }

    /// candidates of a poll, in candidate id order
    pub fn decode_candidates(&self, data: &[u8]) -> Result<Vec<Candidate>, AbiError> {
        const F: &str = "getCandidates";
        let tokens = self.function(F)?.decode_output(data)?;
        token::array(F, token::single(F, tokens)?)?
            .into_iter()
            .map(|candidate| {
                let [name, vote_count] = token::fields(F, token::tuple(F, candidate)?)?;
                Ok(Candidate {
                    name: token::string(F, name)?,
                    vote_count: token::uint(F, "voteCount", vote_count)?,
                })
            })
            .collect()
    }

    pub fn decode_voters(&self, data: &[u8]) -> Result<Vec<Address>, AbiError> {
        const F: &str = "getVoters";
        let tokens = self.function(F)?.decode_output(data)?;
        token::array(F, token::single(F, tokens)?)?
            .into_iter()
            .map(|voter| token::address(F, voter))
            .collect()
    }

    pub fn decode_total_votes(&self, data: &[u8]) -> Result<u64, AbiError> {
        const F: &str = "getTotalVotes";
        let tokens = self.function(F)?.decode_output(data)?;
        token::uint(F, "totalVotes", token::single(F, tokens)?)
    }

    pub fn decode_has_voted(&self, data: &[u8]) -> Result<bool, AbiError> {
        const F: &str = "checkIfVoted";
        let tokens = self.function(F)?.decode_output(data)?;
        token::boolean(F, token::single(F, tokens)?)
    }

    /// decode a log emitted by the contract
    ///
    /// returns `None` for logs that are none of the contract's known events.
    pub fn decode_event(&self, log: &RawLog) -> Result<Option<ContractEvent>, AbiError> {
        let signature = match log.topics.first() {
            Some(signature) => *signature,
            None => return Ok(None),
        };
        let event = match self.contract.events().find(|e| e.signature() == signature) {
            Some(event) => event,
            None => return Ok(None),
        };
        let parsed = event.parse_log(log.clone())?;
        let mut params = parsed.params.into_iter().map(|param| param.value);
        let mut next = |name: &'static str| {
            params.next().ok_or(AbiError::UnexpectedToken {
                function: name,
                expected: "an event parameter",
            })
        };

        let event = match event.name.as_str() {
            "PollCreated" => ContractEvent::PollCreated {
                poll_id: token::uint("PollCreated", "pollId", next("PollCreated")?)?,
                title: token::string("PollCreated", next("PollCreated")?)?,
                creator: token::address("PollCreated", next("PollCreated")?)?,
            },
            "Voted" => ContractEvent::Voted {
                poll_id: token::uint("Voted", "pollId", next("Voted")?)?,
                candidate_id: token::uint("Voted", "candidateId", next("Voted")?)?,
                voter: token::address("Voted", next("Voted")?)?,
            },
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}

fn poll_id_argument(function: &'static str, tokens: Vec<Token>) -> Result<u64, AbiError> {
    let [id] = token::fields(function, tokens)?;
    token::uint(function, "pollId", id)
}

fn create_poll_arguments(tokens: Vec<Token>) -> Result<CreatePoll, AbiError> {
    const F: &str = "createPoll";
    let [title, names, start_time, end_time, is_public, whitelist] = token::fields(F, tokens)?;
    Ok(CreatePoll {
        title: token::string(F, title)?,
        candidate_names: token::array(F, names)?
            .into_iter()
            .map(|name| token::string(F, name))
            .collect::<Result<_, _>>()?,
        start_time: token::uint(F, "startTime", start_time)?,
        end_time: token::uint(F, "endTime", end_time)?,
        is_public: token::boolean(F, is_public)?,
        whitelist: token::array(F, whitelist)?
            .into_iter()
            .map(|address| token::address(F, address))
            .collect::<Result<_, _>>()?,
    })
}
