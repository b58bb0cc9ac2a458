//! Records and ABI of the on-chain voting contract.
//!
//! The contract owns the polls; this crate only knows how to talk about them:
//! the [`Poll`] and [`Candidate`] records as the client sees them, the calls
//! that can be encoded against the contract ([`ContractCall`]) and the events
//! it emits ([`ContractEvent`]).

mod address;
mod call;
mod contract;
mod error;
mod event;
mod poll;
mod token;

#[cfg(any(test, feature = "property-test-api"))]
pub mod arbitrary;

pub use address::{format_address, parse_address, AddressError};
pub use call::{ContractCall, CreatePoll};
pub use contract::{VotingAbi, VOTING_ABI_JSON};
pub use error::AbiError;
pub use event::ContractEvent;
pub use poll::{u256_to_u64, Candidate, CandidateId, Poll, PollId, Timestamp};

pub use ethabi::{RawLog, Token};
pub use ethereum_types::{H160 as Address, H256 as TxHash, U256};
