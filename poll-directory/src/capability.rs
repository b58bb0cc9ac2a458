//! Read and write capabilities over the voting contract.

use crate::{RawPoll, RawPolls, TransportError};
use async_trait::async_trait;
use poll_abi::{
    AbiError, Address, Candidate, CandidateId, ContractEvent, CreatePoll, PollId, TxHash,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("cannot encode `{function}`: {source}")]
    Encode {
        function: &'static str,
        #[source]
        source: AbiError,
    },

    #[error("cannot read `{function}`: {source}")]
    Transport {
        function: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("`{function}` answered with undecodable data: {source}")]
    Decode {
        function: &'static str,
        #[source]
        source: AbiError,
    },

    #[error("the poll list is {0}, expected a sequence or a mapping")]
    UnexpectedShape(String),
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot encode `{function}`: {source}")]
    Encode {
        function: &'static str,
        #[source]
        source: AbiError,
    },

    #[error("`{function}` was not sent: {source}")]
    Send {
        function: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("cannot get the receipt of transaction {hash:?}: {source}")]
    Receipt {
        hash: TxHash,
        #[source]
        source: TransportError,
    },
}

impl WriteError {
    /// the wording of the underlying failure, for classifying the rejection
    pub fn raw_message(&self) -> String {
        match self {
            WriteError::Encode { source, .. } => source.to_string(),
            WriteError::Send { source, .. } | WriteError::Receipt { source, .. } => {
                source.message().to_owned()
            }
        }
    }
}

/// State of a sent transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// not mined yet
    Pending,
    /// mined and executed, with the contract events it emitted
    Confirmed { events: Vec<ContractEvent> },
    /// mined but reverted by the contract
    Reverted,
}

/// Read access to the voting contract.
///
/// Each method is one independent, idempotent request.
#[async_trait]
pub trait PollReader {
    async fn get_all_polls(&self) -> Result<RawPolls, ReadError>;

    async fn get_poll(&self, poll_id: PollId) -> Result<RawPoll, ReadError>;

    /// candidates in index order, the index being the candidate id
    async fn get_candidates(&self, poll_id: PollId) -> Result<Vec<Candidate>, ReadError>;

    async fn get_voters(&self, poll_id: PollId) -> Result<Vec<Address>, ReadError>;

    async fn get_total_votes(&self, poll_id: PollId) -> Result<u64, ReadError>;

    async fn check_if_voted(&self, poll_id: PollId, voter: Address) -> Result<bool, ReadError>;
}

/// Write access to the voting contract.
///
/// Signing happens behind this interface; once a transaction is sent it cannot
/// be taken back, only confirmed.
#[async_trait]
pub trait PollWriter {
    async fn create_poll(&self, poll: &CreatePoll) -> Result<TxHash, WriteError>;

    async fn vote(&self, poll_id: PollId, candidate_id: CandidateId)
        -> Result<TxHash, WriteError>;

    async fn confirm(&self, hash: TxHash) -> Result<TransactionOutcome, WriteError>;
}
