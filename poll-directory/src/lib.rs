//! # Poll directory
//!
//! Everything the client knows about polls comes from the voting contract.
//! This crate is the only place that talks to it:
//!
//! * [`PollReader`] and [`PollWriter`] are the read and write capabilities
//!   the rest of the client depends on;
//! * [`ContractClient`] implements both over a [`Transport`], the seam behind
//!   which the wallet provider signs and the RPC node answers;
//! * [`PollDirectory`] turns reader answers into clean records, discarding
//!   entries that are not well formed polls.
//!
//! Reads are independent of each other: one failing says nothing about the
//! others, and a failure is never reported as an empty result.

mod capability;
mod client;
mod config;
mod directory;
mod raw;
mod transport;

#[cfg(test)]
mod testing;

pub use capability::{PollReader, PollWriter, ReadError, TransactionOutcome, WriteError};
pub use client::ContractClient;
pub use config::{ClientConfig, ConfigError};
pub use directory::{PollDetailReads, PollDirectory};
pub use raw::{NormalizedPolls, RawPoll, RawPolls};
pub use transport::{TransactionReceipt, TransactionRequest, Transport, TransportError};
