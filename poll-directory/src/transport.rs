use async_trait::async_trait;
use poll_abi::{Address, RawLog, TxHash};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("request rejected by the signer: {0}")]
    Rejected(String),
}

impl TransportError {
    /// the message as the node or the signer worded it
    pub fn message(&self) -> &str {
        match self {
            TransportError::Rpc { message, .. } => message,
            TransportError::Network(message) | TransportError::Rejected(message) => message,
        }
    }
}

/// A contract call to be signed and broadcast by the wallet provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub to: Address,
    pub data: Vec<u8>,
    pub gas_limit: u64,
    pub chain_id: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    /// `false` when the transaction was mined but reverted
    pub succeeded: bool,
    pub logs: Vec<RawLog>,
}

/// Interface to the chain, as provided by the wallet provider.
///
/// `call` is a read-only `eth_call`; `send_transaction` hands the request to
/// the signer and resolves once it is broadcast, not once it is mined.
#[async_trait]
pub trait Transport {
    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, TransportError>;

    async fn send_transaction(&self, request: TransactionRequest)
        -> Result<TxHash, TransportError>;

    /// `None` as long as the transaction is not mined
    async fn receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>, TransportError>;
}
