use crate::{
    ClientConfig, PollReader, PollWriter, RawPoll, RawPolls, ReadError, TransactionOutcome,
    TransactionRequest, Transport, WriteError,
};
use async_trait::async_trait;
use poll_abi::{
    AbiError, Address, Candidate, CandidateId, ContractCall, CreatePoll, PollId, TxHash, VotingAbi,
};
use tracing::{debug, info, warn};

/// The voting contract, reached through a [`Transport`].
pub struct ContractClient<T> {
    transport: T,
    abi: VotingAbi,
    config: ClientConfig,
}

impl<T: Transport + Send + Sync> ContractClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Result<Self, AbiError> {
        Ok(Self::with_abi(transport, VotingAbi::load()?, config))
    }

    pub fn with_abi(transport: T, abi: VotingAbi, config: ClientConfig) -> Self {
        Self {
            transport,
            abi,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn read(&self, call: ContractCall) -> Result<Vec<u8>, ReadError> {
        let function = call.function_name();
        let data = self
            .abi
            .encode(&call)
            .map_err(|source| ReadError::Encode { function, source })?;
        debug!(function, "contract read");
        self.transport
            .call(self.config.contract_address, data)
            .await
            .map_err(|source| ReadError::Transport { function, source })
    }

    async fn write(&self, call: ContractCall, gas_limit: u64) -> Result<TxHash, WriteError> {
        let function = call.function_name();
        let data = self
            .abi
            .encode(&call)
            .map_err(|source| WriteError::Encode { function, source })?;
        let request = TransactionRequest {
            to: self.config.contract_address,
            data,
            gas_limit,
            chain_id: self.config.chain_id,
        };
        debug!(function, gas_limit, "sending transaction");
        let hash = self
            .transport
            .send_transaction(request)
            .await
            .map_err(|source| WriteError::Send { function, source })?;
        debug!(function, ?hash, "transaction sent");
        Ok(hash)
    }
}

fn decoded<V>(function: &'static str, result: Result<V, AbiError>) -> Result<V, ReadError> {
    result.map_err(|source| ReadError::Decode { function, source })
}

#[async_trait]
impl<T: Transport + Send + Sync> PollReader for ContractClient<T> {
    async fn get_all_polls(&self) -> Result<RawPolls, ReadError> {
        let output = self.read(ContractCall::GetAllPolls).await?;
        let tokens = decoded("getAllPolls", self.abi.decode_all_polls(&output))?;
        Ok(RawPolls::from_tokens(tokens))
    }

    async fn get_poll(&self, poll_id: PollId) -> Result<RawPoll, ReadError> {
        let output = self.read(ContractCall::GetPoll(poll_id)).await?;
        let token = decoded("getPoll", self.abi.decode_poll(&output))?;
        Ok(RawPoll::from_token(token))
    }

    async fn get_candidates(&self, poll_id: PollId) -> Result<Vec<Candidate>, ReadError> {
        let output = self.read(ContractCall::GetCandidates(poll_id)).await?;
        decoded("getCandidates", self.abi.decode_candidates(&output))
    }

    async fn get_voters(&self, poll_id: PollId) -> Result<Vec<Address>, ReadError> {
        let output = self.read(ContractCall::GetVoters(poll_id)).await?;
        decoded("getVoters", self.abi.decode_voters(&output))
    }

    async fn get_total_votes(&self, poll_id: PollId) -> Result<u64, ReadError> {
        let output = self.read(ContractCall::GetTotalVotes(poll_id)).await?;
        decoded("getTotalVotes", self.abi.decode_total_votes(&output))
    }

    async fn check_if_voted(&self, poll_id: PollId, voter: Address) -> Result<bool, ReadError> {
        let output = self
            .read(ContractCall::CheckIfVoted(poll_id, voter))
            .await?;
        decoded("checkIfVoted", self.abi.decode_has_voted(&output))
    }
}

#[async_trait]
impl<T: Transport + Send + Sync> PollWriter for ContractClient<T> {
    async fn create_poll(&self, poll: &CreatePoll) -> Result<TxHash, WriteError> {
        self.write(
            ContractCall::CreatePoll(poll.clone()),
            self.config.create_poll_gas_limit,
        )
        .await
    }

    async fn vote(
        &self,
        poll_id: PollId,
        candidate_id: CandidateId,
    ) -> Result<TxHash, WriteError> {
        self.write(
            ContractCall::Vote {
                poll_id,
                candidate_id,
            },
            self.config.vote_gas_limit,
        )
        .await
    }

    async fn confirm(&self, hash: TxHash) -> Result<TransactionOutcome, WriteError> {
        let receipt = self
            .transport
            .receipt(hash)
            .await
            .map_err(|source| WriteError::Receipt { hash, source })?;

        let receipt = match receipt {
            None => return Ok(TransactionOutcome::Pending),
            Some(receipt) => receipt,
        };

        if !receipt.succeeded {
            warn!(?hash, "transaction reverted");
            return Ok(TransactionOutcome::Reverted);
        }

        let mut events = Vec::new();
        for log in &receipt.logs {
            match self.abi.decode_event(log) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                // the transaction went through regardless, the log is only informative
                Err(error) => warn!(?hash, %error, "cannot decode contract log"),
            }
        }
        info!(?hash, events = events.len(), "transaction confirmed");
        Ok(TransactionOutcome::Confirmed { events })
    }
}
