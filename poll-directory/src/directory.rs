use crate::{PollReader, ReadError};
use poll_abi::{Address, Candidate, Poll, PollId};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Everything shown next to a selected poll, each part read on its own.
#[derive(Debug)]
pub struct PollDetailReads {
    pub candidates: Result<Vec<Candidate>, ReadError>,
    pub voters: Result<BTreeSet<Address>, ReadError>,
    pub total_votes: Result<u64, ReadError>,
    /// `None` when there is no connected account to ask about
    pub has_voted: Option<Result<bool, ReadError>>,
}

/// Poll directory reader
///
/// Wraps a [`PollReader`] and hands out clean records. Nothing is cached: every
/// call goes to the contract, so the answer is as fresh as the reader's.
pub struct PollDirectory<R> {
    reader: R,
}

impl<R: PollReader + Sync> PollDirectory<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// every well formed poll known to the contract, in contract order
    ///
    /// tombstoned polls are kept; hiding them is a view decision.
    pub async fn fetch_all_polls(&self) -> Result<Vec<Poll>, ReadError> {
        let raw = self.reader.get_all_polls().await?;
        let normalized = raw.normalize();
        if normalized.discarded > 0 {
            warn!(
                discarded = normalized.discarded,
                "poll list contains malformed entries"
            );
        }
        debug!(polls = normalized.polls.len(), "poll list fetched");
        Ok(normalized.polls)
    }

    /// a single poll, `None` if the contract answer is not a well formed poll
    pub async fn fetch_poll(&self, poll_id: PollId) -> Result<Option<Poll>, ReadError> {
        let poll = self.reader.get_poll(poll_id).await?.into_poll();
        if poll.is_none() {
            warn!(poll_id, "malformed poll record");
        }
        Ok(poll)
    }

    pub async fn fetch_candidates(&self, poll_id: PollId) -> Result<Vec<Candidate>, ReadError> {
        self.reader.get_candidates(poll_id).await
    }

    pub async fn fetch_voters(&self, poll_id: PollId) -> Result<BTreeSet<Address>, ReadError> {
        let voters = self.reader.get_voters(poll_id).await?;
        Ok(voters.into_iter().collect())
    }

    pub async fn fetch_total_votes(&self, poll_id: PollId) -> Result<u64, ReadError> {
        self.reader.get_total_votes(poll_id).await
    }

    pub async fn fetch_has_voted(
        &self,
        poll_id: PollId,
        voter: Address,
    ) -> Result<bool, ReadError> {
        self.reader.check_if_voted(poll_id, voter).await
    }

    /// issue all the detail reads of a poll at once
    ///
    /// the reads are not a transaction: each result stands alone and a failed
    /// one does not hold back or cancel the others.
    pub async fn fetch_detail(
        &self,
        poll_id: PollId,
        account: Option<Address>,
    ) -> PollDetailReads {
        let has_voted = async {
            match account {
                Some(voter) => Some(self.fetch_has_voted(poll_id, voter).await),
                None => None,
            }
        };
        let (candidates, voters, total_votes, has_voted) = futures::join!(
            self.fetch_candidates(poll_id),
            self.fetch_voters(poll_id),
            self.fetch_total_votes(poll_id),
            has_voted,
        );
        PollDetailReads {
            candidates,
            voters,
            total_votes,
            has_voted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_poll, FakeChain};
    use crate::{ClientConfig, ContractClient, RawPoll, RawPolls};
    use async_trait::async_trait;
    use futures::executor::block_on;

    fn directory(chain: FakeChain) -> PollDirectory<ContractClient<FakeChain>> {
        PollDirectory::new(ContractClient::new(chain, ClientConfig::default()).unwrap())
    }

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate {
                name: "An".to_owned(),
                vote_count: 2,
            },
            Candidate {
                name: "Bình".to_owned(),
                vote_count: 3,
            },
        ]
    }

    #[test]
    fn fetch_all_polls_keeps_tombstones() {
        let mut tombstoned = sample_poll(2, "Old");
        tombstoned.exists = false;
        let chain =
            FakeChain::new().with_polls(vec![sample_poll(1, "Budget"), tombstoned.clone()]);
        let polls = block_on(directory(chain).fetch_all_polls()).unwrap();
        assert_eq!(polls, vec![sample_poll(1, "Budget"), tombstoned]);
    }

    #[test]
    fn empty_contract_is_an_empty_list() {
        let polls = block_on(directory(FakeChain::new()).fetch_all_polls()).unwrap();
        assert!(polls.is_empty());
    }

    #[test]
    fn failed_poll_list_is_an_error_not_an_empty_list() {
        let chain = FakeChain::new()
            .with_polls(vec![sample_poll(1, "Budget")])
            .failing("getAllPolls");
        assert!(block_on(directory(chain).fetch_all_polls()).is_err());
    }

    #[test]
    fn voters_have_set_semantics() {
        let voter = Address::repeat_byte(9);
        let chain = FakeChain::new().with_voters(1, vec![voter, voter, Address::repeat_byte(3)]);
        let voters = block_on(directory(chain).fetch_voters(1)).unwrap();
        assert_eq!(voters.len(), 2);
        assert!(voters.contains(&voter));
    }

    #[test]
    fn detail_reads_are_independent() {
        let voter = FakeChain::signer();
        let chain = FakeChain::new()
            .with_candidates(1, candidates())
            .with_voters(1, vec![voter])
            .failing("getVoters");
        let detail = block_on(directory(chain).fetch_detail(1, Some(voter)));
        assert_eq!(detail.candidates.unwrap(), candidates());
        assert!(detail.voters.is_err());
        assert_eq!(detail.total_votes.unwrap(), 5);
        assert!(detail.has_voted.unwrap().unwrap());
    }

    #[test]
    fn detail_without_account_skips_has_voted() {
        let chain = FakeChain::new().with_candidates(1, candidates());
        let detail = block_on(directory(chain).fetch_detail(1, None));
        assert!(detail.has_voted.is_none());
        assert!(detail.candidates.is_ok());
    }

    #[test]
    fn fetch_poll_reads_single_record() {
        let chain = FakeChain::new().with_polls(vec![sample_poll(3, "Budget")]);
        assert_eq!(
            block_on(directory(chain).fetch_poll(3)).unwrap(),
            Some(sample_poll(3, "Budget"))
        );
    }

    /// a reader handing back the keyed shape some wallet bridges produce
    struct KeyedReader;

    #[async_trait]
    impl PollReader for KeyedReader {
        async fn get_all_polls(&self) -> Result<RawPolls, ReadError> {
            Ok(RawPolls::Keyed(vec![
                ("1".to_owned(), sample_poll(8, "second").into()),
                ("0".to_owned(), sample_poll(5, "first").into()),
                ("2".to_owned(), RawPoll::default()),
            ]))
        }

        async fn get_poll(&self, _: PollId) -> Result<RawPoll, ReadError> {
            Ok(RawPoll::default())
        }

        async fn get_candidates(&self, _: PollId) -> Result<Vec<Candidate>, ReadError> {
            Ok(Vec::new())
        }

        async fn get_voters(&self, _: PollId) -> Result<Vec<Address>, ReadError> {
            Ok(Vec::new())
        }

        async fn get_total_votes(&self, _: PollId) -> Result<u64, ReadError> {
            Ok(0)
        }

        async fn check_if_voted(&self, _: PollId, _: Address) -> Result<bool, ReadError> {
            Ok(false)
        }
    }

    #[test]
    fn keyed_answer_is_normalized() {
        let directory = PollDirectory::new(KeyedReader);
        let polls = block_on(directory.fetch_all_polls()).unwrap();
        let ids: Vec<u64> = polls.iter().map(|poll| poll.id).collect();
        assert_eq!(ids, vec![5, 8]);
        assert_eq!(block_on(directory.fetch_poll(1)).unwrap(), None);
    }
}
