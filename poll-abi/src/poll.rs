use crate::{Address, U256};
use serde::{Deserialize, Serialize};

/// Identifier the contract assigns to a poll, increasing with each creation.
pub type PollId = u64;

/// Index of a candidate within its poll; this is what a vote refers to.
pub type CandidateId = u64;

/// Unix time in seconds.
pub type Timestamp = u64;

/// A poll as stored by the voting contract.
///
/// Everything but `exists` is fixed at creation. A poll with `exists == false`
/// has been tombstoned: it stays in the contract storage but is not to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: PollId,
    pub title: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub is_public: bool,
    pub exists: bool,
    pub creator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub name: String,
    pub vote_count: u64,
}

/// narrow a contract `uint256` to 64 bits, `None` if it does not fit
pub fn u256_to_u64(value: U256) -> Option<u64> {
    if value > U256::from(u64::MAX) {
        None
    } else {
        Some(value.low_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u256_narrowing() {
        assert_eq!(u256_to_u64(U256::from(42u64)), Some(42));
        assert_eq!(u256_to_u64(U256::from(u64::MAX)), Some(u64::MAX));
        assert_eq!(u256_to_u64(U256::from(u64::MAX) + U256::one()), None);
    }

    #[test]
    fn poll_serializes_camel_case() {
        let poll = Poll {
            id: 3,
            title: "Class Rep".to_owned(),
            start_time: 1000,
            end_time: 2000,
            is_public: true,
            exists: true,
            creator: Address::repeat_byte(0x35),
        };
        let json = serde_json::to_value(&poll).unwrap();
        assert_eq!(json["startTime"], 1000);
        assert_eq!(json["isPublic"], true);
        let back: Poll = serde_json::from_value(json).unwrap();
        assert_eq!(back, poll);
    }
}
