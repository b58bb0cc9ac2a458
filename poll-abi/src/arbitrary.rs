//! `quickcheck` generators for the contract records.

use crate::{Address, Candidate, Poll};
use quickcheck::{Arbitrary, Gen};

/// upper bound of generated timestamps, small enough that start, end and
/// "now" values drawn independently land on every side of each other
pub const TIME_HORIZON: u64 = 10_000;

pub fn arbitrary_address<G: Gen>(g: &mut G) -> Address {
    let bytes: Vec<u8> = (0..20).map(|_| u8::arbitrary(g)).collect();
    Address::from_slice(&bytes)
}

impl Arbitrary for Poll {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let start_time = u64::arbitrary(g) % TIME_HORIZON;
        let end_time = u64::arbitrary(g) % TIME_HORIZON;
        Poll {
            id: u64::arbitrary(g) % 1_000,
            title: String::arbitrary(g),
            start_time,
            end_time,
            is_public: bool::arbitrary(g),
            exists: bool::arbitrary(g),
            creator: arbitrary_address(g),
        }
    }
}

impl Arbitrary for Candidate {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        Candidate {
            name: String::arbitrary(g),
            vote_count: u64::arbitrary(g),
        }
    }
}
