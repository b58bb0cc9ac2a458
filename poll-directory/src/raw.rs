//! Poll list responses as they come back from a reader.
//!
//! Depending on who decoded the contract answer, the poll list is either an
//! ordered sequence or a mapping keyed by position, and its entries may be
//! ABI tuples or JSON values. Nothing at this boundary is type checked, so
//! every field is optional until [`RawPoll::into_poll`] says otherwise.

use crate::ReadError;
use poll_abi::{parse_address, u256_to_u64, Address, Poll, Token};
use serde_json::{Map, Value};
use std::cmp::Ordering;

const POLL_FIELDS: usize = 7;

/// A poll entry whose fields have not been checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPoll {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub start_time: Option<u64>,
    pub end_time: Option<u64>,
    pub is_public: Option<bool>,
    pub exists: Option<bool>,
    pub creator: Option<Address>,
}

/// The two shapes a poll list comes in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPolls {
    Sequence(Vec<RawPoll>),
    Keyed(Vec<(String, RawPoll)>),
}

/// Well formed polls, in list order, and how many entries were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedPolls {
    pub polls: Vec<Poll>,
    pub discarded: usize,
}

impl From<Poll> for RawPoll {
    fn from(poll: Poll) -> Self {
        RawPoll {
            id: Some(poll.id),
            title: Some(poll.title),
            start_time: Some(poll.start_time),
            end_time: Some(poll.end_time),
            is_public: Some(poll.is_public),
            exists: Some(poll.exists),
            creator: Some(poll.creator),
        }
    }
}

impl RawPoll {
    /// read a `(uint256,string,uint256,uint256,bool,bool,address)` tuple
    pub fn from_token(token: Token) -> Self {
        let fields = match token.into_tuple().map(<[Token; POLL_FIELDS]>::try_from) {
            Some(Ok(fields)) => fields,
            _ => return RawPoll::default(),
        };
        let [id, title, start_time, end_time, is_public, exists, creator] = fields;
        RawPoll {
            id: id.into_uint().and_then(u256_to_u64),
            title: title.into_string(),
            start_time: start_time.into_uint().and_then(u256_to_u64),
            end_time: end_time.into_uint().and_then(u256_to_u64),
            is_public: is_public.into_bool(),
            exists: exists.into_bool(),
            creator: creator.into_address(),
        }
    }

    /// read a JSON entry, either an object with the contract's field names or
    /// a positional array in the contract's field order
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(object) => Self::from_json_object(object),
            Value::Array(fields) if fields.len() == POLL_FIELDS => RawPoll {
                id: json_uint(&fields[0]),
                title: json_string(&fields[1]),
                start_time: json_uint(&fields[2]),
                end_time: json_uint(&fields[3]),
                is_public: fields[4].as_bool(),
                exists: fields[5].as_bool(),
                creator: json_address(&fields[6]),
            },
            _ => RawPoll::default(),
        }
    }

    fn from_json_object(object: &Map<String, Value>) -> Self {
        RawPoll {
            id: object.get("id").and_then(json_uint),
            title: object.get("title").and_then(json_string),
            start_time: object.get("startTime").and_then(json_uint),
            end_time: object.get("endTime").and_then(json_uint),
            is_public: object.get("isPublic").and_then(Value::as_bool),
            exists: object.get("exists").and_then(Value::as_bool),
            creator: object.get("creator").and_then(json_address),
        }
    }

    /// the poll, if every field is present
    pub fn into_poll(self) -> Option<Poll> {
        Some(Poll {
            id: self.id?,
            title: self.title?,
            start_time: self.start_time?,
            end_time: self.end_time?,
            is_public: self.is_public?,
            exists: self.exists?,
            creator: self.creator?,
        })
    }
}

impl RawPolls {
    /// the `tuple[]` decoded from `getAllPolls`
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        RawPolls::Sequence(tokens.into_iter().map(RawPoll::from_token).collect())
    }

    /// a JSON array of entries, or a JSON object mapping keys to entries
    pub fn from_json(value: &Value) -> Result<Self, ReadError> {
        match value {
            Value::Array(entries) => Ok(RawPolls::Sequence(
                entries.iter().map(RawPoll::from_json).collect(),
            )),
            Value::Object(entries) => Ok(RawPolls::Keyed(
                entries
                    .iter()
                    .map(|(key, entry)| (key.clone(), RawPoll::from_json(entry)))
                    .collect(),
            )),
            other => Err(ReadError::UnexpectedShape(json_kind(other))),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RawPolls::Sequence(entries) => entries.len(),
            RawPolls::Keyed(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// flatten into list order, keeping only well formed polls
    ///
    /// keyed entries are ordered by their numeric key; keys that are not
    /// numbers come after, in lexical order.
    pub fn normalize(self) -> NormalizedPolls {
        let entries = match self {
            RawPolls::Sequence(entries) => entries,
            RawPolls::Keyed(mut entries) => {
                entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
                entries.into_iter().map(|(_, entry)| entry).collect()
            }
        };

        let total = entries.len();
        let polls: Vec<Poll> = entries.into_iter().filter_map(RawPoll::into_poll).collect();
        NormalizedPolls {
            discarded: total - polls.len(),
            polls,
        }
    }
}

fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// integers arrive as numbers, decimal strings, `123n` bigint strings or `0x` hex
fn json_uint(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(s) => {
            let s = s.trim();
            let s = s.strip_suffix('n').unwrap_or(s);
            match s.strip_prefix("0x") {
                Some(hex) => u64::from_str_radix(hex, 16).ok(),
                None => s.parse().ok(),
            }
        }
        _ => None,
    }
}

fn json_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

fn json_address(value: &Value) -> Option<Address> {
    value.as_str().and_then(|s| parse_address(s).ok())
}

fn json_kind(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
    .to_owned()
}
