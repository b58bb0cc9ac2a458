use crate::Address;
use thiserror::Error;

const ADDRESS_HEX_LEN: usize = 40;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address `{0}` does not start with 0x")]
    MissingPrefix(String),

    #[error("address `{address}` has {len} hex digits, expected 40")]
    InvalidLength { address: String, len: usize },

    #[error("address `{address}` is not valid hex: {reason}")]
    InvalidHex {
        address: String,
        reason: String,
    },
}

/// parse a `0x` prefixed, 40 hex digits account address
///
/// digits are accepted in any case, so two spellings of the same account
/// parse to the same `Address`. Surrounding whitespace is ignored.
pub fn parse_address(s: &str) -> Result<Address, AddressError> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| AddressError::MissingPrefix(s.to_owned()))?;

    if digits.len() != ADDRESS_HEX_LEN {
        return Err(AddressError::InvalidLength {
            address: s.to_owned(),
            len: digits.len(),
        });
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes).map_err(|e| AddressError::InvalidHex {
        address: s.to_owned(),
        reason: e.to_string(),
    })?;
    Ok(Address::from(bytes))
}

/// full lowercase `0x` form of an address
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_bytes()))
}
