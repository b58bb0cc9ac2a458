//! Narrowing of decoded `ethabi` tokens into plain values.

use crate::{u256_to_u64, AbiError, Address};
use ethabi::Token;

pub(crate) fn uint(
    function: &'static str,
    field: &'static str,
    token: Token,
) -> Result<u64, AbiError> {
    let value = token.into_uint().ok_or(AbiError::UnexpectedToken {
        function,
        expected: "uint256",
    })?;
    u256_to_u64(value).ok_or(AbiError::Overflow { field })
}

pub(crate) fn string(function: &'static str, token: Token) -> Result<String, AbiError> {
    token.into_string().ok_or(AbiError::UnexpectedToken {
        function,
        expected: "string",
    })
}

pub(crate) fn boolean(function: &'static str, token: Token) -> Result<bool, AbiError> {
    token.into_bool().ok_or(AbiError::UnexpectedToken {
        function,
        expected: "bool",
    })
}

pub(crate) fn address(function: &'static str, token: Token) -> Result<Address, AbiError> {
    token.into_address().ok_or(AbiError::UnexpectedToken {
        function,
        expected: "address",
    })
}

pub(crate) fn array(function: &'static str, token: Token) -> Result<Vec<Token>, AbiError> {
    token.into_array().ok_or(AbiError::UnexpectedToken {
        function,
        expected: "array",
    })
}

pub(crate) fn tuple(function: &'static str, token: Token) -> Result<Vec<Token>, AbiError> {
    token.into_tuple().ok_or(AbiError::UnexpectedToken {
        function,
        expected: "tuple",
    })
}

/// take the single value a function returns
pub(crate) fn single(function: &'static str, tokens: Vec<Token>) -> Result<Token, AbiError> {
    let mut tokens = tokens.into_iter();
    match (tokens.next(), tokens.next()) {
        (Some(token), None) => Ok(token),
        _ => Err(AbiError::UnexpectedToken {
            function,
            expected: "a single return value",
        }),
    }
}

/// split a fixed number of tokens off a decoded parameter list
pub(crate) fn fields<const N: usize>(
    function: &'static str,
    tokens: Vec<Token>,
) -> Result<[Token; N], AbiError> {
    tokens.try_into().map_err(|_| AbiError::UnexpectedToken {
        function,
        expected: "a different number of values",
    })
}
