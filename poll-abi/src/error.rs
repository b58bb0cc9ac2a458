use thiserror::Error;

#[derive(Debug, Error)]
pub enum AbiError {
    #[error("contract ABI error: {0}")]
    Ethabi(#[from] ethabi::Error),

    #[error("unexpected `{function}` data: expected {expected}")]
    UnexpectedToken {
        function: &'static str,
        expected: &'static str,
    },

    #[error("`{field}` does not fit in 64 bits")]
    Overflow { field: &'static str },

    #[error("no contract function has the selector 0x{0}")]
    UnknownSelector(String),

    #[error("call data is {0} bytes long, too short for a function selector")]
    ShortCallData(usize),
}
