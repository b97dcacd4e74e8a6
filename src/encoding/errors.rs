use std::io;

use thiserror::Error;

/// Represents the user-facing errors of the swap router encoding package.
///
/// Variants:
/// - `TokenInMismatch` / `TokenOutMismatch`: The trades encoded together do not share a common
///   wrapped input or output currency.
/// - `NonTokenPermit`: A permit was supplied for a native input currency.
/// - `MultihopPriceLimit`: A price limit was supplied alongside a multi-hop route.
/// - `InvalidAddress`: A recipient or fee recipient address is malformed.
/// - `InvalidInput`: The encoding has failed due to bad input parameters.
/// - `FatalError`: There is a problem with the application setup.
#[derive(Error, Debug, PartialEq)]
pub enum EncodingError {
    #[error("All trades must share the same input token")]
    TokenInMismatch,
    #[error("All trades must share the same output token")]
    TokenOutMismatch,
    #[error("A permit can only be used with a token input")]
    NonTokenPermit,
    #[error("A price limit can only be used with single hop routes")]
    MultihopPriceLimit,
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Fatal error: {0}")]
    FatalError(String),
}

impl From<io::Error> for EncodingError {
    fn from(err: io::Error) -> Self {
        EncodingError::FatalError(err.to_string())
    }
}

impl From<serde_json::Error> for EncodingError {
    fn from(err: serde_json::Error) -> Self {
        EncodingError::FatalError(err.to_string())
    }
}
