//! Error types for the reporter.

use std::fmt;

/// Reporter error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration or credential loading error.
    Config(String),
    /// Remote call to the contract failed (network, transport or on-chain).
    Rpc(String),
    /// Rejected user input.
    InvalidInput(String),
    /// A write needs a signed-in session.
    NotSignedIn,
    /// A submission is still in flight.
    Busy,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Rpc(msg) => write!(f, "rpc error: {msg}"),
            Error::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Error::NotSignedIn => write!(f, "not signed in"),
            Error::Busy => write!(f, "a report is already being submitted"),
        }
    }
}

impl std::error::Error for Error {}

impl From<hapi_types::TypesError> for Error {
    fn from(e: hapi_types::TypesError) -> Self {
        Error::InvalidInput(e.to_string())
    }
}

impl Error {
    /// True for failures of the write or read RPC.
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Rpc(_))
    }
}
