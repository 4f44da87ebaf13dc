use std::{error::Error, fmt};

/// The two ways a kline fetch can fail.
///
/// `InvalidArgument` means the caller must fix its input and is always raised
/// before the kline source is contacted. `FetchFailed` covers everything from
/// the source call onwards (transport, rejected range, unexpected row shape)
/// and is worth retrying later.
#[derive(Debug)]
pub enum FetchError {
    InvalidArgument(String),
    FetchFailed(anyhow::Error),
}

impl FetchError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        FetchError::InvalidArgument(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, FetchError::InvalidArgument(_))
    }

    pub fn is_fetch_failed(&self) -> bool {
        matches!(self, FetchError::FetchFailed(_))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::fmt::Result {
        match self {
            FetchError::InvalidArgument(msg) => write!(f, "Invalid input: {}", msg),
            // {:#} keeps the whole anyhow context chain on one line
            FetchError::FetchFailed(cause) => write!(f, "Failed to fetch klines: {:#}", cause),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FetchError::InvalidArgument(_) => None,
            FetchError::FetchFailed(cause) => Some(&**cause),
        }
    }
}
