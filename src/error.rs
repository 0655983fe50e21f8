//! Error types for rate lookups.

use std::io;

use thiserror::Error;

/// Failures that abort a run.
///
/// Decoding problems are not represented here: a payload that does not match
/// the expected schema degrades to zero-valued fields instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response.
    #[error("{url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// The response started but its body could not be collected.
    #[error("{url}: error reading response body: {message}")]
    ReadBody {
        url: String,
        message: String,
    },

    /// Writing the report or reading the operator's input failed.
    #[error("{0}")]
    Output(#[from] io::Error),
}

impl Error {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Transport { .. } | Error::ReadBody { .. } | Error::Output(_) => 1,
        }
    }
}

/// Specialized `Result` type for rate lookups.
pub type Result<T> = std::result::Result<T, Error>;
