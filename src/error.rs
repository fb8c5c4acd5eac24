use thiserror::Error;

use crate::endpoints::EndpointKind;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The request could not be sent, or the server answered with a non-2xx status.
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The body did not contain the container we expected for this endpoint.
    #[error("could not parse {kind} response for {keys}: {reason}")]
    Parse {
        kind: EndpointKind,
        keys: String,
        reason: String,
    },

    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl ScrapeError {
    pub fn transport(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(kind: EndpointKind, keys: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Parse {
            kind,
            keys: keys.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error only affects the branch it happened in.
    pub fn is_branch_local(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Parse { .. })
    }
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("row written before the header")]
    HeaderNotWritten,

    #[error("header written twice")]
    HeaderAlreadyWritten,

    #[error("row has {got} fields but the header has {expected}")]
    WidthMismatch { expected: usize, got: usize },

    #[error("write after finish")]
    Finished,
}
