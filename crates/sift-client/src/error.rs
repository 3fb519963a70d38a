//! Client error types.

use thiserror::Error;

use crate::protocol::RemoteIssue;

/// Canonicalization client errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The canonicalization request timed out.
    #[error("canonicalization request timed out")]
    Timeout,

    /// The remote authority rejected the filter (stale field or value
    /// references). The previous filter stays active.
    #[error("filter rejected by canonicalization authority ({} issue(s))", .0.len())]
    Rejected(Vec<RemoteIssue>),

    /// The response did not match the canonicalization protocol.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A newer edit began while this check was in flight; its result was
    /// discarded, not applied.
    #[error("validity check superseded by a newer edit")]
    Superseded,
}

impl Error {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Transport(err)
        }
    }
}
