//! Errors surfaced to the consumer of a cursor.
//!
//! Only recoverable conditions live here. An integration bug (a page arriving while no fetch is
//! outstanding, an over-sized page) is a protocol violation and panics instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// The store could not be reached
    #[error("connectivity failure: {0}")]
    Connectivity(String),
    /// The store answered the fetch with an error
    #[error("remote failure: {0}")]
    Remote(String),
    /// The fetch did not finish within `CursorConfig::fetch_timeout`
    #[error("fetch timeout")]
    Timeout,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl CursorError {
    /// True for errors raised by the source side of a fetch.
    #[inline]
    pub fn is_fetch_failure(&self) -> bool {
        !matches!(self, Self::InvalidConfig(_))
    }
}
