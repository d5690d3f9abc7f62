use crate::{CursorError, Page, Position};
use std::future::Future;

/// A finite, ordered sequence of records held by a remote store, read in pages.
///
/// One `Source` may be shared by any number of cursors, so the implementation
/// must be safe for concurrent use. A fetch must not have side effects beyond the read.
pub trait Source: Send + Sync + 'static {
    type Item: Send + 'static;

    /// Query text of this source, reported to the [FetchListener](crate::FetchListener)
    fn describe(&self) -> String;

    /// Fetch at most `fetch_size` records after `after`.
    ///
    /// `fetch_size` is always >= 1. Returning more than `fetch_size` records is a protocol violation.
    /// Connectivity problems should return [CursorError::Connectivity], errors answered by the
    /// store [CursorError::Remote].
    fn fetch_page(
        &self, after: Position, fetch_size: usize,
    ) -> impl Future<Output = Result<Page<Self::Item>, CursorError>> + Send;
}
