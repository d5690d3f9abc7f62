use crate::CursorError;

/// Observes the fetches a cursor sends to its source, for diagnostics.
///
/// Invoked synchronously from the cursor task, must not block.
/// It has no way to influence the cursor.
pub trait FetchListener: Send + Sync + 'static {
    /// Called exactly once per fetch, before it is sent
    fn on_fetch_issued(&self, query: &str, fetch_size: usize);

    fn on_fetch_succeeded(&self, _query: &str, _items: usize) {}

    fn on_fetch_failed(&self, _query: &str, _err: &CursorError) {}
}
