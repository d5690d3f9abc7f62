mod test_cancel;
mod test_failure;
mod test_filter;

use razor_cursor::{CursorError, FetchListener};
use std::sync::Mutex;

/// Remembers every fetch event
#[derive(Default)]
pub struct RecordingListener {
    pub issued: Mutex<Vec<(String, usize)>>,
    pub succeeded: Mutex<Vec<usize>>,
    pub failed: Mutex<Vec<CursorError>>,
}

impl FetchListener for RecordingListener {
    fn on_fetch_issued(&self, query: &str, fetch_size: usize) {
        self.issued.lock().unwrap().push((query.to_string(), fetch_size));
    }

    fn on_fetch_succeeded(&self, _query: &str, items: usize) {
        self.succeeded.lock().unwrap().push(items);
    }

    fn on_fetch_failed(&self, _query: &str, err: &CursorError) {
        self.failed.lock().unwrap().push(err.clone());
    }
}
