//! An in-memory table serving pages, with hooks to delay or fail fetches.

use log::debug;
use razor_cursor::{CursorError, Page, Position, Source};
use std::fmt;
use std::sync::{
    Mutex, RwLock,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

pub struct MemorySource<T> {
    table: String,
    rows: RwLock<Vec<T>>,
    fetches: AtomicU64,
    delay_ms: AtomicU64,
    /// (fetch number starting from 1, error)
    fail_at: Mutex<Option<(u64, CursorError)>>,
}

impl<T: Clone + Send + Sync + 'static> MemorySource<T> {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            rows: RwLock::new(Vec::new()),
            fetches: AtomicU64::new(0),
            delay_ms: AtomicU64::new(0),
            fail_at: Mutex::new(None),
        }
    }

    /// Create and insert `rows` in batches of `batch_size`
    pub fn populated(table: &str, rows: Vec<T>, batch_size: usize) -> Self {
        let source = Self::new(table);
        for batch in rows.chunks(batch_size) {
            source.insert_all(batch.to_vec());
        }
        source
    }

    /// Returns the number of inserted rows
    pub fn insert_all(&self, batch: Vec<T>) -> usize {
        let n = batch.len();
        self.rows.write().expect("rows lock").extend(batch);
        debug!("INSERT {} rows INTO {}", n, self.table);
        n
    }

    pub fn truncate(&self) {
        self.rows.write().expect("rows lock").clear();
        debug!("TRUNCATE {}", self.table);
    }

    pub fn len(&self) -> usize {
        self.rows.read().expect("rows lock").len()
    }

    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Every fetch sleeps this long before answering
    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Fail the `nth` fetch (starting from 1) with `err`
    pub fn fail_on_fetch(&self, nth: u64, err: CursorError) {
        *self.fail_at.lock().expect("fail_at lock") = Some((nth, err));
    }

    fn read_page(&self, after: Position, fetch_size: usize) -> Page<T> {
        let rows = self.rows.read().expect("rows lock");
        let start = (after.offset() as usize).min(rows.len());
        let end = (start + fetch_size).min(rows.len());
        Page::from_fetch(rows[start..end].to_vec(), fetch_size, end == rows.len())
    }

    fn injected_failure(&self, nth: u64) -> Option<CursorError> {
        match self.fail_at.lock().expect("fail_at lock").as_ref() {
            Some((at, err)) if *at == nth => Some(err.clone()),
            _ => None,
        }
    }
}

impl<T> fmt::Debug for MemorySource<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rows = self.rows.read().map(|rows| rows.len()).unwrap_or(0);
        write!(f, "{}({} rows)", self.table, rows)
    }
}

impl<T: Clone + Send + Sync + 'static> Source for MemorySource<T> {
    type Item = T;

    fn describe(&self) -> String {
        format!("SELECT * FROM {}", self.table)
    }

    async fn fetch_page(&self, after: Position, fetch_size: usize) -> Result<Page<T>, CursorError> {
        let nth = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if let Some(err) = self.injected_failure(nth) {
            return Err(err);
        }
        Ok(self.read_page(after, fetch_size))
    }
}
