use razor_cursor_core::{CursorError, FetchListener};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Keywords of statements that are not reads
pub const DEFAULT_IGNORE: [&str; 4] = ["INSERT", "TRUNCATE", "DROP", "CREATE"];

/// A [FetchListener] logging each fetch at info level, in the form of
///
/// ```text
/// |Cassandra| SELECT * FROM person|fetchSize: 10
/// ```
///
/// Queries containing one of the ignored keywords are skipped.
pub struct LogListener {
    label: String,
    ignore: Vec<String>,
    logged: AtomicU64,
}

impl LogListener {
    /// Create with [DEFAULT_IGNORE]
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
            logged: AtomicU64::new(0),
        }
    }

    /// Create without any ignored keyword
    pub fn log_all(label: &str) -> Self {
        Self { label: label.to_string(), ignore: Vec::new(), logged: AtomicU64::new(0) }
    }

    pub fn ignore(mut self, keyword: &str) -> Self {
        self.ignore.push(keyword.to_string());
        self
    }

    #[inline]
    pub fn is_ignored(&self, query: &str) -> bool {
        self.ignore.iter().any(|kw| query.contains(kw.as_str()))
    }

    /// Number of fetch lines written so far
    #[inline]
    pub fn logged(&self) -> u64 {
        self.logged.load(Ordering::Relaxed)
    }

    pub fn format(&self, query: &str, fetch_size: usize) -> String {
        format!("|{}| {}|fetchSize: {}", self.label, query, fetch_size)
    }
}

impl fmt::Debug for LogListener {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LogListener({}, ignore={:?})", self.label, self.ignore)
    }
}

impl FetchListener for LogListener {
    fn on_fetch_issued(&self, query: &str, fetch_size: usize) {
        if self.is_ignored(query) {
            return;
        }
        self.logged.fetch_add(1, Ordering::Relaxed);
        info!("{}", self.format(query, fetch_size));
    }

    fn on_fetch_failed(&self, query: &str, err: &CursorError) {
        if self.is_ignored(query) {
            return;
        }
        warn!("|{}| {} failed: {}", self.label, query, err);
    }
}
