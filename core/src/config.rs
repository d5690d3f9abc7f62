use crate::error::CursorError;
use std::time::Duration;

/// General config for a cursor
#[derive(Clone, Debug)]
pub struct CursorConfig {
    /// Max number of records requested from the source per fetch, must be >= 1
    pub fetch_size: usize,
    /// When set, the high water mark of outstanding upstream demand,
    /// applied by `Cursor::open_rate_limited`.
    pub limit_rate: Option<usize>,
    /// A fetch taking longer is failed with [CursorError::Timeout].
    /// Zero disables the timeout.
    pub fetch_timeout: Duration,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self { fetch_size: 10, limit_rate: None, fetch_timeout: Duration::from_secs(0) }
    }
}

impl CursorConfig {
    pub fn with_fetch_size(fetch_size: usize) -> Self {
        Self { fetch_size, ..Default::default() }
    }

    pub fn validate(&self) -> Result<(), CursorError> {
        if self.fetch_size == 0 {
            return Err(CursorError::InvalidConfig("fetch_size must be >= 1".to_string()));
        }
        if self.limit_rate == Some(0) {
            return Err(CursorError::InvalidConfig("limit_rate must be >= 1".to_string()));
        }
        Ok(())
    }

    #[inline]
    pub fn has_fetch_timeout(&self) -> bool {
        self.fetch_timeout != Duration::from_secs(0)
    }
}
