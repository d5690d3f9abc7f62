//! This module contains the async driver of the cursor
//!

use crate::stage::{LimitRate, Publisher};
use captains_log::filter::LogFilter;
use razor_cursor_core::{CursorConfig, CursorError, FetchListener, Page, Source};
use std::fmt;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

mod task;
use task::CursorTask;

/// A central hub defined by the user for cursors, to define the customizable plugin.
///
/// One hub may be shared by any number of cursors.
pub trait CursorFacts: Sync + Send + 'static + Sized {
    /// You should keep CursorConfig inside, get_config() will return the reference.
    fn get_config(&self) -> &CursorConfig;

    /// Construct a [captains_log::filter::Filter](https://docs.rs/captains-log/latest/captains_log/filter/trait.Filter.html) to oganize log of a cursor
    fn new_logger(&self) -> Arc<LogFilter>;

    /// The observer notified of each fetch, if any
    fn listener(&self) -> Option<Arc<dyn FetchListener>> {
        None
    }
}

/// A CursorFacts for general use
pub struct CursorDefault {
    pub logger: Arc<LogFilter>,
    config: CursorConfig,
    listener: Option<Arc<dyn FetchListener>>,
}

impl CursorDefault {
    pub fn new(config: CursorConfig) -> Arc<Self> {
        Arc::new(Self { logger: Arc::new(LogFilter::new()), config, listener: None })
    }

    pub fn with_listener(config: CursorConfig, listener: Arc<dyn FetchListener>) -> Arc<Self> {
        Arc::new(Self { logger: Arc::new(LogFilter::new()), config, listener: Some(listener) })
    }

    #[inline]
    pub fn set_log_level(&self, level: log::Level) {
        self.logger.set_level(level);
    }
}

impl CursorFacts for CursorDefault {
    #[inline]
    fn get_config(&self) -> &CursorConfig {
        &self.config
    }

    #[inline]
    fn new_logger(&self) -> Arc<LogFilter> {
        self.logger.clone()
    }

    #[inline]
    fn listener(&self) -> Option<Arc<dyn FetchListener>> {
        self.listener.clone()
    }
}

pub(crate) enum Event<T> {
    Demand(u64),
    Cancel,
    Fetched(Result<Page<T>, CursorError>),
}

/// Counters shared between a [Cursor] and its task
#[derive(Default)]
pub(crate) struct CursorCounter {
    requested: AtomicU64,
    delivered: AtomicU64,
    fetches: AtomicU64,
}

impl CursorCounter {
    #[inline]
    pub(crate) fn add_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn add_fetch(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorStats {
    /// Demand issued by the consumer, saturating
    pub requested: u64,
    /// Items handed to the consumer
    pub delivered: u64,
    /// Fetches sent to the source
    pub fetches: u64,
}

/// A paged cursor over a [Source], driven by the demand of its consumer.
///
/// Each cursor runs one tokio task which owns the
/// [CursorState](crate::state::CursorState). Demand, cancellation and page arrivals are queued to
/// that task and handled one at a time. A fetch runs in its own task and posts the page back to the
/// queue, so the cursor does nothing between issuing a fetch and receiving its result.
///
/// Nothing is fetched until the first [Publisher::request].
/// Dropping the cursor cancels it.
///
/// A protocol violation of the source panics the cursor task, and the panic is resumed in
/// [Publisher::next] of the consumer.
pub struct Cursor<T: Send + 'static> {
    events: mpsc::UnboundedSender<Event<T>>,
    signals: mpsc::UnboundedReceiver<Result<T, CursorError>>,
    counter: Arc<CursorCounter>,
    task: Option<JoinHandle<()>>,
    done: bool,
}

impl<T: Send + 'static> Cursor<T> {
    /// Open a cursor on `source`. Must be called within a tokio runtime.
    pub fn open<S, F>(source: Arc<S>, facts: &Arc<F>) -> Result<Self, CursorError>
    where
        S: Source<Item = T>,
        F: CursorFacts,
    {
        facts.get_config().validate()?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (signals_tx, signals_rx) = mpsc::unbounded_channel();
        let counter = Arc::new(CursorCounter::default());
        let task = CursorTask::new(source, facts, events_tx.clone(), signals_tx, counter.clone());
        let task = tokio::spawn(task.run(events_rx));
        Ok(Self { events: events_tx, signals: signals_rx, counter, task: Some(task), done: false })
    }

    /// Open a cursor wrapped in a [LimitRate] stage.
    ///
    /// The high water mark is `CursorConfig::limit_rate`, or the fetch size when unset.
    pub fn open_rate_limited<S, F>(
        source: Arc<S>, facts: &Arc<F>,
    ) -> Result<LimitRate<Self>, CursorError>
    where
        S: Source<Item = T>,
        F: CursorFacts,
    {
        let config = facts.get_config();
        let high_water_mark = config.limit_rate.unwrap_or(config.fetch_size);
        let cursor = Self::open(source, facts)?;
        Ok(LimitRate::new(cursor, high_water_mark))
    }

    pub fn stats(&self) -> CursorStats {
        CursorStats {
            requested: self.counter.requested.load(Ordering::Relaxed),
            delivered: self.counter.delivered.load(Ordering::Relaxed),
            fetches: self.counter.fetches.load(Ordering::Relaxed),
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl<T: Send + 'static> Publisher for Cursor<T> {
    type Item = T;

    fn request(&mut self, n: u64) {
        if n == 0 || self.done {
            return;
        }
        let _ = self.counter.requested.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
            Some(v.saturating_add(n))
        });
        let _ = self.events.send(Event::Demand(n));
    }

    fn cancel(&mut self) {
        if self.done {
            return;
        }
        self.done = true;
        let _ = self.events.send(Event::Cancel);
        self.signals.close();
    }

    async fn next(&mut self) -> Option<Result<T, CursorError>> {
        if self.done {
            return None;
        }
        match self.signals.recv().await {
            Some(Ok(item)) => Some(Ok(item)),
            Some(Err(e)) => {
                self.done = true;
                Some(Err(e))
            }
            None => {
                self.done = true;
                // the task has ended, either completed or panicked
                if let Some(task) = self.task.take()
                    && let Err(e) = task.await
                    && e.is_panic()
                {
                    std::panic::resume_unwind(e.into_panic());
                }
                None
            }
        }
    }
}

impl<T: Send + 'static> Drop for Cursor<T> {
    fn drop(&mut self) {
        if !self.done {
            let _ = self.events.send(Event::Cancel);
        }
    }
}

impl<T: Send + 'static> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cursor({:?}, done={})", self.stats(), self.done)
    }
}
