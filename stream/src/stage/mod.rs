//! Consumer-side stages.
//!
//! A stage wraps an upstream [Publisher] and is itself a [Publisher], so they chain:
//!
//! ```ignore
//! let mut people = Cursor::open(source, &facts)?
//!     .limit_rate(20)
//!     .filter(|p: &Person| p.name.chars().count() > 20)
//!     .log_requests("example.filter");
//! people.request(10);
//! while let Some(person) = people.next().await { ... }
//! ```
//!
//! Demand flows upstream through [Publisher::request], items flow downstream through
//! [Publisher::next]. No stage delivers more items than were requested from it.

use razor_cursor_core::CursorError;
use std::future::Future;

mod filter;
pub use filter::Filter;
mod limit;
pub use limit::Limit;
mod limit_rate;
pub use limit_rate::{LimitRate, REFILL_DIVISOR};
mod log_requests;
pub use log_requests::LogRequests;

pub trait Publisher: Send {
    type Item: Send;

    /// Signal demand for `n` more items, `u64::MAX` means unbounded
    fn request(&mut self, n: u64);

    /// Stop delivery. Afterwards [Publisher::next] returns None.
    fn cancel(&mut self);

    /// Wait for the next item.
    ///
    /// Returns None on completion or after cancel, `Some(Err(_))` is terminal.
    /// Waits forever if there's no outstanding demand.
    fn next(&mut self) -> impl Future<Output = Option<Result<Self::Item, CursorError>>> + Send;
}

pub trait PublisherExt: Publisher + Sized {
    /// Keep only the items matching `predicate`, re-requesting one upstream for each dropped item.
    fn filter<F>(self, predicate: F) -> Filter<Self, F>
    where
        F: FnMut(&Self::Item) -> bool + Send,
    {
        Filter::new(self, predicate)
    }

    /// Deliver at most `n` items, then cancel upstream.
    fn limit(self, n: u64) -> Limit<Self> {
        Limit::new(self, n)
    }

    /// Cap the outstanding upstream demand to `high_water_mark`, refilled in batches.
    fn limit_rate(self, high_water_mark: usize) -> LimitRate<Self> {
        LimitRate::new(self, high_water_mark)
    }

    /// Log the demand and cancel signals passing upstream.
    fn log_requests(self, name: &str) -> LogRequests<Self> {
        LogRequests::new(self, name)
    }
}

impl<P: Publisher> PublisherExt for P {}
