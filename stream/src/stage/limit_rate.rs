use super::Publisher;
use razor_cursor_core::CursorError;

/// Upstream demand is refilled once `high_water_mark / REFILL_DIVISOR` items were delivered
/// since the last refill.
pub const REFILL_DIVISOR: u64 = 2;

/// Rate-limited demand.
///
/// Downstream demand (possibly unbounded) is held here, and at most `high_water_mark` of it is
/// outstanding upstream at a time. Instead of asking only when everything requested was consumed,
/// the stage tops the upstream demand back up to the high water mark every time half of it was
/// delivered, which gives smaller and smoother bursts of fetches.
pub struct LimitRate<P> {
    upstream: P,
    high_water_mark: u64,
    refill_at: u64,
    /// demand received from downstream, not yet forwarded
    downstream: u64,
    /// demand forwarded, not yet delivered
    upstream_pending: u64,
    since_refill: u64,
    refills: u64,
}

impl<P: Publisher> LimitRate<P> {
    pub fn new(upstream: P, high_water_mark: usize) -> Self {
        let high_water_mark = (high_water_mark as u64).max(1);
        Self {
            upstream,
            high_water_mark,
            refill_at: (high_water_mark / REFILL_DIVISOR).max(1),
            downstream: 0,
            upstream_pending: 0,
            since_refill: 0,
            refills: 0,
        }
    }

    /// Demand forwarded upstream and not yet delivered, never above the high water mark
    #[inline]
    pub fn outstanding(&self) -> u64 {
        self.upstream_pending
    }

    /// Number of upstream requests issued
    #[inline]
    pub fn refills(&self) -> u64 {
        self.refills
    }

    #[inline]
    pub fn get_ref(&self) -> &P {
        &self.upstream
    }

    fn refill(&mut self) {
        let want = (self.high_water_mark - self.upstream_pending).min(self.downstream);
        if want == 0 {
            return;
        }
        if self.downstream != u64::MAX {
            self.downstream -= want;
        }
        self.upstream_pending += want;
        self.since_refill = 0;
        self.refills += 1;
        self.upstream.request(want);
    }
}

impl<P: Publisher> Publisher for LimitRate<P> {
    type Item = P::Item;

    fn request(&mut self, n: u64) {
        self.downstream = self.downstream.saturating_add(n);
        if self.upstream_pending == 0 {
            self.refill();
        }
    }

    #[inline]
    fn cancel(&mut self) {
        self.upstream.cancel();
    }

    async fn next(&mut self) -> Option<Result<P::Item, CursorError>> {
        match self.upstream.next().await? {
            Ok(item) => {
                self.upstream_pending = self.upstream_pending.saturating_sub(1);
                self.since_refill += 1;
                if self.since_refill >= self.refill_at || self.upstream_pending == 0 {
                    self.refill();
                }
                Some(Ok(item))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
