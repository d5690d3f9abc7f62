use super::Publisher;
use razor_cursor_core::CursorError;

/// Deliver the first `n` items only
pub struct Limit<P> {
    upstream: P,
    /// demand that can still be forwarded
    unforwarded: u64,
    /// items that can still be delivered
    remaining: u64,
    cancelled: bool,
}

impl<P: Publisher> Limit<P> {
    pub fn new(upstream: P, n: u64) -> Self {
        Self { upstream, unforwarded: n, remaining: n, cancelled: false }
    }

    #[inline]
    pub fn get_ref(&self) -> &P {
        &self.upstream
    }

    fn cancel_upstream(&mut self) {
        if !self.cancelled {
            self.cancelled = true;
            self.upstream.cancel();
        }
    }
}

impl<P: Publisher> Publisher for Limit<P> {
    type Item = P::Item;

    fn request(&mut self, n: u64) {
        let n = n.min(self.unforwarded);
        if n == 0 || self.cancelled {
            return;
        }
        self.unforwarded -= n;
        self.upstream.request(n);
    }

    fn cancel(&mut self) {
        self.cancel_upstream();
    }

    async fn next(&mut self) -> Option<Result<P::Item, CursorError>> {
        if self.remaining == 0 {
            self.cancel_upstream();
            return None;
        }
        if self.cancelled {
            return None;
        }
        match self.upstream.next().await? {
            Ok(item) => {
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.cancel_upstream();
                }
                Some(Ok(item))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
