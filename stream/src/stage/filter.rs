use super::Publisher;
use razor_cursor_core::CursorError;

pub struct Filter<P, F> {
    upstream: P,
    predicate: F,
    dropped: u64,
}

impl<P, F> Filter<P, F>
where
    P: Publisher,
    F: FnMut(&P::Item) -> bool + Send,
{
    pub fn new(upstream: P, predicate: F) -> Self {
        Self { upstream, predicate, dropped: 0 }
    }

    /// Number of items rejected by the predicate
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    #[inline]
    pub fn get_ref(&self) -> &P {
        &self.upstream
    }
}

impl<P, F> Publisher for Filter<P, F>
where
    P: Publisher,
    F: FnMut(&P::Item) -> bool + Send,
{
    type Item = P::Item;

    #[inline]
    fn request(&mut self, n: u64) {
        self.upstream.request(n);
    }

    #[inline]
    fn cancel(&mut self) {
        self.upstream.cancel();
    }

    async fn next(&mut self) -> Option<Result<P::Item, CursorError>> {
        loop {
            match self.upstream.next().await? {
                Ok(item) => {
                    if (self.predicate)(&item) {
                        return Some(Ok(item));
                    }
                    // the dropped item consumed one unit of downstream demand, ask for its replacement
                    self.dropped += 1;
                    self.upstream.request(1);
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
