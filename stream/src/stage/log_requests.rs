use super::Publisher;
use razor_cursor_core::CursorError;
use std::future::Future;

/// Log every request and cancel signal at info level, under `name`
pub struct LogRequests<P> {
    upstream: P,
    name: String,
}

impl<P: Publisher> LogRequests<P> {
    pub fn new(upstream: P, name: &str) -> Self {
        Self { upstream, name: name.to_string() }
    }

    #[inline]
    pub fn get_ref(&self) -> &P {
        &self.upstream
    }
}

impl<P: Publisher> Publisher for LogRequests<P> {
    type Item = P::Item;

    fn request(&mut self, n: u64) {
        if n == u64::MAX {
            info!("{}: request(unbounded)", self.name);
        } else {
            info!("{}: request({})", self.name, n);
        }
        self.upstream.request(n);
    }

    fn cancel(&mut self) {
        info!("{}: cancel()", self.name);
        self.upstream.cancel();
    }

    #[inline]
    fn next(&mut self) -> impl Future<Output = Option<Result<P::Item, CursorError>>> + Send {
        self.upstream.next()
    }
}
