//! Drive a [Publisher] step by step and assert on what it signals.

use razor_cursor::{CursorError, Publisher};
use std::time::Duration;

const SIGNAL_TIMEOUT: Duration = Duration::from_secs(5);

pub struct StepVerifier<P: Publisher> {
    publisher: P,
    received: Vec<P::Item>,
}

impl<P: Publisher> StepVerifier<P> {
    /// Subscribe with `initial_demand`, zero requests nothing
    pub fn create(mut publisher: P, initial_demand: u64) -> Self {
        if initial_demand > 0 {
            publisher.request(initial_demand);
        }
        Self { publisher, received: Vec::new() }
    }

    pub fn create_unbounded(publisher: P) -> Self {
        Self::create(publisher, u64::MAX)
    }

    pub async fn expect_next_count(&mut self, n: usize) {
        for i in 0..n {
            match tokio::time::timeout(SIGNAL_TIMEOUT, self.publisher.next()).await {
                Ok(Some(Ok(item))) => self.received.push(item),
                Ok(Some(Err(e))) => panic!("expected item {} of {}, got error {}", i + 1, n, e),
                Ok(None) => panic!("expected item {} of {}, got completion", i + 1, n),
                Err(_) => panic!("expected item {} of {}, timed out", i + 1, n),
            }
        }
    }

    /// Assert nothing is signaled within `wait`
    pub async fn expect_no_signal(&mut self, wait: Duration) {
        if tokio::time::timeout(wait, self.publisher.next()).await.is_ok() {
            panic!("expected no signal within {:?}", wait);
        }
    }

    pub fn then_request(&mut self, n: u64) {
        self.publisher.request(n);
    }

    pub fn then_cancel(&mut self) {
        self.publisher.cancel();
    }

    pub async fn verify_complete(&mut self) {
        match tokio::time::timeout(SIGNAL_TIMEOUT, self.publisher.next()).await {
            Ok(None) => {}
            Ok(Some(Ok(_))) => panic!("expected completion, got an item"),
            Ok(Some(Err(e))) => panic!("expected completion, got error {}", e),
            Err(_) => panic!("expected completion, timed out"),
        }
    }

    pub async fn verify_error(&mut self) -> CursorError {
        match tokio::time::timeout(SIGNAL_TIMEOUT, self.publisher.next()).await {
            Ok(Some(Err(e))) => e,
            Ok(Some(Ok(_))) => panic!("expected error, got an item"),
            Ok(None) => panic!("expected error, got completion"),
            Err(_) => panic!("expected error, timed out"),
        }
    }

    #[inline]
    pub fn received(&self) -> &[P::Item] {
        &self.received
    }

    #[inline]
    pub fn get_ref(&self) -> &P {
        &self.publisher
    }
}
