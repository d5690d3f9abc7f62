pub mod fixtures;
pub mod memory;
pub mod verifier;

#[cfg(test)]
mod cursor;

extern crate captains_log;
extern crate log;
pub use captains_log::logfn;
use captains_log::*;
use fixtures::{ITEM_COUNT, Person};
use memory::MemorySource;
use rstest::*;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Loaded in batches of 20
pub fn people_source() -> Arc<MemorySource<Person>> {
    let source = MemorySource::populated("person", fixtures::people(), 20);
    assert_eq!(source.len(), ITEM_COUNT);
    Arc::new(source)
}

#[fixture]
pub fn runner() -> TestRunner {
    TestRunner::new()
}

#[fixture]
pub fn people() -> Arc<MemorySource<Person>> {
    people_source()
}

impl fmt::Debug for TestRunner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "")
    }
}

pub struct TestRunner {
    pub rt: Runtime,
}

impl TestRunner {
    pub fn new() -> Self {
        recipe::raw_file_logger("/tmp/cursor_test.log", Level::Trace).test().build().expect("log");
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(
                std::thread::available_parallelism()
                    .unwrap_or(std::num::NonZero::new(1).unwrap())
                    .into(),
            )
            .enable_all()
            .build()
            .expect("runtime");
        Self { rt }
    }

    pub fn block_on<F: Future<Output = ()> + Send + 'static>(&self, f: F) {
        self.rt.block_on(f);
    }
}

/// Poll `cond` every 10ms for up to 2 seconds
pub async fn wait_until<F: Fn() -> bool>(cond: F) -> bool {
    for _ in 0..200 {
        if cond() {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    cond()
}
