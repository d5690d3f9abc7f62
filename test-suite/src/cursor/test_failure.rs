use super::RecordingListener;
use crate::fixtures::{Person, people as all_people};
use crate::memory::MemorySource;
use crate::verifier::StepVerifier;
use crate::*;
use razor_cursor::*;
use std::sync::Arc;
use std::time::Duration;

#[logfn]
#[rstest]
#[case(CursorError::Remote("Cannot achieve consistency level ONE".to_string()))]
#[case(CursorError::Connectivity("All host(s) tried for query failed".to_string()))]
fn test_fetch_failure(
    runner: TestRunner, people: Arc<MemorySource<Person>>, #[case] err: CursorError,
) {
    runner.block_on(async move {
        people.fail_on_fetch(2, err.clone());
        let listener = Arc::new(RecordingListener::default());
        let facts = CursorDefault::with_listener(CursorConfig::with_fetch_size(10), listener.clone());
        let cursor = Cursor::open(people.clone(), &facts).expect("open");
        let mut verifier = StepVerifier::create_unbounded(cursor);
        verifier.expect_next_count(10).await;
        assert_eq!(verifier.verify_error().await, err);
        verifier.verify_complete().await;

        assert_eq!(verifier.received(), &all_people()[..10]);
        assert_eq!(people.fetch_count(), 2);
        assert_eq!(listener.failed.lock().unwrap().clone(), vec![err]);
    });
}

#[logfn]
#[rstest]
fn test_failure_through_filter(runner: TestRunner, people: Arc<MemorySource<Person>>) {
    runner.block_on(async move {
        people.fail_on_fetch(1, CursorError::Connectivity("connection refused".to_string()));
        let facts = CursorDefault::new(CursorConfig::with_fetch_size(10));
        let find = Cursor::open(people.clone(), &facts)
            .expect("open")
            .filter(crate::fixtures::has_long_name);
        let mut verifier = StepVerifier::create(find, 10);
        let err = verifier.verify_error().await;
        assert!(matches!(err, CursorError::Connectivity(_)));
        assert!(err.is_fetch_failure());
    });
}

#[logfn]
#[rstest]
fn test_fetch_timeout(runner: TestRunner, people: Arc<MemorySource<Person>>) {
    runner.block_on(async move {
        people.set_delay(Duration::from_millis(500));
        let config = CursorConfig {
            fetch_size: 10,
            fetch_timeout: Duration::from_millis(50),
            ..Default::default()
        };
        let facts = CursorDefault::new(config);
        let cursor = Cursor::open(people.clone(), &facts).expect("open");
        let mut verifier = StepVerifier::create(cursor, 10);
        assert_eq!(verifier.verify_error().await, CursorError::Timeout);
        assert!(verifier.received().is_empty());
    });
}

#[logfn]
#[rstest]
fn test_invalid_config(runner: TestRunner, people: Arc<MemorySource<Person>>) {
    runner.block_on(async move {
        let facts = CursorDefault::new(CursorConfig::with_fetch_size(0));
        let err = Cursor::open(people.clone(), &facts).expect_err("invalid");
        assert!(matches!(err, CursorError::InvalidConfig(_)));
        assert!(!err.is_fetch_failure());
        assert_eq!(people.fetch_count(), 0);
    });
}

/// Answers every fetch with more rows than asked for
struct OversizedSource;

impl Source for OversizedSource {
    type Item = Person;

    fn describe(&self) -> String {
        "SELECT * FROM oversized".to_string()
    }

    async fn fetch_page(&self, _after: Position, fetch_size: usize) -> Result<Page<Person>, CursorError> {
        Ok(Page::new(all_people().into_iter().take(fetch_size + 5).collect(), false))
    }
}

#[logfn]
#[rstest]
fn test_oversized_page_is_not_completion(runner: TestRunner) {
    runner.block_on(async move {
        let facts = CursorDefault::new(CursorConfig::with_fetch_size(10));
        let mut cursor = Cursor::open(Arc::new(OversizedSource), &facts).expect("open");
        let consumer = tokio::spawn(async move {
            cursor.request(5);
            cursor.next().await.map(|r| r.is_ok())
        });
        let e = consumer.await.expect_err("must not end cleanly");
        assert!(e.is_panic());
        let payload = e.into_panic();
        let msg = payload
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
            .unwrap_or_default();
        assert!(msg.contains("protocol violation"), "{}", msg);
    });
}
