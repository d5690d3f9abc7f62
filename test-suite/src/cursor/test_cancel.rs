use crate::fixtures::{Person, people as all_people};
use crate::memory::MemorySource;
use crate::verifier::StepVerifier;
use crate::*;
use razor_cursor::*;
use std::sync::Arc;
use std::time::Duration;

#[logfn]
#[rstest]
fn test_cancel_discards_inflight_page(runner: TestRunner, people: Arc<MemorySource<Person>>) {
    runner.block_on(async move {
        people.set_delay(Duration::from_millis(200));
        let facts = CursorDefault::new(CursorConfig::with_fetch_size(10));
        let mut cursor = Cursor::open(people.clone(), &facts).expect("open");
        cursor.request(10);
        assert!(wait_until(|| people.fetch_count() == 1).await);

        cursor.cancel();
        // let the page arrive
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(cursor.next().await.is_none());
        assert_eq!(people.fetch_count(), 1);
        assert_eq!(cursor.stats().delivered, 0);

        cursor.request(10);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(people.fetch_count(), 1);
    });
}

#[logfn]
#[rstest]
fn test_cancel_mid_stream(runner: TestRunner, people: Arc<MemorySource<Person>>) {
    runner.block_on(async move {
        let facts = CursorDefault::new(CursorConfig::with_fetch_size(10));
        let cursor = Cursor::open(people.clone(), &facts).expect("open");
        let mut verifier = StepVerifier::create(cursor, 15);
        verifier.expect_next_count(15).await;
        verifier.then_cancel();
        verifier.then_request(100);
        verifier.verify_complete().await;

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(verifier.received(), &all_people()[..15]);
        assert_eq!(people.fetch_count(), 2);
    });
}

#[logfn]
#[rstest]
fn test_drop_cancels(runner: TestRunner, people: Arc<MemorySource<Person>>) {
    runner.block_on(async move {
        people.set_delay(Duration::from_millis(100));
        let facts = CursorDefault::new(CursorConfig::with_fetch_size(10));
        let cursor = Cursor::open(people.clone(), &facts).expect("open");
        let mut verifier = StepVerifier::create_unbounded(cursor);
        verifier.expect_next_count(5).await;
        drop(verifier);

        tokio::time::sleep(Duration::from_millis(300)).await;
        // the fetch in flight when dropped may have been sent, nothing after it
        assert!(people.fetch_count() <= 2);
    });
}
