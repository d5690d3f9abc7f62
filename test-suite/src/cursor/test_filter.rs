use crate::fixtures::{LONG_NAME_COUNT, Person, has_long_name, people as all_people};
use crate::memory::MemorySource;
use crate::verifier::StepVerifier;
use crate::*;
use razor_cursor::*;
use std::sync::Arc;
use std::time::Duration;

fn long_names() -> Vec<Person> {
    all_people().into_iter().filter(has_long_name).collect()
}

#[logfn]
#[rstest]
#[case(10)]
#[case(20)]
fn test_find_with_filter(
    runner: TestRunner, people: Arc<MemorySource<Person>>, #[case] fetch_size: usize,
) {
    runner.block_on(async move {
        let facts = CursorDefault::new(CursorConfig::with_fetch_size(fetch_size));
        let find = Cursor::open(people.clone(), &facts)
            .expect("open")
            .filter(has_long_name)
            .log_requests("example.filter");
        let mut verifier = StepVerifier::create(find, 10);
        verifier.expect_next_count(LONG_NAME_COUNT).await;
        verifier.verify_complete().await;

        assert_eq!(verifier.received(), &long_names()[..]);
        let filter = verifier.get_ref().get_ref();
        let dropped = filter.dropped();
        assert_eq!(dropped as usize, crate::fixtures::ITEM_COUNT - LONG_NAME_COUNT);
        // every dropped item was requested again upstream
        let stats = filter.get_ref().stats();
        assert_eq!(stats.requested, 10 + dropped);
        assert!(stats.delivered <= stats.requested);
        assert_eq!(stats.fetches, people.fetch_count());
    });
}

#[logfn]
#[rstest]
fn test_find_with_filter_and_prefetch(runner: TestRunner, people: Arc<MemorySource<Person>>) {
    runner.block_on(async move {
        let facts = CursorDefault::new(CursorConfig::with_fetch_size(20));
        let find = Cursor::open(people.clone(), &facts)
            .expect("open")
            .limit_rate(20)
            .filter(has_long_name)
            .log_requests("example.filter");
        let mut verifier = StepVerifier::create(find, 10);
        verifier.expect_next_count(LONG_NAME_COUNT).await;
        verifier.verify_complete().await;
        assert_eq!(verifier.received(), &long_names()[..]);

        // the logged requests reached the cursor through the filter and limit-rate stages
        let cursor = verifier.get_ref().get_ref().get_ref().get_ref();
        let stats = cursor.stats();
        assert_eq!(stats.delivered, crate::fixtures::ITEM_COUNT as u64);
        assert!(stats.delivered <= stats.requested);
        assert_eq!(stats.fetches, people.fetch_count());
    });
}

#[logfn]
#[rstest]
fn test_filter_does_not_over_deliver(runner: TestRunner, people: Arc<MemorySource<Person>>) {
    runner.block_on(async move {
        let facts = CursorDefault::new(CursorConfig::with_fetch_size(10));
        let find = Cursor::open(people.clone(), &facts).expect("open").filter(has_long_name);
        let mut verifier = StepVerifier::create(find, 3);
        verifier.expect_next_count(3).await;
        verifier.expect_no_signal(Duration::from_millis(100)).await;

        verifier.then_request(10);
        verifier.expect_next_count(LONG_NAME_COUNT - 3).await;
        verifier.verify_complete().await;
        assert_eq!(verifier.received(), &long_names()[..]);
    });
}

#[logfn]
#[rstest]
fn test_filter_rejecting_everything(runner: TestRunner, people: Arc<MemorySource<Person>>) {
    runner.block_on(async move {
        let facts = CursorDefault::new(CursorConfig::with_fetch_size(10));
        let find = Cursor::open(people.clone(), &facts).expect("open").filter(|_: &Person| false);
        let mut verifier = StepVerifier::create(find, 1);
        verifier.verify_complete().await;
        assert_eq!(people.fetch_count(), 11);
        assert_eq!(verifier.get_ref().dropped() as usize, crate::fixtures::ITEM_COUNT);
    });
}
