//! Integration tests for the SampleFeed → DashboardService path.

use std::thread;

use greenhouse::app::events::AppEvent;
use greenhouse::app::service::DashboardService;
use greenhouse::config::DashboardConfig;
use greenhouse::feed::{FeedStatus, SampleFeed};
use greenhouse::sample::Sample;

use crate::mock_backend::RecordingSink;

fn s(ts: u64) -> Sample {
    Sample::new(23.0, 62.0, ts).unwrap()
}

fn service(batch: usize) -> DashboardService {
    DashboardService::new(DashboardConfig {
        feed_drain_batch: batch,
        ..DashboardConfig::default()
    })
}

#[test]
fn drain_preserves_arrival_order() {
    let feed: SampleFeed = SampleFeed::new();
    let mut svc = service(0);
    let mut sink = RecordingSink::new();
    for ts in [5, 3, 9, 1] {
        feed.try_publish(s(ts)).unwrap();
    }

    assert_eq!(svc.drain_feed(&feed, &mut sink), 4);

    // Arrival order, not timestamp order.
    assert_eq!(sink.derived_timestamps(), [5, 3, 9, 1]);
    assert_eq!(svc.view().current.timestamp_ms, 1);
    assert!(feed.is_empty());
}

#[test]
fn drain_takes_at_most_one_batch() {
    let feed: SampleFeed<8> = SampleFeed::new();
    let mut svc = service(3);
    let mut sink = RecordingSink::new();
    for ts in 0..7 {
        feed.try_publish(s(ts)).unwrap();
    }

    assert_eq!(svc.drain_feed(&feed, &mut sink), 3);
    assert_eq!(feed.len(), 4);
    assert_eq!(svc.drain_feed(&feed, &mut sink), 3);
    assert_eq!(svc.drain_feed(&feed, &mut sink), 1);
    assert_eq!(svc.drain_feed(&feed, &mut sink), 0);
    assert_eq!(sink.derived_timestamps(), (0..7).collect::<Vec<_>>());
}

#[test]
fn rejected_feed_sample_does_not_stop_drain() {
    let feed: SampleFeed = SampleFeed::new();
    let mut svc = service(0);
    let mut sink = RecordingSink::new();
    feed.try_publish(s(1)).unwrap();
    feed.try_publish(Sample::new(-240.0, 50.0, 2).unwrap()).unwrap();
    feed.try_publish(s(3)).unwrap();

    assert_eq!(svc.drain_feed(&feed, &mut sink), 3);

    assert_eq!(sink.derived_timestamps(), [1, 3]);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SampleRejected(_))), 1);
    assert_eq!(svc.history().len(), 2);
}

#[test]
fn full_feed_counts_drops_without_touching_queued_samples() {
    let feed: SampleFeed<2> = SampleFeed::new();
    feed.try_publish(s(1)).unwrap();
    feed.try_publish(s(2)).unwrap();
    let refused = feed.try_publish(s(3)).unwrap_err();

    assert_eq!(refused.0.timestamp_ms, 3);
    assert_eq!(feed.dropped(), 1);

    let mut svc = service(0);
    let mut sink = RecordingSink::new();
    svc.drain_feed(&feed, &mut sink);
    assert_eq!(sink.derived_timestamps(), [1, 2]);
}

#[test]
fn status_change_reported_once() {
    let feed: SampleFeed = SampleFeed::new();
    let svc = service(0);
    let mut sink = RecordingSink::new();

    svc.update_feed_status(&feed, FeedStatus::Subscribed, &mut sink);
    svc.update_feed_status(&feed, FeedStatus::Subscribed, &mut sink);
    svc.update_feed_status(&feed, FeedStatus::Closed, &mut sink);

    let changes: Vec<FeedStatus> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::FeedStatusChanged(st) => Some(*st),
            _ => None,
        })
        .collect();
    assert_eq!(changes, [FeedStatus::Subscribed, FeedStatus::Closed]);
    assert_eq!(feed.status(), FeedStatus::Closed);
}

#[test]
fn producer_thread_feeds_consumer_in_order() {
    let feed: SampleFeed<4> = SampleFeed::new();
    let mut svc = service(0);
    let mut sink = RecordingSink::new();

    thread::scope(|scope| {
        scope.spawn(|| {
            for ts in 0..40 {
                futures_lite::future::block_on(feed.publish(s(ts)));
            }
            feed.set_status(FeedStatus::Closed);
        });

        loop {
            let closed = feed.status() == FeedStatus::Closed;
            if svc.drain_feed(&feed, &mut sink) == 0 {
                if closed {
                    break;
                }
                thread::yield_now();
            }
        }
    });

    assert_eq!(sink.derived_timestamps(), (0..40).collect::<Vec<_>>());
    assert_eq!(feed.dropped(), 0);
    assert_eq!(svc.history().len(), 40);
}
