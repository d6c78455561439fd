//! Live sample feed.
//!
//! Newly recorded samples arrive one at a time from the telemetry
//! subscription and are consumed by the dashboard service in arrival order.
//!
//! ```text
//! ┌──────────────┐ try_publish ┌──────────────────┐ try_next / next ┌──────────────┐
//! │ Subscription │────────────▶│ SampleFeed<DEPTH>│────────────────▶│ Dashboard    │
//! │ (producer)   │             │ (bounded FIFO)   │                 │ (consumer)   │
//! └──────────────┘             └──────────────────┘                 └──────────────┘
//! ```
//!
//! Backed by an `embassy-sync` bounded channel, so producers and
//! consumers on different threads need no further locking. A full feed
//! hands the sample back to the producer instead of blocking.

use core::fmt;
use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use log::{debug, warn};

use crate::sample::Sample;

/// Default channel depth between the subscription and the consumer.
pub const FEED_DEPTH: usize = 16;

/// Lifecycle of the realtime subscription behind the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FeedStatus {
    Connecting = 0,
    Subscribed = 1,
    Closed = 2,
}

impl FeedStatus {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Subscribed,
            2 => Self::Closed,
            _ => Self::Connecting,
        }
    }
}

impl fmt::Display for FeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connecting => write!(f, "connecting"),
            Self::Subscribed => write!(f, "subscribed"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Returned by [`SampleFeed::try_publish`] when the feed is full.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedFull(pub Sample);

impl fmt::Display for FeedFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sample feed full")
    }
}

/// Bounded FIFO of newly arrived samples.
pub struct SampleFeed<const DEPTH: usize = FEED_DEPTH> {
    channel: Channel<CriticalSectionRawMutex, Sample, DEPTH>,
    status: AtomicU8,
    dropped: AtomicU32,
}

impl<const DEPTH: usize> SampleFeed<DEPTH> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            status: AtomicU8::new(FeedStatus::Connecting as u8),
            dropped: AtomicU32::new(0),
        }
    }

    /// Offer a sample without blocking.
    pub fn try_publish(&self, sample: Sample) -> Result<(), FeedFull> {
        match self.channel.try_send(sample) {
            Ok(()) => {
                debug!("feed: queued sample ts={}", sample.timestamp_ms);
                Ok(())
            }
            Err(TrySendError::Full(s)) => {
                let n = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                warn!("feed: full, dropped sample ts={} (total dropped {n})", s.timestamp_ms);
                Err(FeedFull(s))
            }
        }
    }

    /// Wait for room and enqueue. Used by replay producers that must not drop.
    pub async fn publish(&self, sample: Sample) {
        self.channel.send(sample).await;
    }

    /// Take the oldest pending sample, if any.
    pub fn try_next(&self) -> Option<Sample> {
        self.channel.try_receive().ok()
    }

    /// Wait for the next sample.
    pub async fn next(&self) -> Sample {
        self.channel.receive().await
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Samples rejected because the feed was full.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn status(&self) -> FeedStatus {
        FeedStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    /// Record a subscription status change. Returns the previous status.
    pub fn set_status(&self, status: FeedStatus) -> FeedStatus {
        FeedStatus::from_u8(self.status.swap(status as u8, Ordering::AcqRel))
    }
}

impl<const DEPTH: usize> Default for SampleFeed<DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}
