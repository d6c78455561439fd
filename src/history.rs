//! Bounded sample history.
//!
//! Keeps the newest `N` samples in a fixed-capacity ring (no heap). When
//! full, each push evicts the oldest sample. Iteration is oldest-first,
//! so the newest sample is always last.

use heapless::HistoryBuffer;

use crate::sample::Sample;

/// Number of samples kept for display.
pub const HISTORY_CAPACITY: usize = 50;

/// Fixed-capacity, newest-last sample history.
pub struct SampleHistory<const N: usize = HISTORY_CAPACITY> {
    ring: HistoryBuffer<Sample, N>,
}

impl<const N: usize> SampleHistory<N> {
    pub const fn new() -> Self {
        Self {
            ring: HistoryBuffer::new(),
        }
    }

    /// Build from a newest-last sequence, keeping only the final `N`.
    pub fn from_recent<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = Sample>,
    {
        let mut h = Self::new();
        h.extend_from_oldest(samples);
        h
    }

    /// Append a newly arrived sample, evicting the oldest when full.
    pub fn push(&mut self, sample: Sample) {
        self.ring.write(sample);
    }

    /// Append samples given oldest-first.
    pub fn extend_from_oldest<I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = Sample>,
    {
        for s in samples {
            self.ring.write(s);
        }
    }

    /// The most recent sample, if any.
    pub fn latest(&self) -> Option<&Sample> {
        self.ring.recent()
    }

    /// Samples oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.ring.oldest_ordered()
    }

    /// Copy out the samples oldest-first.
    pub fn to_vec(&self) -> Vec<Sample> {
        self.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.ring.len() == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn clear(&mut self) {
        self.ring.clear();
    }
}

impl<const N: usize> Default for SampleHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Clone for SampleHistory<N> {
    fn clone(&self) -> Self {
        Self::from_recent(self.iter().copied())
    }
}

impl<const N: usize> core::fmt::Debug for SampleHistory<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
