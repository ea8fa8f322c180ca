//! Statistics types.

#[cfg(feature = "metrics")]
use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counts for one shard.
///
/// All counters stay at zero unless the `metrics` feature is enabled;
/// `lock_wait_nanos` additionally needs `lock-timing`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShardOps {
    /// Lookups that found their key. Misses are not counted.
    pub hits: u64,
    /// Sets that created a key. Overwrites are not counted.
    pub inserts: u64,
    /// Deletes that removed a key. Deleting an absent key is not counted.
    pub removals: u64,
    /// Times the shard lock was taken, in either mode.
    pub lock_acquisitions: u64,
    /// Total time spent waiting for the shard lock, in nanoseconds.
    pub lock_wait_nanos: u64,
}

/// Live counters kept inside a shard. Zero-sized without `metrics`.
#[derive(Default)]
pub(crate) struct ShardCounters {
    #[cfg(feature = "metrics")]
    hits: AtomicU64,
    #[cfg(feature = "metrics")]
    inserts: AtomicU64,
    #[cfg(feature = "metrics")]
    removals: AtomicU64,
    #[cfg(feature = "metrics")]
    locks: AtomicU64,
    #[cfg(feature = "lock-timing")]
    waited_nanos: AtomicU64,
}

impl ShardCounters {
    #[inline]
    pub fn hit(&self) {
        #[cfg(feature = "metrics")]
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inserted(&self) {
        #[cfg(feature = "metrics")]
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn removed(&self) {
        #[cfg(feature = "metrics")]
        self.removals.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn lock_taken(&self) {
        #[cfg(feature = "metrics")]
        self.locks.fetch_add(1, Ordering::Relaxed);
    }

    #[cfg(feature = "lock-timing")]
    #[inline]
    pub fn lock_waited(&self, nanos: u64) {
        self.waited_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    #[cfg(feature = "metrics")]
    pub fn load(&self) -> ShardOps {
        ShardOps {
            hits: self.hits.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            lock_acquisitions: self.locks.load(Ordering::Relaxed),
            lock_wait_nanos: self.waited(),
        }
    }

    #[cfg(not(feature = "metrics"))]
    pub fn load(&self) -> ShardOps {
        ShardOps::default()
    }

    #[cfg(all(feature = "metrics", feature = "lock-timing"))]
    fn waited(&self) -> u64 {
        self.waited_nanos.load(Ordering::Relaxed)
    }

    #[cfg(all(feature = "metrics", not(feature = "lock-timing")))]
    fn waited(&self) -> u64 {
        0
    }
}

/// Aggregate statistics for a map.
///
/// Each shard is read under its own lock in turn, so the figures are not an
/// atomic view of the whole map while writers are active.
#[derive(Debug, Clone)]
pub struct Stats {
    /// Total number of entries across all shards.
    pub size: usize,
    /// Number of entries in each shard.
    pub shard_sizes: Vec<usize>,
    /// Operation counts for each shard.
    pub operations: Vec<ShardOps>,
}

impl Stats {
    /// Average number of entries per shard.
    pub fn avg_load_per_shard(&self) -> f64 {
        if self.shard_sizes.is_empty() {
            return 0.0;
        }
        self.size as f64 / self.shard_sizes.len() as f64
    }

    /// Ratio of the fullest shard to the average load. `0.0` for an empty map.
    pub fn max_load_ratio(&self) -> f64 {
        let avg = self.avg_load_per_shard();
        if avg == 0.0 {
            return 0.0;
        }
        let max = self.shard_sizes.iter().copied().max().unwrap_or(0);
        max as f64 / avg
    }
}
