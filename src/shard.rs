use crate::stats::{ShardCounters, ShardOps};
use hashbrown::HashMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

/// A single shard containing a HashMap protected by a read-write lock.
///
/// A shard only ever takes its own lock; nothing in the crate holds two shard
/// locks at once.
pub(crate) struct Shard<K, V> {
    map: RwLock<HashMap<K, Arc<V>>>,
    counters: ShardCounters,
}

impl<K, V> Shard<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    /// Create a shard presized for `capacity` entries when that much memory
    /// is available. The hint is best-effort: if the table can't be reserved
    /// the shard starts empty and grows on demand.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut map: HashMap<K, Arc<V>> = HashMap::new();
        if let Err(err) = map.try_reserve(capacity) {
            log::debug!("skipping shard presize to {} entries: {:?}", capacity, err);
        }
        Self {
            map: RwLock::new(map),
            counters: ShardCounters::default(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<K, Arc<V>>> {
        self.counters.lock_taken();
        #[cfg(feature = "lock-timing")]
        let start = std::time::Instant::now();
        let guard = self.map.read();
        #[cfg(feature = "lock-timing")]
        self.counters.lock_waited(start.elapsed().as_nanos() as u64);
        guard
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, Arc<V>>> {
        self.counters.lock_taken();
        #[cfg(feature = "lock-timing")]
        let start = std::time::Instant::now();
        let guard = self.map.write();
        #[cfg(feature = "lock-timing")]
        self.counters.lock_waited(start.elapsed().as_nanos() as u64);
        guard
    }

    /// Insert or overwrite, returning the previous value if any.
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let mut map = self.write();
        let result = map.insert(key, Arc::new(value));
        if result.is_none() {
            self.counters.inserted();
        }
        result
    }

    /// Get a value by key. The lock is released before returning.
    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let map = self.read();
        let result = map.get(key).cloned();
        if result.is_some() {
            self.counters.hit();
        }
        result
    }

    /// Remove a key, returning the value if it existed.
    pub fn remove<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut map = self.write();
        let result = map.remove(key);
        if result.is_some() {
            self.counters.removed();
        }
        result
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy out the keys currently in this shard under a single read lock.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.read().keys().cloned().collect()
    }

    pub fn ops(&self) -> ShardOps {
        self.counters.load()
    }
}
