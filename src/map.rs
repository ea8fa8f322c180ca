use crate::config::{Config, ConcurrentHashMapBuilder};
use crate::error::Error;
use crate::hash::{Router, ShardHasher};
use crate::iter::SnapshotIter;
use crate::shard::Shard;
use crate::stats::{ShardOps, Stats};
use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

/// Concurrent hash map split into independently locked shards.
///
/// Each key is routed to exactly one shard, and every operation takes only
/// that shard's reader-writer lock. Operations on different shards never
/// block each other; operations on the same shard allow many readers or one
/// writer. There is no global lock, so there is no ordering between
/// operations on different shards.
///
/// Values are wrapped in `Arc<V>` so reads can hand them out without copying.
///
/// # Example
///
/// ```rust
/// use segmap::ConcurrentHashMap;
///
/// let map = ConcurrentHashMap::new(8, 1000);
/// map.set("key1".to_string(), "value1");
///
/// assert_eq!(*map.get("key1").unwrap(), "value1");
/// assert!(map.get("key2").is_none());
/// ```
pub struct ConcurrentHashMap<K, V> {
    shards: Vec<Shard<K, V>>,
    router: Router,
}

impl<K, V> ConcurrentHashMap<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    /// Create a map with `segment_count` shards, presized for roughly
    /// `capacity` entries in total.
    ///
    /// # Panics
    ///
    /// Panics if `segment_count` is zero. Use [`ConcurrentHashMap::with_config`]
    /// or the builder to get an error instead.
    pub fn new(segment_count: usize, capacity: usize) -> Self {
        let config = Config {
            shard_count: segment_count,
            capacity,
            ..Config::default()
        };
        match Self::with_config(config) {
            Ok(map) => map,
            Err(err) => panic!("{}", err),
        }
    }

    /// Create a map from a [`Config`].
    pub fn with_config(config: Config) -> Result<Self, Error> {
        if config.shard_count == 0 {
            return Err(Error::InvalidShardCount);
        }

        let per_shard = config.capacity_per_shard();
        let shards = (0..config.shard_count)
            .map(|_| Shard::with_capacity(per_shard))
            .collect();
        let router = Router::new(
            ShardHasher::new(config.hash_function, config.seed),
            config.shard_count,
        );

        log::debug!(
            "created concurrent map: shards={}, capacity_per_shard={}, hash={:?}",
            config.shard_count,
            per_shard,
            config.hash_function
        );

        Ok(Self { shards, router })
    }

    /// Start building a map with custom settings.
    pub fn builder() -> ConcurrentHashMapBuilder {
        ConcurrentHashMapBuilder::new()
    }

    /// Index of the shard that owns `key`. Stable for the life of the map.
    #[inline]
    pub fn shard_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.router.route(key)
    }

    /// Number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Insert or overwrite the value stored for `key`.
    ///
    /// Holds the owning shard's write lock for the duration of the mutation.
    pub fn set(&self, key: K, value: V) {
        self.insert(key, value);
    }

    /// Insert or overwrite, returning the previous value if the key existed.
    ///
    /// ```rust
    /// use segmap::ConcurrentHashMap;
    ///
    /// let map = ConcurrentHashMap::new(4, 0);
    /// assert!(map.insert("key", "value").is_none());
    /// assert_eq!(*map.insert("key", "new_value").unwrap(), "value");
    /// ```
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let idx = self.shard_index(&key);
        self.shards[idx].insert(key, value)
    }

    /// Look up `key`. `None` means the key is not present.
    ///
    /// Takes the owning shard's read lock, so concurrent lookups on the same
    /// shard proceed in parallel.
    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.shard_index(key);
        self.shards[idx].get(key)
    }

    /// Remove `key` if present. Removing an absent key is a no-op.
    pub fn delete<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove(key);
    }

    /// Remove `key`, returning its value if it existed.
    ///
    /// ```rust
    /// use segmap::ConcurrentHashMap;
    ///
    /// let map = ConcurrentHashMap::new(4, 0);
    /// map.set("key", "value");
    /// assert_eq!(*map.remove(&"key").unwrap(), "value");
    /// assert!(map.get(&"key").is_none());
    /// ```
    pub fn remove<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.shard_index(key);
        self.shards[idx].remove(key)
    }

    /// Check whether `key` is present without cloning its value.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.shard_index(key);
        self.shards[idx].contains_key(key)
    }

    /// Total number of entries across all shards.
    ///
    /// Shards are counted one at a time, so concurrent writers can make the
    /// result stale by the time it returns.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.len()).sum()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.is_empty())
    }

    /// Number of entries in each shard, indexed by shard.
    pub fn shard_loads(&self) -> Vec<usize> {
        self.shards.iter().map(|shard| shard.len()).collect()
    }

    /// Get detailed statistics about the map and its shards.
    pub fn stats(&self) -> Stats {
        let shard_sizes = self.shard_loads();
        let operations: Vec<ShardOps> = self.shards.iter().map(|s| s.ops()).collect();
        let size = shard_sizes.iter().sum();

        Stats {
            size,
            shard_sizes,
            operations,
        }
    }

    /// Create a snapshot iterator.
    ///
    /// The keys of each shard are copied under that shard's read lock, one
    /// shard at a time, so the snapshot is not atomic across the map. Values
    /// are fetched from the live map as the iterator advances; a key deleted
    /// after the snapshot is yielded with `value: None`.
    ///
    /// ```rust
    /// use segmap::ConcurrentHashMap;
    ///
    /// let map = ConcurrentHashMap::new(8, 0);
    /// map.set("a", 1);
    /// map.set("b", 2);
    ///
    /// let mut entries: Vec<_> = map
    ///     .iter_snapshot()
    ///     .map(|entry| (entry.key, *entry.value.unwrap()))
    ///     .collect();
    /// entries.sort();
    /// assert_eq!(entries, vec![("a", 1), ("b", 2)]);
    /// ```
    pub fn iter_snapshot(&self) -> SnapshotIter<'_, K, V>
    where
        K: Clone,
    {
        let keys: Vec<Vec<K>> = self.shards.iter().map(|shard| shard.keys()).collect();
        SnapshotIter::new(self, keys)
    }
}

impl<K, V> Default for ConcurrentHashMap<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    fn default() -> Self {
        let config = Config::default();
        Self::new(config.shard_count, config.capacity)
    }
}
