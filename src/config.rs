use crate::error::Error;

/// Which hash function to use for shard assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFunction {
    /// Use ahash (default, fast and well-distributed).
    #[default]
    AHash,
    /// Use fxhash (faster but potentially less distributed).
    #[cfg(feature = "fxhash")]
    FxHash,
}

/// Configuration for a [`ConcurrentHashMap`](crate::ConcurrentHashMap).
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) shard_count: usize,
    pub(crate) capacity: usize,
    pub(crate) hash_function: HashFunction,
    pub(crate) seed: u64,
}

impl Config {
    /// Create a new config with defaults (16 shards, no presizing, ahash, seed 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of shards. Must be greater than 0.
    pub fn shard_count(mut self, count: usize) -> Result<Self, Error> {
        if count == 0 {
            return Err(Error::InvalidShardCount);
        }
        self.shard_count = count;
        Ok(self)
    }

    /// Set the expected total number of entries. The hint is split evenly
    /// across shards to presize them; it never limits how many entries fit.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the hash function to use.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.hash_function = hash_fn;
        self
    }

    /// Set the routing seed. Two maps with the same shard count, hash
    /// function and seed route every key to the same shard index.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub(crate) fn capacity_per_shard(&self) -> usize {
        self.capacity / self.shard_count
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shard_count: 16,
            capacity: 0,
            hash_function: HashFunction::AHash,
            seed: 0,
        }
    }
}

/// Builder for creating a [`ConcurrentHashMap`](crate::ConcurrentHashMap)
/// with custom configuration.
///
/// ```rust
/// use segmap::ConcurrentHashMapBuilder;
///
/// let map = ConcurrentHashMapBuilder::new()
///     .shard_count(8)?
///     .capacity(1000)
///     .seed(7)
///     .build::<String, i32>()?;
///
/// map.set("answer".to_string(), 42);
/// assert_eq!(*map.get("answer").unwrap(), 42);
/// # Ok::<(), segmap::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConcurrentHashMapBuilder {
    config: Config,
}

impl ConcurrentHashMapBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the number of shards. Must be greater than 0.
    pub fn shard_count(mut self, count: usize) -> Result<Self, Error> {
        self.config = self.config.shard_count(count)?;
        Ok(self)
    }

    /// Set the expected total number of entries.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.capacity(capacity);
        self
    }

    /// Set the hash function to use.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.config = self.config.hash_function(hash_fn);
        self
    }

    /// Set the routing seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config = self.config.seed(seed);
        self
    }

    /// Build a map with the configured settings.
    pub fn build<K, V>(self) -> Result<crate::ConcurrentHashMap<K, V>, Error>
    where
        K: std::hash::Hash + Eq + Send + Sync,
        V: Send + Sync,
    {
        crate::ConcurrentHashMap::with_config(self.config)
    }
}
