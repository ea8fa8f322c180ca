//! # segmap
//!
//! A segmented concurrent hash map for in-process caches and shared lookup
//! tables.
//!
//! The map is split into a fixed number of shards, each a hash table behind
//! its own reader-writer lock. A key is hashed with a seeded hasher to pick
//! its shard, and every operation locks only that shard, so work on different
//! shards never contends. Values are stored behind `Arc<T>` so reads don't
//! copy them.
//!
//! ## Example
//!
//! ```rust
//! use segmap::ConcurrentHashMap;
//!
//! let map = ConcurrentHashMap::new(8, 1000);
//!
//! map.set("key1".to_string(), "value1");
//! map.set("key2".to_string(), "value2");
//!
//! if let Some(value) = map.get("key1") {
//!     println!("Found: {}", *value);
//! }
//!
//! map.delete("key2");
//! assert!(map.get("key2").is_none());
//!
//! // Keys are captured up front, values are read as you go.
//! for entry in map.iter_snapshot() {
//!     println!("{}: {:?}", entry.key, entry.value);
//! }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use segmap::{ConcurrentHashMapBuilder, HashFunction};
//!
//! let map = ConcurrentHashMapBuilder::new()
//!     .shard_count(32)?
//!     .capacity(10_000)
//!     .hash_function(HashFunction::AHash)
//!     .seed(0x5eed)
//!     .build::<String, i32>()?;
//! # Ok::<(), segmap::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

/// Configuration and builder types.
pub mod config;
/// Error types.
pub mod error;
/// Shard routing.
mod hash;
/// Snapshot iterator.
pub mod iter;
/// The concurrent map.
pub mod map;
mod shard;
/// Statistics collection.
pub mod stats;

pub use config::{Config, ConcurrentHashMapBuilder, HashFunction};
pub use error::Error;
pub use iter::{Entry, SnapshotIter};
pub use map::ConcurrentHashMap;
pub use stats::{ShardOps, Stats};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let map = ConcurrentHashMap::new(8, 1000);

        map.set("key1".to_string(), "value1");
        assert_eq!(*map.get("key1").unwrap(), "value1");
        assert!(map.get("key2").is_none());

        map.set("key1".to_string(), "value2");
        assert_eq!(*map.get("key1").unwrap(), "value2");

        map.delete("key1");
        assert!(map.get("key1").is_none());

        // Deleting again is a no-op
        map.delete("key1");
        assert!(map.is_empty());
    }

    #[test]
    fn test_iterator_sees_deleted_key_as_absent() {
        let map = ConcurrentHashMap::new(4, 0);
        map.set("x", 1);

        let mut iter = map.iter_snapshot();
        map.delete(&"x");

        let entry = iter.next().unwrap();
        assert_eq!(entry.key, "x");
        assert!(entry.value.is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_stats() {
        let map = ConcurrentHashMap::new(8, 0);
        map.set("key1", "value1");
        map.set("key2", "value2");

        let stats = map.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.shard_sizes.len(), 8);
    }

    #[test]
    fn test_builder() {
        let map = ConcurrentHashMapBuilder::new()
            .shard_count(8)
            .unwrap()
            .build::<String, i32>()
            .unwrap();

        map.set("test".to_string(), 42);
        assert_eq!(*map.get("test").unwrap(), 42);
    }

    #[test]
    #[should_panic(expected = "shard count must be greater than 0")]
    fn test_zero_shards_panics() {
        let _ = ConcurrentHashMap::<String, i32>::new(0, 100);
    }

    #[test]
    fn test_zero_shards_config_error() {
        assert_eq!(
            Config::new().shard_count(0).unwrap_err(),
            Error::InvalidShardCount
        );
    }
}
