use crate::config::HashFunction;
use std::hash::{BuildHasher, Hash, Hasher};

// Fixed mixing constants so that a single user seed expands into the four
// ahash keys deterministically.
const SEED_MIX: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Seeded hash function used for shard assignment.
/// Uses an enum to avoid trait object limitations with generics.
#[derive(Clone)]
pub(crate) enum ShardHasher {
    /// AHash with fixed keys derived from the seed (default).
    AHash(ahash::RandomState),
    /// FxHash with the seed fed into the hasher before the key.
    #[cfg(feature = "fxhash")]
    FxHash(u64),
}

impl ShardHasher {
    /// Build a hasher for `hash_fn`. The same `(hash_fn, seed)` pair always
    /// produces the same hashes for the lifetime of the process.
    pub fn new(hash_fn: HashFunction, seed: u64) -> Self {
        match hash_fn {
            HashFunction::AHash => ShardHasher::AHash(ahash::RandomState::with_seeds(
                seed ^ SEED_MIX[0],
                seed ^ SEED_MIX[1],
                seed ^ SEED_MIX[2],
                seed ^ SEED_MIX[3],
            )),
            #[cfg(feature = "fxhash")]
            HashFunction::FxHash => ShardHasher::FxHash(seed),
        }
    }

    /// Hash a key to determine which shard it belongs to.
    pub fn hash_key<Q: Hash + ?Sized>(&self, key: &Q) -> u64 {
        match self {
            ShardHasher::AHash(state) => {
                let mut hasher = state.build_hasher();
                key.hash(&mut hasher);
                hasher.finish()
            }
            #[cfg(feature = "fxhash")]
            ShardHasher::FxHash(seed) => {
                let mut hasher = fxhash::FxHasher64::default();
                hasher.write_u64(*seed);
                key.hash(&mut hasher);
                hasher.finish()
            }
        }
    }
}

impl Default for ShardHasher {
    fn default() -> Self {
        ShardHasher::new(HashFunction::AHash, 0)
    }
}

/// Maps keys to shard indices in `[0, shard_count)`.
///
/// Routing is a pure function of the key, the hash function and its seed,
/// all of which are fixed when the router is built.
#[derive(Clone)]
pub(crate) struct Router {
    hasher: ShardHasher,
    shard_count: usize,
}

impl Router {
    /// Create a router over `shard_count` shards. `shard_count` must be
    /// non-zero; the map validates this before building its router.
    pub fn new(hasher: ShardHasher, shard_count: usize) -> Self {
        debug_assert!(shard_count > 0);
        Self {
            hasher,
            shard_count,
        }
    }

    /// Shard index for `key`.
    #[inline]
    pub fn route<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        // The hash is unsigned, so the remainder is always a valid index.
        (self.hasher.hash_key(key) % self.shard_count as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_is_stable() {
        let router = Router::new(ShardHasher::default(), 8);
        for i in 0..200 {
            let key = format!("key_{}", i);
            let first = router.route(key.as_str());
            assert!(first < 8);
            for _ in 0..5 {
                assert_eq!(router.route(key.as_str()), first);
            }
        }
    }

    #[test]
    fn test_borrowed_and_owned_keys_agree() {
        let router = Router::new(ShardHasher::default(), 13);
        let owned = String::from("shared");
        assert_eq!(router.route(&owned), router.route("shared"));
    }

    #[test]
    fn test_same_seed_same_hash() {
        let a = ShardHasher::new(HashFunction::AHash, 42);
        let b = ShardHasher::new(HashFunction::AHash, 42);
        assert_eq!(a.hash_key("abc"), b.hash_key("abc"));
    }

    #[test]
    fn test_seed_changes_hash() {
        let a = ShardHasher::new(HashFunction::AHash, 1);
        let b = ShardHasher::new(HashFunction::AHash, 2);
        let differing = (0..32)
            .map(|i| format!("k{}", i))
            .filter(|k| a.hash_key(k.as_str()) != b.hash_key(k.as_str()))
            .count();
        assert!(differing > 0);
    }

    #[test]
    fn test_single_shard_routes_everything_to_zero() {
        let router = Router::new(ShardHasher::default(), 1);
        for i in 0..50u32 {
            assert_eq!(router.route(&i), 0);
        }
    }

    #[cfg(feature = "fxhash")]
    #[test]
    fn test_fxhash_routes_in_range() {
        let router = Router::new(ShardHasher::new(HashFunction::FxHash, 7), 6);
        for i in 0..100u64 {
            assert!(router.route(&i) < 6);
        }
    }
}
