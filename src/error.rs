/// Errors returned while configuring a [`ConcurrentHashMap`](crate::ConcurrentHashMap).
///
/// Map operations themselves never fail: lookups return `Option` and
/// deleting an absent key is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The shard count is zero.
    #[error("shard count must be greater than 0")]
    InvalidShardCount,
}
