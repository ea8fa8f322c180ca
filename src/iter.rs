use crate::map::ConcurrentHashMap;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::sync::Arc;

/// A key read out of the map together with its value at the time it was
/// visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    /// Key captured when the iterator was created.
    pub key: K,
    /// Value looked up when the entry was yielded. `None` if the key was
    /// removed after the snapshot was taken.
    pub value: Option<Arc<V>>,
}

/// Iterator over a key snapshot with live value lookups.
///
/// Keys are captured per shard when the iterator is created. Each call to
/// `next` looks the key up in the map again, so values written after the
/// snapshot are visible for keys not yet visited, and keys deleted after the
/// snapshot are still yielded with `value: None`. Keys inserted after the
/// snapshot are never yielded.
///
/// Entries come out shard by shard in ascending shard index; the order within
/// a shard is unspecified. Once exhausted the iterator keeps returning `None`.
pub struct SnapshotIter<'a, K, V> {
    map: &'a ConcurrentHashMap<K, V>,
    keys: Vec<std::vec::IntoIter<K>>,
    shard: usize,
}

impl<'a, K, V> SnapshotIter<'a, K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    pub(crate) fn new(map: &'a ConcurrentHashMap<K, V>, keys: Vec<Vec<K>>) -> Self {
        log::trace!(
            "captured snapshot: shards={}, keys={}",
            keys.len(),
            keys.iter().map(Vec::len).sum::<usize>()
        );
        Self {
            map,
            keys: keys.into_iter().map(Vec::into_iter).collect(),
            shard: 0,
        }
    }
}

impl<'a, K, V> Iterator for SnapshotIter<'a, K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    type Item = Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(row) = self.keys.get_mut(self.shard) {
            if let Some(key) = row.next() {
                let value = self.map.get(&key);
                return Some(Entry { key, value });
            }
            self.shard += 1;
            if self.shard == self.keys.len() {
                log::trace!("snapshot iterator exhausted");
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .keys
            .iter()
            .skip(self.shard)
            .map(ExactSizeIterator::len)
            .sum();
        (remaining, Some(remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for SnapshotIter<'a, K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
}

impl<'a, K, V> FusedIterator for SnapshotIter<'a, K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
}
