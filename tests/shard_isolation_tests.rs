use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use segmap::{ConcurrentHashMap, ConcurrentHashMapBuilder};

#[test]
fn test_shard_isolation() {
    let map = ConcurrentHashMap::new(4, 0);

    for i in 0..100 {
        map.set(format!("key_{}", i), i);
    }

    let stats = map.stats();
    assert_eq!(stats.shard_sizes.len(), 4);

    let total: usize = stats.shard_sizes.iter().sum();
    assert_eq!(total, 100);

    // Every key sits in the shard the router picks for it
    let mut expected = vec![0usize; 4];
    for i in 0..100 {
        expected[map.shard_index(format!("key_{}", i).as_str())] += 1;
    }
    assert_eq!(expected, stats.shard_sizes);
}

#[test]
fn test_routing_is_deterministic() {
    let map = ConcurrentHashMap::<String, i32>::new(8, 0);

    for i in 0..100 {
        let key = format!("key_{}", i);
        let first = map.shard_index(key.as_str());
        for _ in 0..10 {
            assert_eq!(map.shard_index(key.as_str()), first);
        }
        // Mutations don't move a key
        map.set(key.clone(), i);
        assert_eq!(map.shard_index(key.as_str()), first);
        map.delete(key.as_str());
        assert_eq!(map.shard_index(key.as_str()), first);
    }
}

#[test]
fn test_same_config_same_assignment() {
    let map1 = ConcurrentHashMapBuilder::new()
        .shard_count(8)
        .unwrap()
        .seed(99)
        .build::<String, i32>()
        .unwrap();

    let map2 = ConcurrentHashMapBuilder::new()
        .shard_count(8)
        .unwrap()
        .seed(99)
        .build::<String, i32>()
        .unwrap();

    for i in 0..50 {
        let key = format!("key_{}", i);
        map1.set(key.clone(), i);
        map2.set(key, i);
    }

    assert_eq!(map1.shard_loads(), map2.shard_loads());
}

#[test]
fn test_shard_distribution() {
    let map = ConcurrentHashMap::new(16, 1000);

    for i in 0..1000 {
        map.set(format!("key_{}", i), i);
    }

    let stats = map.stats();

    // With 1000 keys and 16 shards, we expect ~62-63 keys per shard
    let max_shard_size = *stats.shard_sizes.iter().max().unwrap();
    let min_shard_size = *stats.shard_sizes.iter().min().unwrap();
    assert!(
        max_shard_size < 100,
        "Shard distribution too uneven (max: {})",
        max_shard_size
    );
    assert!(
        min_shard_size > 30,
        "Shard distribution too uneven (min: {})",
        min_shard_size
    );
}

#[test]
fn test_random_keys_balance() {
    const KEYS: usize = 20_000;
    const SHARDS: usize = 8;

    let map = ConcurrentHashMap::new(SHARDS, KEYS);
    let mut rng = thread_rng();
    while map.len() < KEYS {
        let key: String = (&mut rng).sample_iter(&Alphanumeric).take(16).map(char::from).collect();
        map.set(key, ());
    }

    // Expected 2500 per shard with a standard deviation of ~47
    let expected = KEYS / SHARDS;
    for (shard, load) in map.shard_loads().into_iter().enumerate() {
        assert!(
            load.abs_diff(expected) < expected / 5,
            "shard {} holds {} keys, expected about {}",
            shard,
            load,
            expected
        );
    }
}
