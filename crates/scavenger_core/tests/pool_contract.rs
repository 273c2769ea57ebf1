//! # Pool Contract Test
//!
//! End-to-end checks of the rent/return/trim contract across the whole
//! public surface: bucket exclusivity, ownership disjointness, age-sweep
//! exactness and the container round trips the pools rely on.

use scavenger_core::pool::{
    ArrayPool, ArrayPoolConfig, InstancePool, InstancePoolConfig, PoolSettings, Reusable,
    ReusePolicy,
};
use scavenger_core::{ByteStream, ManualClock, MemoryResult, SeekOrigin, SegmentList, Tick};

#[derive(Default)]
struct Packet {
    cached: bool,
    sequence: u64,
}

impl Reusable for Packet {
    fn set_cached(&mut self, cached: bool) {
        self.cached = cached;
    }

    fn is_cached(&self) -> bool {
        self.cached
    }
}

/// A cached 16-length array is invisible to any rent that rounds to 16,
/// and visible to rents that round to 8 or less.
#[test]
fn test_bucket_exclusivity_scenario() {
    let pool: ArrayPool<u8> = ArrayPool::new();

    let original = pool.rent(16).unwrap();
    let original_ptr = original.as_ptr();
    pool.return_array(original);

    for minimum in [9, 10, 16] {
        let fresh = pool.rent(minimum).unwrap();
        assert_eq!(fresh.len(), 16, "rounding of {minimum} must be 16");
        assert_ne!(
            fresh.as_ptr(),
            original_ptr,
            "rent({minimum}) must not reuse its own bucket"
        );
    }
    assert_eq!(pool.cached_count(), 1, "the cached array never left");

    // Rounds to 8: 16 is strictly greater, so reuse happens
    let reused = pool.rent(6).unwrap();
    assert_eq!(reused.as_ptr(), original_ptr);
    assert_eq!(pool.cached_count(), 0);
}

/// No item identity is ever reachable by two rents at once.
#[test]
fn test_outstanding_and_stored_identities_are_disjoint() {
    let pool: ArrayPool<u64> = ArrayPool::new();
    for _ in 0..4 {
        pool.return_array(pool.rent(32).unwrap());
    }

    let mut rented: Vec<Box<[u64]>> = Vec::new();
    for _ in 0..8 {
        rented.push(pool.rent(16).unwrap());
    }
    let mut pointers: Vec<*const u64> = rented.iter().map(|a| a.as_ptr()).collect();
    pointers.sort_unstable();
    pointers.dedup();
    assert_eq!(pointers.len(), 8);
}

/// Sweeps remove exactly the entries older than the cutoff, for an
/// arbitrary interleaving of prior returns.
#[test]
fn test_age_sweep_exactness_under_interleaving() {
    let pool: ArrayPool<u8, ManualClock> =
        ArrayPool::with_parts(ArrayPoolConfig::default(), ManualClock::new());

    // Interleave returns across three bucket sizes at ticks 1..=9
    for step in 1..=9u64 {
        pool.clock().advance(1);
        let minimum = match step % 3 {
            0 => 8,
            1 => 16,
            _ => 32,
        };
        pool.return_array(pool.rent(minimum).unwrap());
    }
    assert_eq!(pool.cached_count(), 9);

    pool.trim_older_than(Tick::from_nanos(5));
    assert_eq!(pool.cached_count(), 5, "stamps 5..=9 survive");

    pool.trim_older_than(Tick::from_nanos(10));
    assert_eq!(pool.cached_count(), 0);
    assert_eq!(pool.bucket_count(), 0);
}

/// A cap of two stores exactly two; the third return is gone for good.
#[test]
fn test_instance_cap_two_drops_third() {
    let pool: InstancePool<Packet> = InstancePool::with_config(InstancePoolConfig {
        max_cached_instances: 2,
    });

    let mut outstanding: Vec<Packet> = (1..=3)
        .map(|sequence| {
            let mut packet = pool.rent();
            packet.sequence = sequence;
            packet
        })
        .collect();
    for packet in outstanding.drain(..) {
        pool.return_item(packet);
    }
    assert_eq!(pool.cached_count(), 2);

    // Only sequences 1 and 2 are retrievable; the third return (3)
    // arrived when the store was full and was dropped
    let sequences = [pool.rent().sequence, pool.rent().sequence];
    assert_eq!(sequences, [2, 1]);
    assert_eq!(pool.rent().sequence, 0, "store exhausted, fresh default");
}

/// The scoped guard returns its array on early exits and on error paths.
#[test]
fn test_scoped_guard_covers_error_paths() {
    let pool: ArrayPool<u8> = ArrayPool::new();

    fn faulty(pool: &ArrayPool<u8>) -> MemoryResult<()> {
        let _scratch = pool.rent_scoped(64)?;
        // An unrelated failure propagates while the guard is live
        pool.rent((1 << 30) + 1)?;
        Ok(())
    }

    assert!(faulty(&pool).is_err());
    assert_eq!(pool.cached_count(), 1, "guard returned despite the error");
}

/// Settings parsed from TOML drive real pool behavior.
#[test]
#[allow(dangling_pointers_from_temporaries)]
fn test_toml_settings_drive_pools() {
    let settings = PoolSettings::from_toml_str(
        r#"
        [arrays]
        reuse = "same_or_larger"
        "#,
    )
    .unwrap();
    assert_eq!(settings.arrays.reuse, ReusePolicy::SameOrLarger);

    let pool: ArrayPool<u8> = ArrayPool::with_config(settings.arrays);
    let returned = pool.rent(16).unwrap();
    let ptr = returned.as_ptr();
    pool.return_array(returned);
    assert_eq!(pool.rent(16).unwrap().as_ptr(), ptr);
}

/// Sequence contract: n inserts undone in reverse restore emptiness, and
/// a range insert reads back through a zero-copy segment.
#[test]
fn test_sequence_round_trip() {
    let mut list: SegmentList<u16> = SegmentList::new();
    for i in 0..64 {
        list.insert(list.len(), i);
    }
    for i in (0..64).rev() {
        list.remove_at(i).unwrap();
    }
    assert!(list.is_empty());

    let payload: Vec<u16> = (100..120).collect();
    list.insert_range(0, &payload);
    assert_eq!(list.as_segment(0, payload.len()), payload.as_slice());
}

/// Stream contract: write, seek to begin, read back; then compact away a
/// consumed prefix and read the remainder.
#[test]
fn test_stream_round_trip_and_compaction() {
    let data: Vec<u8> = (0..=255).cycle().take(10_000).collect();
    let mut stream = ByteStream::with_capacity(64);
    stream.write(&data, 0, data.len()).unwrap();

    stream.seek(0, SeekOrigin::Begin);
    let mut out = vec![0u8; data.len()];
    assert_eq!(stream.read(&mut out, 0, data.len()).unwrap(), data.len());
    assert_eq!(out, data);

    // Read 1000 back, compact, expect the trailing 9000
    stream.seek(0, SeekOrigin::Begin);
    let mut prefix = vec![0u8; 1000];
    stream.read(&mut prefix, 0, 1000).unwrap();
    stream.compact_unread(stream.position());
    assert_eq!(stream.len(), 9000);

    stream.seek(0, SeekOrigin::Begin);
    let mut rest = vec![0u8; 9000];
    assert_eq!(stream.read(&mut rest, 0, 9000).unwrap(), 9000);
    assert_eq!(rest.as_slice(), &data[1000..]);
}
