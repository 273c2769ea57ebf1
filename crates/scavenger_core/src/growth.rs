//! # Growth Strategy
//!
//! The shared capacity rules: 1.5x growth with a floor and ceiling for
//! the containers, and power-of-two rounding for array pool buckets.

use crate::error::{MemoryError, MemoryResult};

/// Smallest capacity any container allocates.
pub const MIN_CAPACITY: usize = 4;

/// Largest capacity any container may reach (the platform's maximum
/// addressable length).
pub const MAX_CAPACITY: usize = isize::MAX as usize;

/// Smallest array pool bucket size.
pub const MIN_BUCKET: usize = 8;

/// Largest array pool bucket size. Rent requests that round above this
/// fail with [`MemoryError::CapacityExceeded`].
pub const MAX_BUCKET: usize = 1 << 30;

/// Computes the next capacity for storage that must hold `requested`
/// elements: 1.5x the requirement, clamped to the floor and ceiling.
///
/// Applied once per batch operation, not per element, so repeated
/// appends stay amortized.
#[must_use]
pub fn grow_capacity(requested: usize) -> usize {
    (requested.saturating_mul(3) / 2).clamp(MIN_CAPACITY, MAX_CAPACITY)
}

/// Rounds a requested minimum array size up to the nearest supported
/// power-of-two bucket size.
///
/// # Errors
///
/// [`MemoryError::CapacityExceeded`] when the request is larger than
/// [`MAX_BUCKET`].
pub fn round_up_bucket(minimum: usize) -> MemoryResult<usize> {
    if minimum > MAX_BUCKET {
        return Err(MemoryError::CapacityExceeded {
            requested: minimum,
            max: MAX_BUCKET,
        });
    }
    Ok(minimum.next_power_of_two().max(MIN_BUCKET))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_capacity_is_one_and_a_half() {
        assert_eq!(grow_capacity(100), 150);
        assert_eq!(grow_capacity(8), 12);
    }

    #[test]
    fn test_grow_capacity_floor() {
        assert_eq!(grow_capacity(0), MIN_CAPACITY);
        assert_eq!(grow_capacity(1), MIN_CAPACITY);
        assert_eq!(grow_capacity(2), MIN_CAPACITY);
    }

    #[test]
    fn test_grow_capacity_saturates_at_ceiling() {
        assert_eq!(grow_capacity(usize::MAX), MAX_CAPACITY);
    }

    #[test]
    fn test_round_up_bucket_floor() {
        assert_eq!(round_up_bucket(0).unwrap(), MIN_BUCKET);
        assert_eq!(round_up_bucket(1).unwrap(), MIN_BUCKET);
        assert_eq!(round_up_bucket(8).unwrap(), 8);
    }

    #[test]
    fn test_round_up_bucket_rounds_to_power_of_two() {
        assert_eq!(round_up_bucket(9).unwrap(), 16);
        assert_eq!(round_up_bucket(16).unwrap(), 16);
        assert_eq!(round_up_bucket(1000).unwrap(), 1024);
    }

    #[test]
    fn test_round_up_bucket_rejects_above_cap() {
        assert_eq!(round_up_bucket(MAX_BUCKET).unwrap(), MAX_BUCKET);
        assert!(matches!(
            round_up_bucket(MAX_BUCKET + 1),
            Err(MemoryError::CapacityExceeded { .. })
        ));
    }
}
