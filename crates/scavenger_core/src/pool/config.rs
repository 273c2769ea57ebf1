//! # Pool Configuration
//!
//! Serde-backed settings for the pools, loadable once at startup from a
//! TOML file. All caps use `0` to mean unlimited.

use serde::{Deserialize, Serialize};

use crate::error::{MemoryError, MemoryResult};

/// Which buckets an array rent may be served from.
///
/// The historical behavior never serves a rent from the bucket of its
/// own rounded size, only from strictly larger ones, so a returned
/// array is never reused by an equal-sized request. That asymmetry is
/// kept as the default for compatibility; `SameOrLarger` is the
/// corrected policy, opt-in rather than silently applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReusePolicy {
    /// Serve only from buckets strictly larger than the rounded request.
    #[default]
    LargerOnly,
    /// Serve from the rounded size's own bucket as well.
    SameOrLarger,
}

/// Settings for [`ArrayPool`](super::ArrayPool).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayPoolConfig {
    /// Hard cap on arrays cached across all buckets. `0` = unlimited.
    pub max_cached_arrays: usize,
    /// Hard cap on arrays cached per exact length. `0` = unlimited.
    pub max_cached_per_length: usize,
    /// Bucket matching policy.
    pub reuse: ReusePolicy,
}

/// Settings for [`InstancePool`](super::InstancePool).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstancePoolConfig {
    /// Most instances kept in the store; returns past the cap are
    /// dropped. `0` = unlimited.
    pub max_cached_instances: usize,
}

impl Default for InstancePoolConfig {
    /// Defaults to a bounded store of 32 so a default-constructed pool
    /// actually pools without growing without bound.
    fn default() -> Self {
        Self {
            max_cached_instances: 32,
        }
    }
}

/// Aggregated pool settings, usually deserialized from one TOML file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Array pool settings.
    pub arrays: ArrayPoolConfig,
    /// Instance pool settings.
    pub instances: InstancePoolConfig,
}

impl PoolSettings {
    /// Parses settings from a TOML document. Missing keys fall back to
    /// defaults.
    ///
    /// # Errors
    ///
    /// [`MemoryError::InvalidConfig`] when the document does not parse.
    pub fn from_toml_str(raw: &str) -> MemoryResult<Self> {
        toml::from_str(raw).map_err(|err| MemoryError::InvalidConfig(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PoolSettings::default();
        assert_eq!(settings.arrays.max_cached_arrays, 0);
        assert_eq!(settings.arrays.max_cached_per_length, 0);
        assert_eq!(settings.arrays.reuse, ReusePolicy::LargerOnly);
        assert_eq!(settings.instances.max_cached_instances, 32);
    }

    #[test]
    fn test_parse_partial_toml() {
        let settings = PoolSettings::from_toml_str(
            r#"
            [arrays]
            max_cached_per_length = 4
            reuse = "same_or_larger"

            [instances]
            max_cached_instances = 2
            "#,
        )
        .unwrap();
        assert_eq!(settings.arrays.max_cached_arrays, 0);
        assert_eq!(settings.arrays.max_cached_per_length, 4);
        assert_eq!(settings.arrays.reuse, ReusePolicy::SameOrLarger);
        assert_eq!(settings.instances.max_cached_instances, 2);
    }

    #[test]
    fn test_parse_garbage_is_invalid_config() {
        assert!(matches!(
            PoolSettings::from_toml_str("arrays = \"not a table\""),
            Err(MemoryError::InvalidConfig(_))
        ));
    }
}
