//! # Pool Registry
//!
//! The opt-in replacement for hidden global shared pools: a caller-owned
//! registry that lazily creates one pool per element type on first use.
//! Whoever constructs the registry decides its lifetime and teardown
//! order; there is no process-wide state.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::pool::config::PoolSettings;
use crate::pool::{ArrayPool, InstancePool, Reusable};

/// One shared pool per element type, created on first use.
///
/// All pools a registry hands out are built from the settings it was
/// constructed with and run on the default monotonic clock.
///
/// # Thread Safety
///
/// NOT thread-safe, like the pools it owns.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = PoolRegistry::new();
/// let buf = registry.arrays::<u8>().rent(256)?;
/// registry.arrays::<u8>().return_array(buf); // same pool instance
/// ```
pub struct PoolRegistry {
    pools: HashMap<TypeId, Box<dyn Any>>,
    settings: PoolSettings,
}

impl PoolRegistry {
    /// Creates a registry whose pools use default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(PoolSettings::default())
    }

    /// Creates a registry whose pools use the given settings.
    #[must_use]
    pub fn with_settings(settings: PoolSettings) -> Self {
        Self {
            pools: HashMap::new(),
            settings,
        }
    }

    /// The shared array pool for element type `T`, created on first use.
    pub fn arrays<T: Default + 'static>(&mut self) -> &ArrayPool<T> {
        let config = self.settings.arrays;
        let pool = self
            .pools
            .entry(TypeId::of::<ArrayPool<T>>())
            .or_insert_with(|| Box::new(ArrayPool::<T>::with_config(config)));
        match pool.downcast_ref::<ArrayPool<T>>() {
            Some(pool) => pool,
            None => unreachable!("registry entry is keyed by its own pool type"),
        }
    }

    /// The shared instance pool for element type `T`, created on first
    /// use.
    pub fn instances<T: Reusable + Default + 'static>(&mut self) -> &InstancePool<T> {
        let config = self.settings.instances;
        let pool = self
            .pools
            .entry(TypeId::of::<InstancePool<T>>())
            .or_insert_with(|| Box::new(InstancePool::<T>::with_config(config)));
        match pool.downcast_ref::<InstancePool<T>>() {
            Some(pool) => pool,
            None => unreachable!("registry entry is keyed by its own pool type"),
        }
    }

    /// Whether a shared pool for `T` arrays has been created yet.
    #[must_use]
    pub fn has_arrays<T: Default + 'static>(&self) -> bool {
        self.pools.contains_key(&TypeId::of::<ArrayPool<T>>())
    }

    /// Whether a shared instance pool for `T` has been created yet.
    #[must_use]
    pub fn has_instances<T: Reusable + Default + 'static>(&self) -> bool {
        self.pools.contains_key(&TypeId::of::<InstancePool<T>>())
    }

    /// Drops every pool, and with them all cached items.
    pub fn clear(&mut self) {
        self.pools.clear();
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
