//! # Instance Pool
//!
//! Pools homogeneous reusable objects (as opposed to raw arrays) with a
//! bounded store. Instances carry a caller-visible cached flag so
//! downstream logic can tell a pooled-origin object from a fresh one.

use std::cell::RefCell;
use std::mem;
use std::ops::{Deref, DerefMut};

use crate::clock::{Clock, MonotonicClock, Tick};
use crate::pool::config::InstancePoolConfig;

/// Contract for objects that can live in an [`InstancePool`].
///
/// The flag belongs to the instance, not the pool: pools set it false on
/// rent and true on return, and never read it back. Implementors should
/// reset any per-use state when the flag flips to `false`.
pub trait Reusable {
    /// Flags whether the instance is currently held by a pool.
    fn set_cached(&mut self, cached: bool);

    /// Whether the instance is currently held by a pool.
    fn is_cached(&self) -> bool;
}

/// A pool of homogeneous reusable instances.
///
/// Rent pops the most-recently-returned instance, or constructs a
/// default one on a miss. Returns past the configured cap are silently
/// dropped and left to the caller's environment to reclaim.
///
/// # Thread Safety
///
/// NOT thread-safe. Single owner, or external serialization.
pub struct InstancePool<T, C: Clock = MonotonicClock> {
    store: RefCell<Vec<(T, Tick)>>,
    config: InstancePoolConfig,
    clock: C,
}

impl<T: Reusable + Default> InstancePool<T> {
    /// Creates a pool with default settings and a monotonic clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(InstancePoolConfig::default())
    }

    /// Creates a pool with the given settings and a monotonic clock.
    #[must_use]
    pub fn with_config(config: InstancePoolConfig) -> Self {
        Self::with_parts(config, MonotonicClock::new())
    }
}

impl<T: Reusable + Default> Default for InstancePool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Reusable + Default, C: Clock> InstancePool<T, C> {
    /// Creates a pool with the given settings and clock. Sweep cutoffs
    /// must come from the same clock.
    #[must_use]
    pub fn with_parts(config: InstancePoolConfig, clock: C) -> Self {
        Self {
            store: RefCell::new(Vec::new()),
            config,
            clock,
        }
    }

    /// Rents an instance: the most-recently-returned one if the store is
    /// non-empty, otherwise a fresh default. Marked not-cached either
    /// way.
    pub fn rent(&self) -> T {
        let mut instance = self
            .store
            .borrow_mut()
            .pop()
            .map_or_else(T::default, |(instance, _)| instance);
        instance.set_cached(false);
        instance
    }

    /// Rents an instance coupled to a guard that returns it when the
    /// guard's scope ends, on every exit path.
    pub fn rent_scoped(&self) -> RentedInstance<'_, T, C> {
        RentedInstance {
            pool: self,
            instance: self.rent(),
            detached: false,
        }
    }

    /// Returns an instance, marking it cached. Stored with the current
    /// tick while the store is below the cap; dropped otherwise.
    pub fn return_item(&self, mut instance: T) {
        instance.set_cached(true);
        let mut store = self.store.borrow_mut();
        let cap = self.config.max_cached_instances;
        if cap == 0 || store.len() < cap {
            store.push((instance, self.clock.now()));
        } else {
            tracing::trace!(cached = store.len(), "pool at capacity, dropping returned instance");
        }
    }

    /// Discards every cached instance and releases excess backing
    /// storage.
    pub fn trim(&self) {
        let mut store = self.store.borrow_mut();
        store.clear();
        store.shrink_to_fit();
    }

    /// Removes exactly the entries returned before `cutoff`; survivors
    /// keep their order and the store releases excess backing storage.
    pub fn trim_older_than(&self, cutoff: Tick) {
        let mut store = self.store.borrow_mut();
        let before = store.len();
        store.retain(|(_, returned_at)| *returned_at >= cutoff);
        if store.len() < before {
            store.shrink_to_fit();
            tracing::debug!(swept = before - store.len(), "instance pool age sweep");
        }
    }

    /// The clock this pool stamps returns with. Sweep cutoffs must be
    /// produced by this clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Instances currently in the store.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.store.borrow().len()
    }
}

/// Guard for a scoped rent: derefs to the instance and returns it to
/// its pool when dropped, on every exit path.
pub struct RentedInstance<'pool, T: Reusable + Default, C: Clock = MonotonicClock> {
    pool: &'pool InstancePool<T, C>,
    instance: T,
    detached: bool,
}

impl<T: Reusable + Default, C: Clock> RentedInstance<'_, T, C> {
    /// Detaches the instance from the guard; it will NOT be returned to
    /// the pool.
    #[must_use]
    pub fn into_inner(mut self) -> T {
        self.detached = true;
        mem::take(&mut self.instance)
    }
}

impl<T: Reusable + Default, C: Clock> Deref for RentedInstance<'_, T, C> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.instance
    }
}

impl<T: Reusable + Default, C: Clock> DerefMut for RentedInstance<'_, T, C> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.instance
    }
}

impl<T: Reusable + Default, C: Clock> Drop for RentedInstance<'_, T, C> {
    fn drop(&mut self) {
        if !self.detached {
            self.pool.return_item(mem::take(&mut self.instance));
        }
    }
}
