//! # Pools
//!
//! The resource-reuse layer proper. A caller rents from whichever pool
//! fits its need; on return the pool either stores the item, stamped
//! with the moment it came back, or discards it when full. Age-based
//! sweeps prune items unused since before a cutoff, independent of
//! rent/return traffic.
//!
//! ## Design Philosophy
//!
//! - Renting transfers exclusive ownership out of the pool; returning
//!   transfers it back. An item is never reachable twice.
//! - Pools use single-threaded interior mutability (`RefCell`) so
//!   scoped guards can coexist; there is no locking.
//! - No hidden globals: the one-shared-pool-per-type convenience is an
//!   explicit, caller-owned [`PoolRegistry`].

mod array;
mod config;
mod instance;
mod registry;

pub use array::{ArrayPool, ArrayView, RentedArray};
pub use config::{ArrayPoolConfig, InstancePoolConfig, PoolSettings, ReusePolicy};
pub use instance::{InstancePool, RentedInstance, Reusable};
pub use registry::PoolRegistry;
