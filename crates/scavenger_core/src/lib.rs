//! # SCAVENGER Core
//!
//! A resource-reuse layer: pools that hand out and reclaim arrays and
//! opaque instances without per-use allocation, plus the two growable
//! containers the pools are modeled after.
//!
//! ## Architecture Rules
//!
//! 1. **No allocation on the reuse path** - a pool hit moves an existing
//!    allocation, never creates one
//! 2. **Single-owner access** - no internal locking; callers serialize
//!    access if a pool is ever shared across threads
//! 3. **Total ownership transfer** - renting removes an item from the
//!    pool, returning hands it back; nothing is reachable twice
//!
//! ## Example
//!
//! ```rust,ignore
//! use scavenger_core::ArrayPool;
//!
//! let pool: ArrayPool<u8> = ArrayPool::new();
//! let scratch = pool.rent_scoped(1024)?;
//! // scratch derefs to [u8]; it returns itself to the pool on scope exit
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod clock;
pub mod container;
pub mod error;
pub mod growth;
pub mod pool;

pub use clock::{Clock, ManualClock, MonotonicClock, Tick};
pub use container::{ByteStream, SeekOrigin, SegmentList};
pub use error::{MemoryError, MemoryResult};
pub use pool::{
    ArrayPool, ArrayPoolConfig, ArrayView, InstancePool, InstancePoolConfig, PoolRegistry,
    PoolSettings, RentedArray, RentedInstance, ReusePolicy, Reusable,
};
