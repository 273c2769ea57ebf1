//! # SCAVENGER Scene
//!
//! Pooling for objects that live in a host scene graph. Destroying and
//! re-instantiating graph nodes is the expensive path in most engines,
//! so the pool parks returned nodes deactivated under a holding parent
//! and revives them on the next rent.
//!
//! The host graph never appears as a dependency: attach, activation and
//! destruction are capability traits the embedding engine implements.
//!
//! ## Example
//!
//! ```rust,ignore
//! use scavenger_scene::{NodePool, NodeFactory};
//!
//! let mut pool = NodePool::new(factory, holding_parent, 16);
//! let node = pool.rent(&battlefield); // revived or freshly instantiated
//! pool.return_node(node);             // deactivated, parked, reusable
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

mod graph;
mod node_pool;

pub use graph::{NodeFactory, SceneNode};
pub use node_pool::NodePool;
pub use scavenger_core::Reusable;
