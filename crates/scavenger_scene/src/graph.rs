//! # Scene-Graph Capability Traits
//!
//! The minimal surface a host scene graph must expose for its nodes to
//! be poolable. Implementations live in the embedding engine; this crate
//! only ever calls through these traits.

use scavenger_core::Reusable;

/// A poolable object living in a host scene graph.
///
/// The pool drives the full lifecycle through this trait: rent attaches
/// the node to the caller's parent and activates it, return deactivates
/// it and attaches it to the pool's holding parent, and eviction (cap
/// overflow, trims, pool drop) destroys it.
pub trait SceneNode: Reusable {
    /// Handle type for a position in the host graph a node can hang
    /// under.
    type Parent;

    /// Re-parents the node under `parent` in the host graph.
    fn attach(&mut self, parent: &Self::Parent);

    /// Toggles the node's participation in the host graph. A parked
    /// node is inactive; a rented one is active.
    fn set_active(&mut self, active: bool);

    /// Releases the node's resources in the host graph. Consumes the
    /// node; a destroyed node is unreachable afterwards.
    fn destroy(self);
}

/// Produces fresh nodes when the pool has none parked.
///
/// The factory owns whatever template or archetype the host graph
/// instantiates from; the pool only asks it for new nodes on a miss.
pub trait NodeFactory {
    /// The node type this factory produces.
    type Node: SceneNode;

    /// Instantiates a fresh node already attached under `parent` and
    /// active.
    fn instantiate(
        &mut self,
        parent: &<Self::Node as SceneNode>::Parent,
    ) -> Self::Node;
}
