//! # Node Pool
//!
//! Keeps returned scene-graph nodes alive but parked: deactivated and
//! re-parented under a holding parent, ready to be revived by the next
//! rent instead of instantiating from scratch. Evicted nodes are
//! destroyed in the host graph, never leaked.

use scavenger_core::{Clock, MonotonicClock, Reusable, Tick};

use crate::graph::{NodeFactory, SceneNode};

/// A pool of scene-graph nodes behind one factory.
///
/// Rent revives the most-recently-parked node (attach to the caller's
/// parent, activate) or instantiates a fresh one through the factory.
/// Return deactivates the node and parks it under the holding parent
/// while the store is below `cache_limit`; past the limit the node is
/// destroyed.
///
/// Dropping the pool destroys every parked node.
///
/// # Thread Safety
///
/// NOT thread-safe. Single owner, or external serialization.
pub struct NodePool<F: NodeFactory, C: Clock = MonotonicClock> {
    factory: F,
    holding: <F::Node as SceneNode>::Parent,
    cache_limit: usize,
    store: Vec<(F::Node, Tick)>,
    clock: C,
}

impl<F: NodeFactory> NodePool<F> {
    /// Creates a pool with a monotonic clock. `holding` is where parked
    /// nodes hang in the host graph; `cache_limit` caps the store, with
    /// `0` meaning unlimited.
    #[must_use]
    pub fn new(
        factory: F,
        holding: <F::Node as SceneNode>::Parent,
        cache_limit: usize,
    ) -> Self {
        Self::with_clock(factory, holding, cache_limit, MonotonicClock::new())
    }
}

impl<F: NodeFactory, C: Clock> NodePool<F, C> {
    /// Creates a pool with an explicit clock. Sweep cutoffs must come
    /// from the same clock.
    #[must_use]
    pub fn with_clock(
        factory: F,
        holding: <F::Node as SceneNode>::Parent,
        cache_limit: usize,
        clock: C,
    ) -> Self {
        Self {
            factory,
            holding,
            cache_limit,
            store: Vec::new(),
            clock,
        }
    }

    /// Rents a node attached under `parent` and active: the most-
    /// recently-parked one if the store is non-empty, otherwise a fresh
    /// instantiation. Marked not-cached either way.
    pub fn rent(&mut self, parent: &<F::Node as SceneNode>::Parent) -> F::Node {
        let mut node = match self.store.pop() {
            Some((node, _)) => node,
            None => {
                tracing::trace!("node pool miss, instantiating");
                self.factory.instantiate(parent)
            }
        };
        node.set_cached(false);
        node.attach(parent);
        node.set_active(true);
        node
    }

    /// Returns a node. Below the cache limit it is deactivated, parked
    /// under the holding parent and stamped with the current tick; at
    /// the limit it is destroyed in the host graph.
    pub fn return_node(&mut self, mut node: F::Node) {
        if self.cache_limit == 0 || self.store.len() < self.cache_limit {
            node.set_cached(true);
            node.set_active(false);
            node.attach(&self.holding);
            self.store.push((node, self.clock.now()));
        } else {
            tracing::trace!(cached = self.store.len(), "node pool at capacity, destroying");
            node.destroy();
        }
    }

    /// Destroys every parked node and releases excess backing storage.
    pub fn trim(&mut self) {
        for (node, _) in self.store.drain(..) {
            node.destroy();
        }
        self.store.shrink_to_fit();
    }

    /// Destroys exactly the nodes parked before `cutoff`. Stamps are
    /// non-decreasing from the oldest entry, so the sweep is one split.
    pub fn trim_older_than(&mut self, cutoff: Tick) {
        let keep_from = self
            .store
            .partition_point(|(_, returned_at)| *returned_at < cutoff);
        if keep_from > 0 {
            for (node, _) in self.store.drain(..keep_from) {
                node.destroy();
            }
            self.store.shrink_to_fit();
            tracing::debug!(swept = keep_from, "node pool age sweep");
        }
    }

    /// The clock this pool stamps returns with. Sweep cutoffs must be
    /// produced by this clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Nodes currently parked.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.store.len()
    }
}

impl<F: NodeFactory, C: Clock> Drop for NodePool<F, C> {
    fn drop(&mut self) {
        for (node, _) in self.store.drain(..) {
            node.destroy();
        }
    }
}
