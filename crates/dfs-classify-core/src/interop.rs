//! Conversions from `petgraph` graphs.
//!
//! Vertices are the petgraph `NodeIndex` values. Roots follow node index order
//! and each successor list follows edge-index order. For `DiGraph` that is
//! insertion order; `StableDiGraph` reuses vacant edge slots after removals,
//! so there the two can differ.

use petgraph::graph::{DiGraph, IndexType, NodeIndex};
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::graph::GraphStore;

impl<Ix: IndexType> GraphStore<NodeIndex<Ix>> {
    /// Build from a `DiGraph`. Node and edge weights are ignored.
    pub fn from_petgraph<N, E>(graph: &DiGraph<N, E, Ix>) -> Self {
        let mut store = GraphStore::with_capacity(graph.node_count());
        for node in graph.node_indices() {
            // petgraph walks outgoing edges newest first.
            let mut outgoing: Vec<_> = graph
                .edges_directed(node, Direction::Outgoing)
                .map(|e| (e.id(), e.target()))
                .collect();
            outgoing.sort_by_key(|(id, _)| *id);
            store.extend(outgoing.into_iter().map(|(_, target)| (node, target)));
        }
        store
    }

    /// Build from a `StableDiGraph`, skipping removed slots.
    pub fn from_stable_petgraph<N, E>(graph: &StableDiGraph<N, E, Ix>) -> Self {
        let mut store = GraphStore::with_capacity(graph.node_count());
        for node in graph.node_indices() {
            let mut outgoing: Vec<_> = graph
                .edges_directed(node, Direction::Outgoing)
                .map(|e| (e.id(), e.target()))
                .collect();
            outgoing.sort_by_key(|(id, _)| *id);
            store.extend(outgoing.into_iter().map(|(_, target)| (node, target)));
        }
        store
    }
}

impl<N, E, Ix: IndexType> From<&DiGraph<N, E, Ix>> for GraphStore<NodeIndex<Ix>> {
    fn from(graph: &DiGraph<N, E, Ix>) -> Self {
        GraphStore::from_petgraph(graph)
    }
}
