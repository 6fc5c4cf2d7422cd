//! Acyclic projection of a classified graph.
//!
//! Dropping every back edge breaks every cycle: any cycle reachable by the
//! traversal contains at least one back edge, and tree, forward and cross
//! edges all point from a later finish time to an earlier one.

use std::hash::Hash;

use tracing::debug;

use crate::context::{EdgeKind, TraversalContext};
use crate::graph::GraphStore;
use crate::iterative::IterativeEngine;

/// Rebuild `graph` without the edges `ctx` classified as back edges.
///
/// Edge order and parallel edges are preserved. A source whose only edges were
/// back edges is no longer a source in the result.
pub fn dag<V>(graph: &GraphStore<V>, ctx: &TraversalContext<V>) -> GraphStore<V>
where
    V: Clone + Eq + Hash,
{
    let projected: GraphStore<V> = graph
        .edges()
        .filter(|(from, to)| ctx.edge_kind(from, to) != Some(EdgeKind::Back))
        .map(|(from, to)| (from.clone(), to.clone()))
        .collect();

    debug!(
        edges = graph.edge_count(),
        kept = projected.edge_count(),
        "dag_projected"
    );
    projected
}

/// Classify `graph` with the iterative engine and return its acyclic projection.
pub fn classify_dag<V>(graph: &GraphStore<V>) -> GraphStore<V>
where
    V: Clone + Eq + Hash,
{
    let ctx = IterativeEngine::classify(graph);
    dag(graph, &ctx)
}
