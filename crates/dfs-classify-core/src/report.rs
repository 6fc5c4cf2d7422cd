//! Serializable snapshot of a finished traversal.

use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::context::{ClassifiedEdge, EdgeCounts, TraversalContext};

/// Timestamps and parent of one visited vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexTimes<V> {
    pub vertex: V,
    pub start: u64,
    /// Absent only when the snapshot is taken mid-traversal.
    pub finish: Option<u64>,
    pub parent: Option<V>,
}

/// Deterministic, ordered view of a [`TraversalContext`].
///
/// Vertices are listed in discovery order and edges in classification order,
/// so two runs over the same graph serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalReport<V> {
    pub vertices: Vec<VertexTimes<V>>,
    pub edges: Vec<ClassifiedEdge<V>>,
    pub order: Vec<V>,
    pub counts: EdgeCounts,
    pub has_cycle: bool,
}

impl<V> TraversalReport<V>
where
    V: Clone + Eq + Hash,
{
    pub fn from_context(ctx: &TraversalContext<V>) -> Self {
        let vertices = ctx
            .discovery_order()
            .iter()
            .map(|v| VertexTimes {
                vertex: v.clone(),
                start: ctx.start_time(v).unwrap_or_default(),
                finish: ctx.finish_time(v),
                parent: ctx.parent(v).flatten().cloned(),
            })
            .collect();

        let edges = ctx
            .edges()
            .map(|e| ClassifiedEdge {
                from: e.from.clone(),
                to: e.to.clone(),
                kind: e.kind,
            })
            .collect();

        Self {
            vertices,
            edges,
            order: ctx.order().to_vec(),
            counts: ctx.counts(),
            has_cycle: ctx.has_cycle(),
        }
    }
}

impl<V> From<&TraversalContext<V>> for TraversalReport<V>
where
    V: Clone + Eq + Hash,
{
    fn from(ctx: &TraversalContext<V>) -> Self {
        Self::from_context(ctx)
    }
}
