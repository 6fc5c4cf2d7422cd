//! Random graph generation for exercising the classifier.

use std::collections::HashSet;

use dfs_classify_core::GraphStore;
use rand::Rng;
use tracing::{debug, warn};

/// Edge count range used when none is requested.
pub const DEFAULT_EDGE_RANGE: std::ops::RangeInclusive<usize> = 9..=45;

/// Shape of a random graph over vertices `0..vertices`.
#[derive(Debug, Clone)]
pub struct RandomGraphSpec {
    pub vertices: u64,
    /// Drawn from [`DEFAULT_EDGE_RANGE`] when absent.
    pub edges: Option<usize>,
    pub allow_self_loops: bool,
    pub allow_duplicates: bool,
}

impl RandomGraphSpec {
    /// Most distinct edges this shape can hold, or `None` when duplicates make it unbounded.
    pub fn capacity(&self) -> Option<u64> {
        if self.allow_duplicates {
            return None;
        }
        let v = self.vertices;
        Some(if self.allow_self_loops {
            v.saturating_mul(v)
        } else {
            v.saturating_mul(v.saturating_sub(1))
        })
    }
}

/// Generate a graph by drawing source/destination pairs uniformly.
///
/// The requested edge count is clamped to [`RandomGraphSpec::capacity`].
pub fn generate<R: Rng>(spec: &RandomGraphSpec, rng: &mut R) -> GraphStore<u64> {
    let requested = spec
        .edges
        .unwrap_or_else(|| rng.random_range(DEFAULT_EDGE_RANGE));

    let edges = match spec.capacity() {
        _ if spec.vertices == 0 => 0,
        Some(capacity) if requested as u64 > capacity => {
            warn!(requested, capacity, "edge_count_clamped");
            capacity as usize
        }
        _ => requested,
    };
    // One vertex with no self-loops allowed can hold nothing, duplicates or not.
    let edges = if spec.vertices == 1 && !spec.allow_self_loops {
        0
    } else {
        edges
    };

    let mut graph = GraphStore::new();
    let mut seen: HashSet<(u64, u64)> = HashSet::with_capacity(edges);
    let mut added = 0;
    while added < edges {
        let from = rng.random_range(0..spec.vertices);
        let to = rng.random_range(0..spec.vertices);
        if from == to && !spec.allow_self_loops {
            continue;
        }
        if !seen.insert((from, to)) && !spec.allow_duplicates {
            continue;
        }
        graph.add_edge(from, to);
        added += 1;
    }

    debug!(
        vertices = spec.vertices,
        edges = graph.edge_count(),
        sources = graph.vertex_count(),
        "random_graph_generated"
    );
    graph
}
