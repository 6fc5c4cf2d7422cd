//! Reference engine using native call recursion.

use std::hash::Hash;
use std::time::Instant;

use tracing::{debug, info, trace};

use crate::classifier::classify_edge;
use crate::config::ClassifyConfig;
use crate::context::{EdgeKind, TraversalContext};
use crate::graph::GraphStore;

/// Depth-first classifier that recurses into every tree edge.
///
/// Recursion depth equals the longest tree path, so very deep graphs can
/// exhaust the thread's stack. Use [`crate::IterativeEngine`] for those.
pub struct RecursiveEngine<'g, V> {
    graph: &'g GraphStore<V>,
    ctx: TraversalContext<V>,
}

impl<'g, V> RecursiveEngine<'g, V>
where
    V: Clone + Eq + Hash,
{
    pub fn new(graph: &'g GraphStore<V>) -> Self {
        Self::with_config(graph, &ClassifyConfig::default())
    }

    pub fn with_config(graph: &'g GraphStore<V>, config: &ClassifyConfig) -> Self {
        Self {
            graph,
            ctx: TraversalContext::new(config.clock_base),
        }
    }

    /// Classify every edge of `graph` with default configuration.
    pub fn classify(graph: &'g GraphStore<V>) -> TraversalContext<V> {
        Self::new(graph).run()
    }

    /// Visit every undiscovered root in order and return the finished context.
    pub fn run(mut self) -> TraversalContext<V> {
        let started = Instant::now();
        let graph = self.graph;
        debug!(
            engine = "recursive",
            roots = graph.vertex_count(),
            edges = graph.edge_count(),
            "classify_start"
        );

        for root in graph.vertices() {
            if self.ctx.is_discovered(root) {
                continue;
            }
            self.visit(root.clone(), None);
            debug!(finished = self.ctx.order().len(), "root_exhausted");
        }

        let counts = self.ctx.counts();
        info!(
            engine = "recursive",
            vertices = self.ctx.vertex_count(),
            edges = counts.total(),
            back = counts.back,
            duration_us = started.elapsed().as_micros() as u64,
            "classify_complete"
        );
        self.ctx
    }

    fn visit(&mut self, vertex: V, parent: Option<V>) {
        let graph = self.graph;
        let start = self.ctx.discover(vertex.clone(), parent);
        trace!(start, "vertex_discovered");

        for next in graph.neighbors(&vertex) {
            match classify_edge(&self.ctx, &vertex, next) {
                EdgeKind::Tree => self.visit(next.clone(), Some(vertex.clone())),
                kind => {
                    self.ctx.record(vertex.clone(), next.clone(), kind);
                }
            }
        }

        self.ctx.finish(vertex);
    }
}
