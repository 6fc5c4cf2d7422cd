//! Depth-first edge classification for directed graphs.
//!
//! Every edge examined by a depth-first traversal falls into one of four
//! categories, decided from the discovery/finish ordering of its endpoints at
//! the moment the edge is examined:
//!
//! - **Tree**: the destination had not been discovered yet.
//! - **Back**: the destination is an ancestor still open on the current path.
//! - **Forward**: the destination is a finished descendant of the source.
//! - **Cross**: the destination is finished and was discovered before the source.
//!
//! ## Engines
//!
//! Two engines produce identical output for identical input:
//!
//! - [`RecursiveEngine`] walks the graph with native call recursion. It is the
//!   reference behavior.
//! - [`IterativeEngine`] reifies the recursion as an explicit stack of
//!   [`Frame`]s (`Enter`, `Scan`, `Leave`). It never touches the call stack, so
//!   arbitrarily deep graphs are fine, and it can be driven one frame at a time
//!   through [`IterativeEngine::advance`].
//!
//! ```text
//! Enter(v, p)  -> discover v, push Leave(v), push Scan(v, 0)
//! Scan(v, i)   -> classify successors from i; on an undiscovered w at j:
//!                 push Scan(v, j + 1), push Enter(w, v), stop
//! Leave(v)     -> finish v
//! ```
//!
//! ## Example
//!
//! ```
//! use dfs_classify_core::{classify, EdgeKind, GraphStore};
//!
//! let mut graph = GraphStore::new();
//! graph.add_edge(0, 1);
//! graph.add_edge(1, 2);
//! graph.add_edge(2, 0);
//!
//! let ctx = classify(&graph);
//! assert_eq!(ctx.edge_kind(&0, &1), Some(EdgeKind::Tree));
//! assert_eq!(ctx.edge_kind(&2, &0), Some(EdgeKind::Back));
//! assert!(ctx.has_cycle());
//! ```

mod classifier;
pub mod config;
mod context;
pub mod dag;
mod error;
mod graph;
pub mod interop;
mod iterative;
pub mod parse;
mod recursive;
mod report;

pub use classifier::classify_edge;
pub use config::{ClassifyConfig, EngineKind, MAX_CLOCK_BASE};
pub use context::{ClassifiedEdge, EdgeCounts, EdgeKind, TraversalContext};
pub use dag::{classify_dag, dag};
pub use error::{ConfigError, ConfigResult, ParseError, ParseResult};
pub use graph::GraphStore;
pub use iterative::{EdgeStream, EngineState, Frame, IterativeEngine};
pub use recursive::RecursiveEngine;
pub use report::{TraversalReport, VertexTimes};

use std::hash::Hash;

/// Classify every edge of `graph` with the explicit-stack engine and default configuration.
pub fn classify<V>(graph: &GraphStore<V>) -> TraversalContext<V>
where
    V: Clone + Eq + Hash,
{
    IterativeEngine::classify(graph)
}

/// Classify every edge of `graph` with the recursive reference engine.
pub fn classify_recursive<V>(graph: &GraphStore<V>) -> TraversalContext<V>
where
    V: Clone + Eq + Hash,
{
    RecursiveEngine::classify(graph)
}

/// Classify with an explicit configuration, dispatching on [`ClassifyConfig::engine`].
pub fn classify_with<V>(graph: &GraphStore<V>, config: &ClassifyConfig) -> TraversalContext<V>
where
    V: Clone + Eq + Hash,
{
    match config.engine {
        EngineKind::Recursive => RecursiveEngine::with_config(graph, config).run(),
        EngineKind::Iterative => IterativeEngine::with_config(graph, config).run(),
    }
}
