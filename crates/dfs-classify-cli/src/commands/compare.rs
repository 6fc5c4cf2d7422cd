//! `compare` command: run both engines and check they agree.

use std::fmt::Display;
use std::hash::Hash;
use std::io::Write;

use anyhow::{bail, Result};
use dfs_classify_core::{
    ClassifyConfig, GraphStore, IterativeEngine, RecursiveEngine, TraversalReport,
};
use tracing::{info, warn};

pub fn execute<V>(graph: &GraphStore<V>, config: &ClassifyConfig) -> Result<()>
where
    V: Display + Clone + Eq + Hash,
{
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write(&mut out, graph, config)
}

/// Print the agreement summary, or every differing edge; fails when the engines disagree.
pub fn write<V, W>(out: &mut W, graph: &GraphStore<V>, config: &ClassifyConfig) -> Result<()>
where
    V: Display + Clone + Eq + Hash,
    W: Write,
{
    let recursive = RecursiveEngine::with_config(graph, config).run();
    let iterative = IterativeEngine::with_config(graph, config).run();

    let left = TraversalReport::from(&recursive);
    let right = TraversalReport::from(&iterative);

    if left == right {
        info!(vertices = left.vertices.len(), edges = left.edges.len(), "engines_agree");
        writeln!(
            out,
            "engines agree: {} vertices, {} edges",
            left.vertices.len(),
            left.edges.len()
        )?;
        return Ok(());
    }

    let mut mismatches = 0;
    for edge in recursive.edges() {
        let other = iterative.edge_kind(edge.from, edge.to);
        if other != Some(edge.kind) {
            mismatches += 1;
            let other = other.map(|k| k.to_string()).unwrap_or_else(|| "-".into());
            writeln!(
                out,
                "{} -> {}: recursive={} iterative={}",
                edge.from, edge.to, edge.kind, other
            )?;
        }
    }
    for vertex in recursive.discovery_order() {
        let times = |ctx: &dfs_classify_core::TraversalContext<V>| {
            (ctx.start_time(vertex), ctx.finish_time(vertex))
        };
        if times(&recursive) != times(&iterative) {
            mismatches += 1;
            writeln!(out, "{vertex}: timestamps differ")?;
        }
    }

    warn!(mismatches, "engines_disagree");
    bail!("engines disagree ({mismatches} differences)")
}
