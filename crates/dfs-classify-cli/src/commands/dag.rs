//! `dag` command: print the graph with its back edges removed.

use std::fmt::Display;
use std::hash::Hash;
use std::io::Write;

use anyhow::Result;
use dfs_classify_core::{classify_with, dag, EdgeKind, GraphStore};
use serde::Serialize;

use super::RunOptions;
use crate::render::{self, OutputFormat};

/// JSON shape; `edges` is readable back as a JSON edge list.
#[derive(Debug, Serialize)]
struct DagOutput<V> {
    edges: Vec<(V, V)>,
    removed: Vec<(V, V)>,
}

pub fn execute<V>(graph: &GraphStore<V>, options: &RunOptions) -> Result<()>
where
    V: Display + Clone + Eq + Hash + Serialize,
{
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write(&mut out, graph, options)?;
    out.flush()?;
    Ok(())
}

pub fn write<V, W>(out: &mut W, graph: &GraphStore<V>, options: &RunOptions) -> Result<()>
where
    V: Display + Clone + Eq + Hash + Serialize,
    W: Write,
{
    let ctx = classify_with(graph, &options.classify);
    let acyclic = dag(graph, &ctx);
    let removed: Vec<(V, V)> = ctx
        .edges()
        .filter(|e| e.kind == EdgeKind::Back)
        .map(|e| (e.from.clone(), e.to.clone()))
        .collect();

    match options.format {
        OutputFormat::Text => {
            render::write_adjacency_list(out, &acyclic)?;
            writeln!(out, "Removed back edges:")?;
            for (from, to) in &removed {
                writeln!(out, "{from} -> {to}")?;
            }
        }
        OutputFormat::Json => {
            let output = DagOutput {
                edges: acyclic
                    .edges()
                    .map(|(a, b)| (a.clone(), b.clone()))
                    .collect(),
                removed,
            };
            serde_json::to_writer_pretty(&mut *out, &output)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
