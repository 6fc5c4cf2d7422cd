//! `classify` and `random` command implementation.

use std::fmt::Display;
use std::hash::Hash;
use std::io::Write;

use anyhow::Result;
use dfs_classify_core::{classify_with, GraphStore};
use serde::Serialize;
use tracing::info;

use super::RunOptions;
use crate::render::{self, ClassifyOutput, OutputFormat};

/// Classify `graph` and print the result to stdout.
pub fn execute<V>(graph: &GraphStore<V>, options: &RunOptions, seed: Option<u64>) -> Result<()>
where
    V: Display + Clone + Eq + Hash + Serialize,
{
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write(&mut out, graph, options, seed)?;
    out.flush()?;
    Ok(())
}

/// Classify `graph` and write the result to `out`.
pub fn write<V, W>(
    out: &mut W,
    graph: &GraphStore<V>,
    options: &RunOptions,
    seed: Option<u64>,
) -> Result<()>
where
    V: Display + Clone + Eq + Hash + Serialize,
    W: Write,
{
    let ctx = classify_with(graph, &options.classify);
    info!(
        engine = %options.classify.engine,
        vertices = ctx.vertex_count(),
        edges = ctx.edge_count(),
        "graph_classified"
    );

    match options.format {
        OutputFormat::Text => {
            if let Some(seed) = seed {
                writeln!(out, "Seed: {seed}")?;
                writeln!(out)?;
            }
            render::write_text(out, graph, &ctx, options.text)?;
        }
        OutputFormat::Json => {
            let output = ClassifyOutput::new(options.classify.engine, seed, graph, &ctx);
            serde_json::to_writer_pretty(&mut *out, &output)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
