//! CLI command implementations.

pub mod classify;
pub mod compare;
pub mod config;
pub mod dag;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dfs_classify_core::parse::{parse_edge_list, parse_json_edge_list};
use dfs_classify_core::{ClassifyConfig, GraphStore};
use tracing::debug;

use crate::render::{OutputFormat, TextOptions};

/// Where a graph's edge list comes from.
#[derive(Debug, Clone)]
pub enum GraphSource {
    /// Edges given on the command line, e.g. `"0->1; 1->2"`.
    Inline(String),
    /// Edge list file.
    File(PathBuf),
    /// Edge list piped on stdin.
    Stdin,
}

/// Settings shared by every command that classifies and prints.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub classify: ClassifyConfig,
    pub format: OutputFormat,
    pub text: TextOptions,
}

/// Read and parse a graph; `json` selects the JSON edge-list format, whose
/// vertices may be strings or numbers.
pub fn load_graph(source: &GraphSource, json: bool) -> Result<GraphStore<String>> {
    let contents = match source {
        GraphSource::Inline(edges) => edges.clone(),
        GraphSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read edge list {}", path.display()))?,
        GraphSource::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read edge list from stdin")?;
            buf
        }
    };

    let graph = if json {
        parse_json_edge_list(&contents)?
    } else {
        parse_edge_list(&contents)?
    };

    debug!(
        source = ?source,
        sources = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph_loaded"
    );
    Ok(graph)
}
