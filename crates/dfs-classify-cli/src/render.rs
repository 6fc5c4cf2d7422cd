//! Text and JSON rendering of graphs and classification results.
//!
//! Rendering never mutates a traversal context. Vertices the traversal never
//! reached are shown as unreachable rather than treated as errors.

use std::fmt::Display;
use std::hash::Hash;
use std::io::{self, Write};

use dfs_classify_core::{EdgeKind, EngineKind, GraphStore, TraversalContext, TraversalReport};
use serde::{Deserialize, Serialize};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Unknown format: {}. Use 'text' or 'json'", s),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Text rendering switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    pub matrix: bool,
}

/// JSON document emitted by `classify` and `random`.
#[derive(Debug, Serialize)]
pub struct ClassifyOutput<V> {
    pub engine: EngineKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub adjacency: Vec<(V, Vec<V>)>,
    pub report: TraversalReport<V>,
}

impl<V> ClassifyOutput<V>
where
    V: Clone + Eq + Hash,
{
    pub fn new(
        engine: EngineKind,
        seed: Option<u64>,
        graph: &GraphStore<V>,
        ctx: &TraversalContext<V>,
    ) -> Self {
        Self {
            engine,
            seed,
            adjacency: adjacency(graph),
            report: TraversalReport::from(ctx),
        }
    }
}

fn adjacency<V: Clone + Eq + Hash>(graph: &GraphStore<V>) -> Vec<(V, Vec<V>)> {
    graph
        .vertices()
        .map(|v| (v.clone(), graph.neighbors(v).to_vec()))
        .collect()
}

/// `u --> a b c`, one line per source vertex.
pub fn write_adjacency_list<V, W>(out: &mut W, graph: &GraphStore<V>) -> io::Result<()>
where
    V: Display + Clone + Eq + Hash,
    W: Write,
{
    writeln!(out, "Adjacency List:")?;
    for v in graph.vertices() {
        write!(out, "{v} -->")?;
        for next in graph.neighbors(v) {
            write!(out, " {next}")?;
        }
        writeln!(out)?;
    }
    writeln!(out)
}

/// Edge multiplicity matrix over every mentioned vertex, in first-mention order.
pub fn write_adjacency_matrix<V, W>(out: &mut W, graph: &GraphStore<V>) -> io::Result<()>
where
    V: Display + Clone + Eq + Hash,
    W: Write,
{
    let vertices = graph.all_vertices();
    let labels: Vec<String> = vertices.iter().map(|v| v.to_string()).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(1);

    writeln!(out, "Adjacency Matrix:")?;
    write!(out, "{:width$}", "")?;
    for label in &labels {
        write!(out, " {label:>width$}")?;
    }
    writeln!(out)?;

    for (row, from) in vertices.iter().enumerate() {
        write!(out, "{:>width$}", labels[row])?;
        let successors = graph.neighbors(from);
        for to in &vertices {
            let count = successors.iter().filter(|s| s == to).count();
            write!(out, " {count:>width$}")?;
        }
        writeln!(out)?;
    }
    writeln!(out)
}

/// Timestamps, parents, classifications and finish order.
pub fn write_traversal<V, W>(
    out: &mut W,
    graph: &GraphStore<V>,
    ctx: &TraversalContext<V>,
) -> io::Result<()>
where
    V: Display + Clone + Eq + Hash,
    W: Write,
{
    writeln!(out, "Vertices:")?;
    writeln!(out, "{:>8} {:>8} {:>8}  parent", "vertex", "start", "finish")?;
    for v in graph.all_vertices() {
        match (ctx.start_time(v), ctx.finish_time(v)) {
            (Some(start), Some(finish)) => {
                let parent = match ctx.parent(v).flatten() {
                    Some(p) => p.to_string(),
                    None => "-".to_string(),
                };
                writeln!(out, "{v:>8} {start:>8} {finish:>8}  {parent}")?;
            }
            _ => writeln!(out, "{v:>8} unreachable")?,
        }
    }
    writeln!(out)?;

    writeln!(out, "Edge Classifications:")?;
    for edge in ctx.edges() {
        writeln!(out, "{} -> {}  {}", edge.from, edge.to, edge.kind)?;
    }
    writeln!(out)?;

    let counts = ctx.counts();
    let summary: Vec<String> = EdgeKind::ALL
        .iter()
        .map(|k| format!("{}={}", k, counts.get(*k)))
        .collect();
    writeln!(out, "Counts: {}", summary.join(" "))?;
    writeln!(out, "Cycle: {}", if ctx.has_cycle() { "yes" } else { "no" })?;

    let order: Vec<String> = ctx.order().iter().map(|v| v.to_string()).collect();
    writeln!(out, "Finish Order: {}", order.join(" "))?;
    let discovery: Vec<String> = ctx.discovery_order().iter().map(|v| v.to_string()).collect();
    writeln!(out, "DFS Traversal: {}", discovery.join(" "))
}

/// Full text report for one classification.
pub fn write_text<V, W>(
    out: &mut W,
    graph: &GraphStore<V>,
    ctx: &TraversalContext<V>,
    options: TextOptions,
) -> io::Result<()>
where
    V: Display + Clone + Eq + Hash,
    W: Write,
{
    write_adjacency_list(out, graph)?;
    if options.matrix {
        write_adjacency_matrix(out, graph)?;
    }
    write_traversal(out, graph, ctx)
}
