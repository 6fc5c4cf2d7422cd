//! Traversal bookkeeping shared by both engines.
//!
//! A [`TraversalContext`] owns the clock, the discovery/finish timestamps, the
//! parent links, and the classification map for one traversal. Engines mutate it
//! through crate-private methods; callers only ever see it read-only.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::MAX_CLOCK_BASE;

/// Classification of a directed edge relative to a depth-first traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Edge to a previously undiscovered vertex; part of the DFS forest.
    Tree,
    /// Edge to an ancestor still open on the current path.
    Back,
    /// Edge to a finished descendant discovered after the source.
    Forward,
    /// Edge to a finished vertex discovered before the source.
    Cross,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 4] = [
        EdgeKind::Tree,
        EdgeKind::Back,
        EdgeKind::Forward,
        EdgeKind::Cross,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Tree => "tree",
            EdgeKind::Back => "back",
            EdgeKind::Forward => "forward",
            EdgeKind::Cross => "cross",
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EdgeKind::Tree)
    }

    pub fn is_back(&self) -> bool {
        matches!(self, EdgeKind::Back)
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified edge, in the order classifications were made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedEdge<V> {
    pub from: V,
    pub to: V,
    pub kind: EdgeKind,
}

/// Per-kind edge tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCounts {
    pub tree: usize,
    pub back: usize,
    pub forward: usize,
    pub cross: usize,
}

impl EdgeCounts {
    pub fn total(&self) -> usize {
        self.tree + self.back + self.forward + self.cross
    }

    pub fn get(&self, kind: EdgeKind) -> usize {
        match kind {
            EdgeKind::Tree => self.tree,
            EdgeKind::Back => self.back,
            EdgeKind::Forward => self.forward,
            EdgeKind::Cross => self.cross,
        }
    }

    fn bump(&mut self, kind: EdgeKind) {
        match kind {
            EdgeKind::Tree => self.tree += 1,
            EdgeKind::Back => self.back += 1,
            EdgeKind::Forward => self.forward += 1,
            EdgeKind::Cross => self.cross += 1,
        }
    }
}

/// Mutable state of one traversal, returned to the caller as a snapshot.
///
/// Invariants upheld by the engines:
/// - every discovered vertex gets exactly one start stamp, and exactly one
///   finish stamp strictly later;
/// - all stamps come from one clock, one tick each, so they are distinct and
///   contiguous from the clock base;
/// - an ordered pair is classified at most once and never revised.
#[derive(Debug, Clone)]
pub struct TraversalContext<V> {
    clock_base: u64,
    clock: u64,
    start_time: HashMap<V, u64>,
    finish_time: HashMap<V, u64>,
    parent: HashMap<V, Option<V>>,
    edges: HashMap<(V, V), EdgeKind>,
    edge_order: Vec<(V, V)>,
    discovery: Vec<V>,
    order: Vec<V>,
    counts: EdgeCounts,
}

impl<V> TraversalContext<V>
where
    V: Clone + Eq + Hash,
{
    /// Bases above [`MAX_CLOCK_BASE`] are clamped so the clock cannot overflow.
    pub(crate) fn new(clock_base: u64) -> Self {
        if clock_base > MAX_CLOCK_BASE {
            warn!(clock_base, max = MAX_CLOCK_BASE, "clock_base_clamped");
        }
        let clock_base = clock_base.min(MAX_CLOCK_BASE);
        Self {
            clock_base,
            clock: clock_base,
            start_time: HashMap::new(),
            finish_time: HashMap::new(),
            parent: HashMap::new(),
            edges: HashMap::new(),
            edge_order: Vec::new(),
            discovery: Vec::new(),
            order: Vec::new(),
            counts: EdgeCounts::default(),
        }
    }

    fn tick(&mut self) -> u64 {
        let now = self.clock;
        self.clock += 1;
        now
    }

    /// Mark `vertex` discovered, stamp its start time and record the tree edge from `parent`.
    pub(crate) fn discover(&mut self, vertex: V, parent: Option<V>) -> u64 {
        let now = self.tick();
        self.start_time.insert(vertex.clone(), now);
        if let Some(p) = &parent {
            self.record(p.clone(), vertex.clone(), EdgeKind::Tree);
        }
        self.parent.insert(vertex.clone(), parent);
        self.discovery.push(vertex);
        now
    }

    /// Stamp the finish time of `vertex` and append it to the finish order.
    pub(crate) fn finish(&mut self, vertex: V) -> u64 {
        let now = self.tick();
        self.finish_time.insert(vertex.clone(), now);
        self.order.push(vertex);
        now
    }

    /// Record a classification unless the pair already has one. Returns whether it was recorded.
    pub(crate) fn record(&mut self, from: V, to: V, kind: EdgeKind) -> bool {
        let key = (from, to);
        if self.edges.contains_key(&key) {
            return false;
        }
        self.edges.insert(key.clone(), kind);
        self.edge_order.push(key);
        self.counts.bump(kind);
        true
    }

    pub fn is_discovered(&self, vertex: &V) -> bool {
        self.start_time.contains_key(vertex)
    }

    pub fn is_finished(&self, vertex: &V) -> bool {
        self.finish_time.contains_key(vertex)
    }

    /// Discovered but not yet finished; only meaningful mid-traversal.
    pub fn is_open(&self, vertex: &V) -> bool {
        self.is_discovered(vertex) && !self.is_finished(vertex)
    }

    pub fn start_time(&self, vertex: &V) -> Option<u64> {
        self.start_time.get(vertex).copied()
    }

    pub fn finish_time(&self, vertex: &V) -> Option<u64> {
        self.finish_time.get(vertex).copied()
    }

    /// `None` if `vertex` was never visited, `Some(None)` for a root.
    pub fn parent(&self, vertex: &V) -> Option<Option<&V>> {
        self.parent.get(vertex).map(Option::as_ref)
    }

    pub fn edge_kind(&self, from: &V, to: &V) -> Option<EdgeKind> {
        // Tuple keys need owned halves for lookup.
        self.edges.get(&(from.clone(), to.clone())).copied()
    }

    /// Classified edges in the order they were classified.
    pub fn edges(&self) -> impl Iterator<Item = ClassifiedEdge<&V>> + '_ {
        self.edge_order.iter().map(move |key| ClassifiedEdge {
            from: &key.0,
            to: &key.1,
            kind: self.edges[key],
        })
    }

    /// The `index`-th classification made, if it exists yet.
    pub(crate) fn classified_at(&self, index: usize) -> Option<ClassifiedEdge<V>> {
        self.edge_order.get(index).map(|key| ClassifiedEdge {
            from: key.0.clone(),
            to: key.1.clone(),
            kind: self.edges[key],
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    pub fn counts(&self) -> EdgeCounts {
        self.counts
    }

    /// Whether any back edge was found, i.e. whether a reachable cycle exists.
    pub fn has_cycle(&self) -> bool {
        self.counts.back > 0
    }

    /// Vertices in finish order.
    pub fn order(&self) -> &[V] {
        &self.order
    }

    /// Vertices in discovery (pre-)order.
    pub fn discovery_order(&self) -> &[V] {
        &self.discovery
    }

    /// Number of discovered vertices.
    pub fn vertex_count(&self) -> usize {
        self.discovery.len()
    }

    /// First timestamp handed out by the clock.
    pub fn clock_base(&self) -> u64 {
        self.clock_base
    }

    /// The next timestamp the clock would hand out.
    pub fn clock(&self) -> u64 {
        self.clock
    }
}
