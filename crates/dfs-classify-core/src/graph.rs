use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Directed adjacency store keyed by vertex identity.
///
/// Successor lists keep insertion order and keep duplicates. Only vertices that
/// appear as the source of at least one edge are keys; a vertex mentioned only
/// as a destination is reachable but never enumerated by [`GraphStore::vertices`].
#[derive(Debug, Clone)]
pub struct GraphStore<V> {
    adjacency: HashMap<V, Vec<V>>,
    sources: Vec<V>,
}

impl<V> Default for GraphStore<V> {
    fn default() -> Self {
        Self {
            adjacency: HashMap::new(),
            sources: Vec::new(),
        }
    }
}

impl<V> GraphStore<V>
where
    V: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known number of source vertices.
    pub fn with_capacity(sources: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(sources),
            sources: Vec::with_capacity(sources),
        }
    }

    /// Append `to` to the successors of `from`, creating `from`'s entry if absent.
    pub fn add_edge(&mut self, from: V, to: V) {
        match self.adjacency.get_mut(&from) {
            Some(successors) => successors.push(to),
            None => {
                self.sources.push(from.clone());
                self.adjacency.insert(from, vec![to]);
            }
        }
    }

    /// Successors of `vertex` in insertion order; empty for unknown vertices.
    pub fn neighbors(&self, vertex: &V) -> &[V] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Source vertices in first-insertion order.
    pub fn vertices(&self) -> std::slice::Iter<'_, V> {
        self.sources.iter()
    }

    /// Every vertex mentioned by any edge, sources and destinations, in first-mention order.
    pub fn all_vertices(&self) -> Vec<&V> {
        let mut seen: HashSet<&V> = HashSet::with_capacity(self.sources.len());
        let mut all = Vec::with_capacity(self.sources.len());
        for (from, to) in self.edges() {
            if seen.insert(from) {
                all.push(from);
            }
            if seen.insert(to) {
                all.push(to);
            }
        }
        all
    }

    /// All edges as `(from, to)`, grouped by source in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> + '_ {
        self.sources
            .iter()
            .flat_map(move |from| self.neighbors(from).iter().map(move |to| (from, to)))
    }

    pub fn contains_source(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    pub fn has_edge(&self, from: &V, to: &V) -> bool {
        self.neighbors(from).contains(to)
    }

    /// Number of source vertices.
    pub fn vertex_count(&self) -> usize {
        self.sources.len()
    }

    /// Number of edges, parallel edges included.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<V> FromIterator<(V, V)> for GraphStore<V>
where
    V: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (V, V)>>(iter: I) -> Self {
        let mut graph = GraphStore::new();
        graph.extend(iter);
        graph
    }
}

impl<V> Extend<(V, V)> for GraphStore<V>
where
    V: Clone + Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (V, V)>>(&mut self, iter: I) {
        for (from, to) in iter {
            self.add_edge(from, to);
        }
    }
}
