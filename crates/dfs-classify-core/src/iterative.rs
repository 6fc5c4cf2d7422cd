//! Explicit-stack classification engine.
//!
//! The recursive "visit a neighbor, then keep scanning the rest" loop is
//! turned into three resumable frames held on a LIFO stack:
//!
//! - [`Frame::Enter`] discovers a vertex and schedules its scan and finish.
//! - [`Frame::Scan`] classifies successors from a resume index. When it meets
//!   an undiscovered successor at index `j` it pushes `Scan(v, j + 1)` and
//!   then `Enter(w, v)`, and stops. The successor at `j` is consumed by the
//!   index advance, so it is never examined twice.
//! - [`Frame::Leave`] stamps the finish time.
//!
//! Each call to [`IterativeEngine::advance`] processes exactly one frame, or
//! moves to the next root when the stack is empty. Between any two calls the
//! engine is a consistent snapshot: every open vertex has a pending `Leave`
//! frame and the context holds only final classifications.

use std::hash::Hash;
use std::time::Instant;

use tracing::{debug, error, info, trace};

use crate::classifier::classify_edge;
use crate::config::ClassifyConfig;
use crate::context::{ClassifiedEdge, EdgeKind, TraversalContext};
use crate::graph::GraphStore;

/// One pending unit of traversal work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame<V> {
    /// First visit of `vertex`, reached from `parent` (none for a root).
    Enter { vertex: V, parent: Option<V> },
    /// Resume scanning `vertex`'s successors at index `next`.
    Scan { vertex: V, next: usize },
    /// Finalize `vertex` once all its successors are processed.
    Leave { vertex: V },
}

impl<V> Frame<V> {
    pub fn vertex(&self) -> &V {
        match self {
            Frame::Enter { vertex, .. } | Frame::Scan { vertex, .. } | Frame::Leave { vertex } => {
                vertex
            }
        }
    }
}

/// Where the engine is in its traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No root started yet.
    Idle,
    /// Frames are pending on the stack.
    Running,
    /// The current root's tree is complete; the next advance picks a new root.
    RootExhausted,
    /// Every root has been processed.
    Done,
}

/// Steppable depth-first classifier driven by an explicit frame stack.
pub struct IterativeEngine<'g, V> {
    graph: &'g GraphStore<V>,
    roots: std::slice::Iter<'g, V>,
    stack: Vec<Frame<V>>,
    ctx: TraversalContext<V>,
    state: EngineState,
    steps: u64,
    started: Option<Instant>,
}

impl<'g, V> IterativeEngine<'g, V>
where
    V: Clone + Eq + Hash,
{
    pub fn new(graph: &'g GraphStore<V>) -> Self {
        Self::with_config(graph, &ClassifyConfig::default())
    }

    pub fn with_config(graph: &'g GraphStore<V>, config: &ClassifyConfig) -> Self {
        Self {
            graph,
            roots: graph.vertices(),
            stack: Vec::new(),
            ctx: TraversalContext::new(config.clock_base),
            state: EngineState::Idle,
            steps: 0,
            started: None,
        }
    }

    /// Classify every edge of `graph` with default configuration.
    pub fn classify(graph: &'g GraphStore<V>) -> TraversalContext<V> {
        Self::new(graph).run()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == EngineState::Done
    }

    /// Number of pending frames.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// The frame the next [`advance`](Self::advance) will process, if any.
    pub fn peek(&self) -> Option<&Frame<V>> {
        self.stack.last()
    }

    /// Pending frames, bottom of the stack first.
    pub fn frames(&self) -> &[Frame<V>] {
        &self.stack
    }

    /// The traversal state as of the last completed step.
    pub fn context(&self) -> &TraversalContext<V> {
        &self.ctx
    }

    pub fn discovered_count(&self) -> usize {
        self.ctx.vertex_count()
    }

    /// Number of `advance` calls that did work.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Process one frame, or pick the next root when the stack is empty.
    ///
    /// Returns the state after the step. Advancing a finished engine is a no-op.
    pub fn advance(&mut self) -> EngineState {
        match self.state {
            EngineState::Done => return EngineState::Done,
            EngineState::Idle => {
                self.started = Some(Instant::now());
                debug!(
                    engine = "iterative",
                    roots = self.graph.vertex_count(),
                    edges = self.graph.edge_count(),
                    "classify_start"
                );
                self.next_root();
            }
            EngineState::RootExhausted => self.next_root(),
            EngineState::Running => match self.stack.pop() {
                Some(frame) => {
                    self.step(frame);
                    if self.stack.is_empty() {
                        debug!(finished = self.ctx.order().len(), "root_exhausted");
                        self.state = EngineState::RootExhausted;
                    }
                }
                None => self.state = EngineState::RootExhausted,
            },
        }
        self.steps += 1;
        self.state
    }

    /// Advance until [`EngineState::Done`] and hand back the context.
    pub fn run(mut self) -> TraversalContext<V> {
        while self.advance() != EngineState::Done {}
        self.ctx
    }

    /// Lazily yield classifications as the engine makes them.
    pub fn into_edge_stream(self) -> EdgeStream<'g, V> {
        EdgeStream {
            engine: self,
            cursor: 0,
        }
    }

    /// Give up on the remaining work and keep what has been computed so far.
    pub fn into_context(self) -> TraversalContext<V> {
        self.ctx
    }

    fn next_root(&mut self) {
        let ctx = &self.ctx;
        match self.roots.by_ref().find(|root| !ctx.is_discovered(root)) {
            Some(root) => {
                self.stack.push(Frame::Enter {
                    vertex: root.clone(),
                    parent: None,
                });
                self.state = EngineState::Running;
            }
            None => {
                self.state = EngineState::Done;
                let counts = self.ctx.counts();
                info!(
                    engine = "iterative",
                    vertices = self.ctx.vertex_count(),
                    edges = counts.total(),
                    back = counts.back,
                    steps = self.steps,
                    duration_us = self
                        .started
                        .map(|s| s.elapsed().as_micros() as u64)
                        .unwrap_or_default(),
                    "classify_complete"
                );
            }
        }
    }

    fn step(&mut self, frame: Frame<V>) {
        match frame {
            Frame::Enter { vertex, parent } => {
                if self.ctx.is_discovered(&vertex) {
                    // Only undiscovered successors are ever entered.
                    error!(stack_depth = self.stack.len(), "duplicate_enter_frame");
                    return;
                }
                let start = self.ctx.discover(vertex.clone(), parent);
                trace!(start, stack_depth = self.stack.len(), "vertex_discovered");
                self.stack.push(Frame::Leave {
                    vertex: vertex.clone(),
                });
                self.stack.push(Frame::Scan { vertex, next: 0 });
            }
            Frame::Scan { vertex, next } => {
                let graph = self.graph;
                for (index, successor) in graph.neighbors(&vertex).iter().enumerate().skip(next) {
                    match classify_edge(&self.ctx, &vertex, successor) {
                        EdgeKind::Tree => {
                            self.stack.push(Frame::Scan {
                                vertex: vertex.clone(),
                                next: index + 1,
                            });
                            self.stack.push(Frame::Enter {
                                vertex: successor.clone(),
                                parent: Some(vertex),
                            });
                            return;
                        }
                        kind => {
                            self.ctx.record(vertex.clone(), successor.clone(), kind);
                        }
                    }
                }
            }
            Frame::Leave { vertex } => {
                self.ctx.finish(vertex);
            }
        }
    }
}

/// Iterator over classifications, advancing the engine only as far as needed.
///
/// Dropping the stream part-way leaves nothing inconsistent behind; the engine
/// can be recovered with [`EdgeStream::into_engine`] and resumed.
pub struct EdgeStream<'g, V> {
    engine: IterativeEngine<'g, V>,
    cursor: usize,
}

impl<'g, V> EdgeStream<'g, V>
where
    V: Clone + Eq + Hash,
{
    pub fn engine(&self) -> &IterativeEngine<'g, V> {
        &self.engine
    }

    pub fn into_engine(self) -> IterativeEngine<'g, V> {
        self.engine
    }
}

impl<V> Iterator for EdgeStream<'_, V>
where
    V: Clone + Eq + Hash,
{
    type Item = ClassifiedEdge<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(edge) = self.engine.ctx.classified_at(self.cursor) {
                self.cursor += 1;
                return Some(edge);
            }
            if self.engine.advance() == EngineState::Done
                && self.cursor >= self.engine.ctx.edge_count()
            {
                return None;
            }
        }
    }
}
