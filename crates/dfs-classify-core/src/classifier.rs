use std::hash::Hash;

use crate::context::{EdgeKind, TraversalContext};

/// Decide the kind of edge `from -> to` from the state recorded so far.
///
/// `from` must be open (discovered, not finished). The rule:
/// 1. `to` undiscovered: [`EdgeKind::Tree`], the caller must descend into `to`
///    before scanning the rest of `from`'s successors.
/// 2. `to` discovered but unfinished: [`EdgeKind::Back`]. Self-loops land here.
/// 3. `to` finished: [`EdgeKind::Forward`] if `from` was discovered first,
///    otherwise [`EdgeKind::Cross`].
///
/// Case 3 compares discovery times only. Finish times of still-open vertices
/// do not exist yet, so they are never consulted.
pub fn classify_edge<V>(ctx: &TraversalContext<V>, from: &V, to: &V) -> EdgeKind
where
    V: Clone + Eq + Hash,
{
    if !ctx.is_discovered(to) {
        return EdgeKind::Tree;
    }
    if !ctx.is_finished(to) {
        return EdgeKind::Back;
    }
    match (ctx.start_time(from), ctx.start_time(to)) {
        (Some(source), Some(target)) if source < target => EdgeKind::Forward,
        _ => EdgeKind::Cross,
    }
}
