//! Depth analysis over the linear representation.
//!
//! The tree form answers depth questions directly
//! ([`OrgTree::depth`](crate::arena::OrgTree::depth) and
//! [`OrgTree::depth_below`](crate::arena::OrgTree::depth_below)); this
//! module answers the same question over a flat store without building the
//! tree first.

use std::collections::{HashMap, HashSet};

use tracing::instrument;

use crate::errors::{MalformedTreeError, TreeResult};
use crate::record::{LinearStore, NodeId};

/// Maximum edge-depth below the node(s) whose parent reference equals
/// `parent_id`, each matching node counting as depth 0.
///
/// `linear_depth(store, None)` therefore equals the built tree's
/// [`depth`](crate::arena::OrgTree::depth) for any valid store: a store holding only a root is
/// depth 0, a root with one child is depth 1. No matching node yields 0.
///
/// Runs a single memoized post-order pass over a children-by-parent index,
/// so chains stay linear instead of re-walking every subtree per node. A
/// parent-link cycle reachable from `parent_id` fails with
/// [`MalformedTreeError::CycleDetected`] instead of recursing forever.
#[instrument(level = "debug", skip(store))]
pub fn linear_depth(store: &LinearStore, parent_id: Option<NodeId>) -> TreeResult<usize> {
    let children = store.children_index();
    let Some(roots) = children.get(&parent_id) else {
        return Ok(0);
    };

    let records = store.records();
    let mut depth_below: HashMap<NodeId, usize> = HashMap::new();
    let mut on_path: HashSet<NodeId> = HashSet::new();
    let mut stack: Vec<(usize, bool)> =
        roots.iter().rev().map(|&idx| (idx, false)).collect();

    while let Some((record_idx, expanded)) = stack.pop() {
        let id = records[record_idx].id;

        if expanded {
            on_path.remove(&id);
            let depth = children
                .get(&Some(id))
                .map(|kids| {
                    1 + kids
                        .iter()
                        .map(|&k| depth_below.get(&records[k].id).copied().unwrap_or(0))
                        .max()
                        .unwrap_or(0)
                })
                .unwrap_or(0);
            depth_below.insert(id, depth);
            continue;
        }

        if depth_below.contains_key(&id) {
            continue;
        }
        if !on_path.insert(id) {
            return Err(MalformedTreeError::CycleDetected(id).into());
        }

        stack.push((record_idx, true));
        if let Some(kids) = children.get(&Some(id)) {
            for &k in kids.iter().rev() {
                stack.push((k, false));
            }
        }
    }

    Ok(roots
        .iter()
        .map(|&idx| depth_below.get(&records[idx].id).copied().unwrap_or(0))
        .max()
        .unwrap_or(0))
}
