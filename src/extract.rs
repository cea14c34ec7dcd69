//! Depth-bounded extraction: pruned copies of a tree or a linear store.
//!
//! Levels are 1-based: the root (or each node matching the queried parent)
//! sits at level 1, its children at level 2, and so on. Nodes exactly at
//! the limit are kept with their children pruned; everything deeper is
//! dropped.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::instrument;

use crate::arena::OrgTree;
use crate::errors::{InvalidArgumentError, TreeResult};
use crate::record::{LinearStore, NodeId, NodeRecord};

/// Copy `tree` down to `max_level` levels.
///
/// The input is not mutated. An empty tree extracts to an empty tree
/// ("no node" propagates rather than failing). `max_level` below 1 is
/// rejected with [`InvalidArgumentError::DepthLimitTooSmall`].
///
/// Extraction is idempotent: extracting an already extracted tree at the
/// same level returns an identical tree.
#[instrument(level = "debug", skip(tree))]
pub fn extract_to_depth(tree: &OrgTree, max_level: usize) -> TreeResult<OrgTree> {
    if max_level < 1 {
        return Err(InvalidArgumentError::DepthLimitTooSmall(max_level).into());
    }

    let mut pruned = OrgTree::new();
    if let Some(root) = tree.root() {
        copy_levels(tree, root, 1, max_level, None, &mut pruned);
    }
    Ok(pruned)
}

fn copy_levels(
    src: &OrgTree,
    src_idx: Index,
    level: usize,
    max_level: usize,
    parent: Option<Index>,
    dst: &mut OrgTree,
) {
    let Some(node) = src.get_node(src_idx) else {
        return;
    };

    let new_idx = dst.insert_node(node.record.clone(), parent);
    if level < max_level {
        for &child in &node.children {
            copy_levels(src, child, level + 1, max_level, Some(new_idx), dst);
        }
    }
}

/// Flat sub-list of the records reachable from `parent_id` within
/// `max_level` levels.
///
/// Records come back unchanged, ordered depth-first root-then-descendants,
/// with siblings in store order. `extract_to_depth_linear(store, 1, None)`
/// is the root record alone.
#[instrument(level = "debug", skip(store))]
pub fn extract_to_depth_linear(
    store: &LinearStore,
    max_level: usize,
    parent_id: Option<NodeId>,
) -> TreeResult<Vec<NodeRecord>> {
    if max_level < 1 {
        return Err(InvalidArgumentError::DepthLimitTooSmall(max_level).into());
    }

    let children = store.children_index();
    let mut result = Vec::new();
    collect_levels(store, &children, parent_id, 1, max_level, &mut result);
    Ok(result)
}

fn collect_levels(
    store: &LinearStore,
    children: &HashMap<Option<NodeId>, Vec<usize>>,
    parent_id: Option<NodeId>,
    level: usize,
    max_level: usize,
    result: &mut Vec<NodeRecord>,
) {
    if level > max_level {
        return;
    }

    let Some(matching) = children.get(&parent_id) else {
        return;
    };
    for &record_idx in matching {
        let record = &store.records()[record_idx];
        result.push(record.clone());
        collect_levels(store, children, Some(record.id), level + 1, max_level, result);
    }
}
