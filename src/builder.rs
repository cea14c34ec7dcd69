//! Tree builder: materializes a rooted tree from a linear node store.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::arena::OrgTree;
use crate::errors::{InvalidArgumentError, MalformedTreeError, TreeResult};
use crate::record::{LinearStore, NodeId};

/// Constructs an [`OrgTree`] from flat parent-linked records.
///
/// The builder owns the validation of the store invariants: a non-empty
/// store, unique ids, resolvable parent references, exactly one root, and
/// no parent-link cycles. Children are attached in the order their records
/// appear in the store.
pub struct TreeBuilder {
    children_index: HashMap<Option<NodeId>, Vec<usize>>,
    visited: HashSet<NodeId>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            children_index: HashMap::new(),
            visited: HashSet::new(),
        }
    }

    /// Build the tree for `store`.
    ///
    /// The store is not consumed; records are deep-copied into the tree so
    /// both representations stay usable afterward.
    #[instrument(level = "debug", skip(self, store))]
    pub fn build(&mut self, store: &LinearStore) -> TreeResult<OrgTree> {
        if store.is_empty() {
            return Err(InvalidArgumentError::EmptyStore.into());
        }

        if let Some(dup) = store.iter().map(|r| r.id).duplicates().next() {
            return Err(MalformedTreeError::DuplicateId(dup).into());
        }

        let ids: HashSet<NodeId> = store.iter().map(|r| r.id).collect();
        for record in store {
            if let Some(parent) = record.parent_id {
                if !ids.contains(&parent) {
                    return Err(MalformedTreeError::DanglingParent {
                        child: record.id,
                        parent,
                    }
                    .into());
                }
            }
        }

        // Reset state for a fresh build
        self.children_index = store.children_index();
        self.visited.clear();

        let root_idx = self.find_root(store)?;
        let tree = self.materialize(store, root_idx)?;

        // Every record resolves to a parent and exactly one root exists, so
        // any record not reached from the root sits on a parent-link cycle.
        if tree.node_count() != store.len() {
            let stranded = store
                .iter()
                .find(|r| !self.visited.contains(&r.id))
                .map(|r| r.id)
                .unwrap_or(store.records()[root_idx].id);
            return Err(MalformedTreeError::CycleDetected(stranded).into());
        }

        debug!(nodes = tree.node_count(), depth = tree.depth(), "tree built");
        Ok(tree)
    }

    fn find_root(&self, store: &LinearStore) -> Result<usize, MalformedTreeError> {
        match self.children_index.get(&None).map(Vec::as_slice) {
            None | Some([]) => Err(MalformedTreeError::MissingRoot),
            Some(&[root_idx]) => Ok(root_idx),
            Some(roots) => Err(MalformedTreeError::MultipleRoots(roots.len())),
        }
    }

    fn materialize(&mut self, store: &LinearStore, root_idx: usize) -> TreeResult<OrgTree> {
        let mut tree = OrgTree::new();
        let mut stack = vec![(root_idx, None)];

        while let Some((record_idx, parent_idx)) = stack.pop() {
            let record = &store.records()[record_idx];
            if !self.visited.insert(record.id) {
                return Err(MalformedTreeError::CycleDetected(record.id).into());
            }

            let node_idx = tree.insert_node(record.clone(), parent_idx);

            if let Some(children) = self.children_index.get(&Some(record.id)) {
                // Reverse push keeps each node's children in store order:
                // siblings attach to the same parent in pop order.
                for &child_idx in children.iter().rev() {
                    stack.push((child_idx, Some(node_idx)));
                }
            }
        }

        Ok(tree)
    }
}

/// Convenience wrapper around [`TreeBuilder::build`].
pub fn build_tree(store: &LinearStore) -> TreeResult<OrgTree> {
    TreeBuilder::new().build(store)
}
