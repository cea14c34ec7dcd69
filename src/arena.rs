//! Arena-based tree representation of an organizational hierarchy.
//!
//! Uses generational arena for memory-safe node references and O(1) lookups.
//! Nodes own a deep copy of their source record, so the tree and the linear
//! store it was built from remain usable independently.

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::record::{NodeId, NodeRecord};

/// Tree node: one record plus materialized parent/children links.
#[derive(Debug, Clone)]
pub struct OrgNode {
    /// Source record, payload included
    pub record: NodeRecord,
    /// Index of the parent node, None for the root
    pub parent: Option<Index>,
    /// Child node indices, in source-store order
    pub children: Vec<Index>,
}

impl OrgNode {
    pub fn id(&self) -> NodeId {
        self.record.id
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Rooted tree over an arena of [`OrgNode`]s.
///
/// `insert_node` can only attach a freshly inserted node to an already
/// existing parent, so a materialized tree cannot contain parent-link
/// cycles; malformed input is rejected earlier, by the builder.
#[derive(Debug, Clone)]
pub struct OrgTree {
    arena: Arena<OrgNode>,
    root: Option<Index>,
}

impl Default for OrgTree {
    fn default() -> Self {
        Self::new()
    }
}

impl OrgTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert a node under `parent`, or as the root when `parent` is None.
    #[instrument(level = "trace", skip(self, record))]
    pub fn insert_node(&mut self, record: NodeRecord, parent: Option<Index>) -> Index {
        let node = OrgNode {
            record,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&OrgNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut OrgNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Preorder traversal, children in insertion order.
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator {
        PostOrderIterator::new(self)
    }

    /// Maximum number of edges from the root to its deepest descendant.
    ///
    /// An empty tree and a single-node tree both have depth 0.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.root.map_or(0, |root| self.depth_below(root))
    }

    /// Depth relative to `node_idx`, not the tree-wide depth: a leaf is 0
    /// even when it sits far below the root.
    pub fn depth_below(&self, node_idx: Index) -> usize {
        match self.get_node(node_idx) {
            Some(node) => node
                .children
                .iter()
                .map(|&child| self.depth_below(child))
                .max()
                .map_or(0, |d| d + 1),
            None => 0,
        }
    }

    /// Ids of all leaf nodes, in preorder.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.id())
            .collect()
    }

    /// Flatten back to the linear form, preorder.
    ///
    /// Records come back unchanged, so the id set and payloads of a
    /// built tree round-trip to its source store.
    #[instrument(level = "debug", skip(self))]
    pub fn to_records(&self) -> Vec<NodeRecord> {
        self.iter().map(|(_, node)| node.record.clone()).collect()
    }
}

pub struct TreeIterator<'a> {
    tree: &'a OrgTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a OrgTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a OrgNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a OrgTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a OrgTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a OrgNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, expanded)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if !expanded {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
