use std::fmt;

use generational_arena::Index;
use termtree::Tree;

use crate::arena::OrgTree;

/// Conversion into a printable [`termtree::Tree`].
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for OrgTree {
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root_idx) => {
                let mut tree = Tree::new(node_label(self, root_idx));
                push_children(self, root_idx, &mut tree);
                tree
            }
            None => Tree::new("(empty tree)".to_string()),
        }
    }
}

fn push_children(tree: &OrgTree, node_idx: Index, out: &mut Tree<String>) {
    if let Some(node) = tree.get_node(node_idx) {
        for &child_idx in &node.children {
            let mut child_tree = Tree::new(node_label(tree, child_idx));
            push_children(tree, child_idx, &mut child_tree);
            out.push(child_tree);
        }
    }
}

// Label from the record payload (name, then title), falling back to the id.
fn node_label(tree: &OrgTree, node_idx: Index) -> String {
    tree.get_node(node_idx)
        .map(|node| {
            node.record
                .label()
                .map(str::to_string)
                .unwrap_or_else(|| node.record.id.to_string())
        })
        .unwrap_or_default()
}

impl fmt::Display for OrgTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}
