//! Subtree snapshot of the hierarchy, for display

use termtree::Tree;

use crate::domain::{Node, NodeTypes};

/// A node with its descendants, children in ascending id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficeTree {
    pub node: Node,
    pub children: Vec<OfficeTree>,
}

impl OfficeTree {
    pub fn leaf(node: Node) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, root included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(OfficeTree::node_count).sum::<usize>()
    }

    /// Render as a `termtree`, tagging offices and employees.
    pub fn to_tree_string(&self, types: &NodeTypes) -> Tree<String> {
        let leaves: Vec<_> = self
            .children
            .iter()
            .map(|c| c.to_tree_string(types))
            .collect();
        Tree::new(label(&self.node, types)).with_leaves(leaves)
    }
}

fn label(node: &Node, types: &NodeTypes) -> String {
    if node.has_type(types.office) {
        format!("{} [office #{}]", node.name, node.id)
    } else if node.has_type(types.employee) {
        format!("{} (#{})", node.name, node.id)
    } else {
        format!("{} #{} type={}", node.name, node.id, node.node_type)
    }
}
