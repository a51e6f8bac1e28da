//! Outline rendering for the terminal using termtree.

use termtree::Tree;

use crate::config::TreeDisplay;
use crate::domain::Node;

fn label(node: &Node, display: &TreeDisplay) -> String {
    let mut label = format!("{} {}", node.symbol.glyph(), node.text);
    if !node.is_expanded && node.has_children() {
        label.push(' ');
        label.push_str(&display.collapsed_marker);
    }
    if display.show_ids {
        label.push_str(&format!(" [{}]", node.id));
    }
    label
}

/// Tree for one node. Children of collapsed nodes are left out unless `all`.
pub fn to_tree(node: &Node, display: &TreeDisplay, all: bool) -> Tree<String> {
    let tree = Tree::new(label(node, display));
    if node.is_expanded || all {
        let leaves: Vec<_> = node
            .children
            .iter()
            .map(|child| to_tree(child, display, all))
            .collect();
        tree.with_leaves(leaves)
    } else {
        tree
    }
}

/// Whole forest, one tree per top-level node.
pub fn render_forest(forest: &[Node], display: &TreeDisplay, all: bool) -> String {
    forest
        .iter()
        .map(|node| to_tree(node, display, all).to_string())
        .collect()
}
