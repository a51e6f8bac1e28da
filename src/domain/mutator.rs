//! Copy-on-write edits on a forest.
//!
//! Every edit borrows the current forest and returns a new one; the input is
//! never touched. Edits that cannot apply (unknown id, parent with children,
//! first sibling, top-level node) leave the forest as it was. The `try_*`
//! variants report why through [`Edit`], the plain variants only return the
//! resulting forest.

use thiserror::Error;
use tracing::{instrument, trace};

use crate::domain::entities::{Forest, Node, Symbol};
use crate::domain::locator::{find, find_layer_prev, find_parent};

/// Why an edit left the forest unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Refusal {
    #[error("item not found: {0}")]
    NotFound(String),

    #[error("item has children, use force to delete the subtree: {0}")]
    HasChildren(String),

    #[error("item is first in its layer: {0}")]
    FirstInLayer(String),

    #[error("item is already at the top level: {0}")]
    TopLevel(String),
}

/// Outcome of a structural edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Applied(Forest),
    Refused(Refusal),
}

impl Edit {
    pub fn is_applied(&self) -> bool {
        matches!(self, Edit::Applied(_))
    }

    pub fn refusal(&self) -> Option<&Refusal> {
        match self {
            Edit::Applied(_) => None,
            Edit::Refused(reason) => Some(reason),
        }
    }

    /// Resulting forest; a refused edit yields a copy of `original`.
    pub fn into_forest(self, original: &[Node]) -> Forest {
        match self {
            Edit::Applied(forest) => forest,
            Edit::Refused(_) => original.to_vec(),
        }
    }
}

/// Replace the node `target` with whatever `f` returns for it.
///
/// `f` may return one node (update), none (delete) or several (insert
/// after). Ancestors of the target are rebuilt around their updated
/// children. An unknown `target` yields a forest equal to the input.
pub fn update_at<F>(forest: &[Node], target: &str, mut f: F) -> Forest
where
    F: FnMut(&Node) -> Vec<Node>,
{
    update_list(forest, target, &mut f)
}

fn update_list<F>(list: &[Node], target: &str, f: &mut F) -> Forest
where
    F: FnMut(&Node) -> Vec<Node>,
{
    let mut out = Vec::with_capacity(list.len());
    for node in list {
        if node.id == target {
            out.extend(f(node));
        } else if node.has_children() {
            out.push(node.with_children(update_list(&node.children, target, f)));
        } else {
            out.push(node.clone());
        }
    }
    out
}

/// Apply `f` to the target if it exists.
fn edit_existing<F>(forest: &[Node], id: &str, f: F) -> Edit
where
    F: FnMut(&Node) -> Vec<Node>,
{
    if find(forest, id).is_err() {
        trace!(id, "edit refused: not found");
        return Edit::Refused(Refusal::NotFound(id.to_string()));
    }
    Edit::Applied(update_at(forest, id, f))
}

pub fn try_update_text(forest: &[Node], id: &str, text: &str) -> Edit {
    edit_existing(forest, id, |node| {
        vec![Node {
            text: text.to_string(),
            ..node.clone()
        }]
    })
}

pub fn update_text(forest: &[Node], id: &str, text: &str) -> Forest {
    try_update_text(forest, id, text).into_forest(forest)
}

pub fn try_update_symbol(forest: &[Node], id: &str, symbol: Symbol) -> Edit {
    edit_existing(forest, id, |node| vec![Node { symbol, ..node.clone() }])
}

/// Change the cosmetic marker of a node.
pub fn update_symbol(forest: &[Node], id: &str, symbol: Symbol) -> Forest {
    try_update_symbol(forest, id, symbol).into_forest(forest)
}

pub fn try_toggle_expanded(forest: &[Node], id: &str) -> Edit {
    edit_existing(forest, id, |node| {
        vec![Node {
            is_expanded: !node.is_expanded,
            ..node.clone()
        }]
    })
}

pub fn toggle_expanded(forest: &[Node], id: &str) -> Forest {
    try_toggle_expanded(forest, id).into_forest(forest)
}

pub fn try_update_children(forest: &[Node], id: &str, children: &[Node]) -> Edit {
    edit_existing(forest, id, |node| vec![node.with_children(children.to_vec())])
}

/// Replace the children of `id` wholesale, e.g. to re-attach a stored subtree.
pub fn update_children(forest: &[Node], id: &str, children: &[Node]) -> Forest {
    try_update_children(forest, id, children).into_forest(forest)
}

#[instrument(level = "trace", skip(forest))]
pub fn try_delete_item(forest: &[Node], id: &str, force: bool) -> Edit {
    let node = match find(forest, id) {
        Ok(node) => node,
        Err(_) => return Edit::Refused(Refusal::NotFound(id.to_string())),
    };
    if node.has_children() && !force {
        trace!(id, "delete refused: node has children");
        return Edit::Refused(Refusal::HasChildren(id.to_string()));
    }
    Edit::Applied(update_at(forest, id, |_| Vec::new()))
}

/// Remove `id`. A node with children is only removed with `force`, taking
/// its whole subtree along.
pub fn delete_item(forest: &[Node], id: &str, force: bool) -> Forest {
    try_delete_item(forest, id, force).into_forest(forest)
}

#[instrument(level = "trace", skip(forest))]
pub fn try_add_item(forest: &[Node], id: &str, new_id: &str) -> Edit {
    edit_existing(forest, id, |node| {
        if node.has_children() && node.is_expanded {
            let mut children = Vec::with_capacity(node.children.len() + 1);
            children.push(Node::new(new_id));
            children.extend(node.children.iter().cloned());
            vec![node.with_children(children)]
        } else {
            vec![node.clone(), Node::new(new_id)]
        }
    })
}

/// Enter on `id`: an expanded parent gets a new first child, anything else
/// gets a new sibling right after it.
pub fn add_item(forest: &[Node], id: &str, new_id: &str) -> Forest {
    try_add_item(forest, id, new_id).into_forest(forest)
}

pub fn try_add_after_item(forest: &[Node], id: &str, node: Node) -> Edit {
    let mut pending = Some(node);
    edit_existing(forest, id, |target| {
        let mut out = vec![target.clone()];
        out.extend(pending.take());
        out
    })
}

/// Insert an existing `node` as the sibling right after `id`.
pub fn add_after_item(forest: &[Node], id: &str, node: Node) -> Forest {
    try_add_after_item(forest, id, node).into_forest(forest)
}

pub fn try_add_as_last_child(forest: &[Node], id: &str, node: Node) -> Edit {
    let mut pending = Some(node);
    edit_existing(forest, id, |target| {
        let mut children = target.children.clone();
        children.extend(pending.take());
        vec![target.with_children(children)]
    })
}

pub fn add_as_last_child(forest: &[Node], id: &str, node: Node) -> Forest {
    try_add_as_last_child(forest, id, node).into_forest(forest)
}

#[instrument(level = "trace", skip(forest))]
pub fn try_indent_item(forest: &[Node], id: &str, new_id: &str) -> Edit {
    let target = match find(forest, id) {
        Ok(node) => node,
        Err(_) => return Edit::Refused(Refusal::NotFound(id.to_string())),
    };
    let prev_id = match find_layer_prev(forest, id) {
        Ok(prev) => prev,
        Err(_) => {
            trace!(id, "indent refused: first in layer");
            return Edit::Refused(Refusal::FirstInLayer(id.to_string()));
        }
    };
    let moved = target.renamed(new_id);
    let without = update_at(forest, id, |_| Vec::new());
    try_add_as_last_child(&without, prev_id, moved)
}

/// Move `id` with its subtree under its previous sibling, as the last child.
/// The moved node is re-identified as `new_id`.
pub fn indent_item(forest: &[Node], id: &str, new_id: &str) -> Forest {
    try_indent_item(forest, id, new_id).into_forest(forest)
}

#[instrument(level = "trace", skip(forest))]
pub fn try_outdent_item(forest: &[Node], id: &str, new_id: &str) -> Edit {
    let target = match find(forest, id) {
        Ok(node) => node,
        Err(_) => return Edit::Refused(Refusal::NotFound(id.to_string())),
    };
    let parent_id = match find_parent(forest, id) {
        Ok(parent) => parent,
        Err(_) => {
            trace!(id, "outdent refused: top level");
            return Edit::Refused(Refusal::TopLevel(id.to_string()));
        }
    };
    let moved = target.renamed(new_id);
    let without = update_at(forest, id, |_| Vec::new());
    try_add_after_item(&without, parent_id, moved)
}

/// Move `id` with its subtree out of its parent, right after the parent.
/// The moved node is re-identified as `new_id`.
pub fn outdent_item(forest: &[Node], id: &str, new_id: &str) -> Forest {
    try_outdent_item(forest, id, new_id).into_forest(forest)
}

#[instrument(level = "trace", skip(forest))]
pub fn try_swap_with_previous(forest: &[Node], id: &str, new_id: &str) -> Edit {
    match swap_in_layer(forest, id, new_id) {
        Some(swapped) => Edit::Applied(swapped),
        None if find(forest, id).is_err() => Edit::Refused(Refusal::NotFound(id.to_string())),
        None => {
            trace!(id, "swap refused: first in layer");
            Edit::Refused(Refusal::FirstInLayer(id.to_string()))
        }
    }
}

fn swap_in_layer(list: &[Node], id: &str, new_id: &str) -> Option<Forest> {
    if let Some(index) = list.iter().position(|node| node.id == id) {
        if index > 0 {
            let mut items = list.to_vec();
            items[index].id = new_id.to_string();
            items.swap(index - 1, index);
            return Some(items);
        }
    }
    for (index, node) in list.iter().enumerate() {
        if let Some(children) = swap_in_layer(&node.children, id, new_id) {
            let mut items = list.to_vec();
            items[index] = node.with_children(children);
            return Some(items);
        }
    }
    None
}

/// Exchange `id` with the sibling right before it. The moved node is
/// re-identified as `new_id`; a first sibling stays put.
pub fn swap_with_previous(forest: &[Node], id: &str, new_id: &str) -> Forest {
    try_swap_with_previous(forest, id, new_id).into_forest(forest)
}
