//! Positional lookups: node by id, parent, same-layer predecessor, breadcrumb.
//!
//! All lookups ignore `is_expanded`.

use crate::domain::entities::Node;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::traversal::{find_prev_in, flat_order};

/// One step of a breadcrumb path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub id: String,
    pub text: String,
}

impl From<&Node> for Crumb {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            text: node.text.clone(),
        }
    }
}

/// Pre-order search for the node with `id`.
pub fn find<'a>(forest: &'a [Node], id: &str) -> DomainResult<&'a Node> {
    find_node(forest, id).ok_or_else(|| DomainError::not_found(id))
}

fn find_node<'a>(list: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in list {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Id of the node whose direct children contain `id`.
///
/// Root-level ids have no parent and yield `NotFound`.
pub fn find_parent<'a>(forest: &'a [Node], id: &str) -> DomainResult<&'a str> {
    parent_of(forest, id).ok_or_else(|| DomainError::not_found(id))
}

fn parent_of<'a>(list: &'a [Node], id: &str) -> Option<&'a str> {
    for node in list {
        if node.children.iter().any(|child| child.id == id) {
            return Some(node.id.as_str());
        }
        if let Some(found) = parent_of(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Id of the sibling right before `id` in its own layer.
///
/// The current list is scanned flat first, then each node's children in
/// order. `NotFound` when `id` leads its layer or is absent.
pub(crate) fn find_layer_prev<'a>(forest: &'a [Node], id: &str) -> DomainResult<&'a str> {
    layer_prev(forest, id).ok_or_else(|| DomainError::not_found(id))
}

fn layer_prev<'a>(list: &'a [Node], id: &str) -> Option<&'a str> {
    if let Ok(prev) = find_prev_in(flat_order(list), id) {
        return Some(prev);
    }
    list.iter().find_map(|node| layer_prev(&node.children, id))
}

/// Path from the forest root down to and including `id`.
pub fn get_breadcrumb(forest: &[Node], id: &str) -> DomainResult<Vec<Crumb>> {
    let mut path = Vec::new();
    if collect_path(forest, id, &mut path) {
        Ok(path)
    } else {
        Err(DomainError::not_found(id))
    }
}

fn collect_path(list: &[Node], id: &str, path: &mut Vec<Crumb>) -> bool {
    for node in list {
        path.push(Crumb::from(node));
        if node.id == id || collect_path(&node.children, id, path) {
            return true;
        }
        path.pop();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn node(id: &str, text: &str, children: Vec<Node>) -> Node {
        let mut node = Node::new(id);
        node.text = text.to_string();
        node.children = children;
        node
    }

    // root1
    // ├── a
    // │   ├── a1
    // │   └── a2 (collapsed)
    // │       └── a2x
    // └── b
    // root2
    #[fixture]
    fn forest() -> Vec<Node> {
        let mut a2 = node("a2", "A2", vec![node("a2x", "A2X", vec![])]);
        a2.is_expanded = false;
        vec![
            node(
                "root1",
                "Root 1",
                vec![
                    node("a", "A", vec![node("a1", "A1", vec![]), a2]),
                    node("b", "B", vec![]),
                ],
            ),
            node("root2", "Root 2", vec![]),
        ]
    }

    #[rstest]
    #[case("root1")]
    #[case("a1")]
    #[case("a2x")]
    #[case("root2")]
    fn given_existing_id_when_find_then_returns_node(forest: Vec<Node>, #[case] id: &str) {
        assert_eq!(find(&forest, id).unwrap().id, id);
    }

    #[rstest]
    fn given_missing_id_when_find_then_not_found(forest: Vec<Node>) {
        assert_eq!(
            find(&forest, "nope").unwrap_err(),
            DomainError::NotFound("nope".into())
        );
    }

    #[rstest]
    #[case("a", Some("root1"))]
    #[case("a2", Some("a"))]
    #[case("a2x", Some("a2"))]
    #[case("root1", None)]
    #[case("root2", None)]
    #[case("nope", None)]
    fn given_id_when_find_parent_then_matches(
        forest: Vec<Node>,
        #[case] id: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(find_parent(&forest, id).ok(), expected);
    }

    #[rstest]
    #[case("root2", Some("root1"))]
    #[case("b", Some("a"))]
    #[case("a2", Some("a1"))]
    #[case("root1", None)]
    #[case("a", None)]
    #[case("a1", None)]
    #[case("a2x", None)]
    #[case("nope", None)]
    fn given_id_when_find_layer_prev_then_matches(
        forest: Vec<Node>,
        #[case] id: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(find_layer_prev(&forest, id).ok(), expected);
    }

    #[rstest]
    fn given_nested_id_when_get_breadcrumb_then_root_first_path(forest: Vec<Node>) {
        let crumbs = get_breadcrumb(&forest, "a2x").unwrap();

        // depth 3 -> 4 entries
        assert_eq!(crumbs.len(), 4);
        let ids: Vec<&str> = crumbs.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["root1", "a", "a2", "a2x"]);
        let texts: Vec<&str> = crumbs.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Root 1", "A", "A2", "A2X"]);
    }

    #[rstest]
    fn given_root_id_when_get_breadcrumb_then_single_entry(forest: Vec<Node>) {
        let crumbs = get_breadcrumb(&forest, "root2").unwrap();
        assert_eq!(
            crumbs,
            vec![Crumb {
                id: "root2".into(),
                text: "Root 2".into()
            }]
        );
    }

    #[rstest]
    fn given_missing_id_when_get_breadcrumb_then_not_found(forest: Vec<Node>) {
        assert!(get_breadcrumb(&forest, "nope").is_err());
    }

    #[rstest]
    fn given_sibling_after_deep_subtree_when_get_breadcrumb_then_excludes_dead_ends(
        forest: Vec<Node>,
    ) {
        let crumbs = get_breadcrumb(&forest, "b").unwrap();
        let ids: Vec<&str> = crumbs.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["root1", "b"]);
    }
}
