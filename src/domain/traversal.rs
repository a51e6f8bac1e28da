//! Lazy id sequences over a forest and neighbour search on them.

use std::slice;

use crate::domain::entities::Node;
use crate::domain::error::{DomainError, DomainResult};

/// Pre-order iterator over the ids a reader can currently see.
///
/// Children of a collapsed node are skipped. Every call to [`visible_order`]
/// starts a fresh walk; nothing is shared between iterators.
pub struct VisibleOrder<'a> {
    stack: Vec<slice::Iter<'a, Node>>,
}

impl<'a> VisibleOrder<'a> {
    fn new(forest: &'a [Node]) -> Self {
        Self {
            stack: vec![forest.iter()],
        }
    }
}

impl<'a> Iterator for VisibleOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(node) => {
                    if node.is_expanded && node.has_children() {
                        self.stack.push(node.children.iter());
                    }
                    return Some(node.id.as_str());
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

pub fn visible_order(forest: &[Node]) -> VisibleOrder<'_> {
    VisibleOrder::new(forest)
}

/// Ids of the given list only, without descending.
pub fn flat_order(list: &[Node]) -> impl Iterator<Item = &str> + '_ {
    list.iter().map(|node| node.id.as_str())
}

/// Element right before the first occurrence of `target`.
///
/// Stops scanning at the target.
pub fn find_prev_in<'a, I>(seq: I, target: &str) -> DomainResult<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut prev = None;
    for id in seq {
        if id == target {
            return prev.ok_or_else(|| DomainError::not_found(target));
        }
        prev = Some(id);
    }
    Err(DomainError::not_found(target))
}

/// Element right after the first occurrence of `target`.
pub fn find_next_in<'a, I>(seq: I, target: &str) -> DomainResult<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seq = seq.into_iter();
    for id in seq.by_ref() {
        if id == target {
            return seq.next().ok_or_else(|| DomainError::not_found(target));
        }
    }
    Err(DomainError::not_found(target))
}

/// Visible-order predecessor of `id`.
pub fn find_prev(forest: &[Node], id: &str) -> DomainResult<String> {
    find_prev_in(visible_order(forest), id).map(str::to_string)
}

/// Visible-order successor of `id`.
pub fn find_next(forest: &[Node], id: &str) -> DomainResult<String> {
    find_next_in(visible_order(forest), id).map(str::to_string)
}

/// Where focus goes after `id` is deleted: its visible predecessor, else the
/// first root, else nothing (empty string).
pub fn find_prev_for_delete(forest: &[Node], id: &str) -> String {
    find_prev(forest, id).unwrap_or_else(|_| {
        forest
            .first()
            .map(|node| node.id.clone())
            .unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn node(id: &str, children: Vec<Node>) -> Node {
        let mut node = Node::new(id);
        node.children = children;
        node
    }

    // A
    // ├── B
    // │   └── D
    // └── E
    // C
    #[fixture]
    fn forest() -> Vec<Node> {
        vec![
            node("A", vec![node("B", vec![node("D", vec![])]), node("E", vec![])]),
            node("C", vec![]),
        ]
    }

    #[rstest]
    fn given_expanded_forest_when_visible_order_then_preorder(forest: Vec<Node>) {
        let ids: Vec<&str> = visible_order(&forest).collect();
        assert_eq!(ids, vec!["A", "B", "D", "E", "C"]);
    }

    #[rstest]
    fn given_collapsed_node_when_visible_order_then_skips_descendants(mut forest: Vec<Node>) {
        forest[0].children[0].is_expanded = false;
        let ids: Vec<&str> = visible_order(&forest).collect();
        assert_eq!(ids, vec!["A", "B", "E", "C"]);
    }

    #[rstest]
    fn given_forest_when_iterated_twice_then_restarts(forest: Vec<Node>) {
        let first: Vec<&str> = visible_order(&forest).collect();
        let second: Vec<&str> = visible_order(&forest).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn given_empty_forest_when_visible_order_then_empty() {
        assert_eq!(visible_order(&[]).count(), 0);
    }

    #[rstest]
    fn given_list_when_flat_order_then_only_immediate_ids(forest: Vec<Node>) {
        let ids: Vec<&str> = flat_order(&forest).collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[rstest]
    #[case(vec!["a", "b", "c"], "b", Ok("a"))]
    #[case(vec!["a", "b", "c"], "c", Ok("b"))]
    #[case(vec!["a", "b", "c"], "a", Err(()))]
    #[case(vec!["a", "b", "c"], "x", Err(()))]
    #[case(vec![], "a", Err(()))]
    fn given_sequence_when_find_prev_in_then_matches(
        #[case] seq: Vec<&'static str>,
        #[case] target: &str,
        #[case] expected: Result<&str, ()>,
    ) {
        assert_eq!(find_prev_in(seq, target).map_err(|_| ()), expected);
    }

    #[rstest]
    #[case(vec!["a", "b", "c"], "a", Ok("b"))]
    #[case(vec!["a", "b", "c"], "b", Ok("c"))]
    #[case(vec!["a", "b", "c"], "c", Err(()))]
    #[case(vec!["a", "b", "c"], "x", Err(()))]
    fn given_sequence_when_find_next_in_then_matches(
        #[case] seq: Vec<&'static str>,
        #[case] target: &str,
        #[case] expected: Result<&str, ()>,
    ) {
        assert_eq!(find_next_in(seq, target).map_err(|_| ()), expected);
    }

    #[test]
    fn given_target_near_front_when_find_prev_in_then_stops_scanning() {
        let mut scanned = 0;
        let seq = ["a", "b", "c", "d"].into_iter().inspect(|_| scanned += 1);
        assert_eq!(find_prev_in(seq, "b").unwrap(), "a");
        assert_eq!(scanned, 2);
    }

    #[test]
    fn given_target_at_front_when_find_next_in_then_stops_after_successor() {
        let mut scanned = 0;
        let seq = ["a", "b", "c", "d"].into_iter().inspect(|_| scanned += 1);
        assert_eq!(find_next_in(seq, "a").unwrap(), "b");
        assert_eq!(scanned, 2);
    }

    #[test]
    fn given_missing_target_when_find_next_then_error_names_it() {
        let err = find_next(&[Node::new("a")], "zzz").unwrap_err();
        assert_eq!(err, DomainError::NotFound("zzz".into()));
    }

    #[test]
    fn given_collapsed_parent_when_find_next_then_skips_children() {
        // [{A, expanded, children:[B]}, {C}]
        let mut forest = vec![node("A", vec![node("B", vec![])]), node("C", vec![])];
        assert_eq!(find_next(&forest, "A").unwrap(), "B");
        assert_eq!(find_next(&forest, "B").unwrap(), "C");

        forest[0].is_expanded = false;
        assert_eq!(find_next(&forest, "A").unwrap(), "C");
        assert_eq!(find_prev(&forest, "C").unwrap(), "A");
    }

    #[rstest]
    fn given_nested_node_when_find_prev_then_returns_visible_predecessor(forest: Vec<Node>) {
        assert_eq!(find_prev(&forest, "E").unwrap(), "D");
        assert_eq!(find_prev(&forest, "C").unwrap(), "E");
        assert!(find_prev(&forest, "A").is_err());
    }

    #[rstest]
    fn given_first_node_when_find_prev_for_delete_then_falls_back_to_first_root(
        forest: Vec<Node>,
    ) {
        assert_eq!(find_prev_for_delete(&forest, "A"), "A");
        assert_eq!(find_prev_for_delete(&forest, "B"), "A");
        assert_eq!(find_prev_for_delete(&[], "A"), "");
    }
}
