use std::collections::{HashMap, HashSet, VecDeque};
use tracing::trace;

use crate::MindMap;

/// Assigns every node an integer hierarchy level.
///
/// Roots are the nodes whose hint depth is zero or whose parent set is
/// empty; they resolve to depth 0. Expansion is breadth-first: a child
/// reached from a node at depth `d` resolves to `max(d + 1, hint)`, so
/// depth never regresses below one more than the shallowest reached
/// parent, while an author's minimum-depth intent still holds for deeper
/// hints. A back-edge to an already-visited node is a no-op, so cycles
/// terminate. Nodes the traversal never reaches keep their own hint depth.
pub fn resolve_depths(map: &MindMap) -> HashMap<String, usize> {
    let mut depths: HashMap<String, usize> = HashMap::with_capacity(map.order.len());
    let mut visited: HashSet<&str> = HashSet::with_capacity(map.order.len());
    let mut queue: VecDeque<&str> = VecDeque::new();

    for id in &map.order {
        let Some(node) = map.nodes.get(id) else { continue };
        let parentless = map.parents_of.get(id).map_or(true, |p| p.is_empty());
        if node.hint_depth == 0 || parentless {
            depths.insert(id.clone(), 0);
            visited.insert(id.as_str());
            queue.push_back(id.as_str());
        }
    }

    while let Some(id) = queue.pop_front() {
        let level = depths.get(id).copied().unwrap_or(0);
        let Some(children) = map.children_of.get(id) else {
            continue;
        };

        for child in children {
            if visited.contains(child.as_str()) {
                continue;
            }
            let hint = map.nodes.get(child).map_or(0, |n| n.hint_depth);
            if hint > level + 1 {
                trace!(
                    node = child.as_str(),
                    hint,
                    structural = level + 1,
                    "hint depth deeper than structural minimum"
                );
            }
            depths.insert(child.clone(), (level + 1).max(hint));
            visited.insert(child.as_str());
            queue.push_back(child.as_str());
        }
    }

    for id in &map.order {
        if !visited.contains(id.as_str()) {
            let hint = map.nodes.get(id).map_or(0, |n| n.hint_depth);
            depths.insert(id.clone(), hint);
        }
    }

    depths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MindMap, RawEdge, RawNode};
    use serde_json::json;

    fn raw_node(id: &str, importance: Option<&str>, parents: &[&str]) -> RawNode {
        RawNode {
            id: Some(json!(id)),
            importance: importance.map(str::to_string),
            parents: parents.iter().map(|p| json!(p)).collect(),
            ..RawNode::default()
        }
    }

    fn raw_edge(source: &str, target: &str) -> RawEdge {
        RawEdge {
            source: Some(json!(source)),
            target: Some(json!(target)),
            ..RawEdge::default()
        }
    }

    #[test]
    fn hint_chain_resolves_monotonically() {
        let map = MindMap::from_parts(
            vec![
                raw_node("root", Some("core"), &[]),
                raw_node("a", Some("supporting"), &["root"]),
                raw_node("b", None, &["a"]),
            ],
            Vec::new(),
            String::new(),
        );

        let depths = resolve_depths(&map);
        assert_eq!(depths["root"], 0);
        assert_eq!(depths["a"], 1);
        assert_eq!(depths["b"], 2);
    }

    #[test]
    fn child_depth_exceeds_parent_depth_for_traversed_edges() {
        let map = MindMap::from_parts(
            vec![
                raw_node("root", Some("core"), &[]),
                raw_node("a", None, &["root"]),
                raw_node("b", None, &["a"]),
                raw_node("c", None, &["b"]),
            ],
            Vec::new(),
            String::new(),
        );

        let depths = resolve_depths(&map);
        for edge in &map.edges {
            let parent = depths[&edge.source];
            let child = depths[&edge.target];
            assert!(
                child >= parent + 1,
                "edge {} -> {} resolved {parent} -> {child}",
                edge.source,
                edge.target
            );
        }
    }

    #[test]
    fn deeper_hint_wins_over_structural_minimum() {
        let map = MindMap::from_parts(
            vec![
                raw_node("root", Some("core"), &[]),
                RawNode {
                    id: Some(json!("far")),
                    depth: Some(5),
                    parents: vec![json!("root")],
                    ..RawNode::default()
                },
            ],
            Vec::new(),
            String::new(),
        );

        assert_eq!(resolve_depths(&map)["far"], 5);
    }

    #[test]
    fn shallow_hint_is_overridden_by_structure() {
        let map = MindMap::from_parts(
            vec![
                raw_node("root", Some("core"), &[]),
                raw_node("a", None, &["root"]),
                RawNode {
                    id: Some(json!("b")),
                    depth: Some(1),
                    parents: vec![json!("a")],
                    ..RawNode::default()
                },
            ],
            Vec::new(),
            String::new(),
        );

        let depths = resolve_depths(&map);
        assert_eq!(depths["b"], depths["a"] + 1);
    }

    #[test]
    fn three_cycle_terminates_with_one_depth_each() {
        let map = MindMap::from_parts(
            vec![
                raw_node("a", None, &[]),
                raw_node("b", None, &[]),
                raw_node("c", None, &[]),
            ],
            vec![raw_edge("a", "b"), raw_edge("b", "c"), raw_edge("c", "a")],
            String::new(),
        );

        let depths = resolve_depths(&map);
        assert_eq!(depths.len(), 3);
        for id in ["a", "b", "c"] {
            assert!(depths.contains_key(id));
        }
    }

    #[test]
    fn back_edge_does_not_regress_depth() {
        let map = MindMap::from_parts(
            vec![
                raw_node("root", Some("core"), &[]),
                raw_node("a", None, &["root"]),
            ],
            vec![raw_edge("a", "root")],
            String::new(),
        );

        let depths = resolve_depths(&map);
        assert_eq!(depths["root"], 0);
        assert!(depths["a"] >= 1);
    }

    #[test]
    fn unreached_cycle_falls_back_to_hint_depth() {
        let map = MindMap::from_parts(
            vec![
                RawNode {
                    id: Some(json!("x")),
                    depth: Some(3),
                    parents: vec![json!("y")],
                    ..RawNode::default()
                },
                RawNode {
                    id: Some(json!("y")),
                    depth: Some(4),
                    parents: vec![json!("x")],
                    ..RawNode::default()
                },
            ],
            Vec::new(),
            String::new(),
        );

        let depths = resolve_depths(&map);
        assert_eq!(depths["x"], 3);
        assert_eq!(depths["y"], 4);
    }
}
