use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::{MapEdge, MapNode, StrokeKind};

/// Fills in the edge set from hierarchy hints and deduplicates by
/// (source, target). Explicit edges win; a hint-derived edge is added only
/// when its pair is not already present. Idempotent: running the
/// synthesizer on its own output changes nothing.
pub fn synthesize_edges(
    nodes: &HashMap<String, MapNode>,
    order: &[String],
    explicit: Vec<MapEdge>,
) -> Vec<MapEdge> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(explicit.len());
    let mut edges: Vec<MapEdge> = Vec::with_capacity(explicit.len());

    for edge in explicit {
        if !seen.insert((edge.source.clone(), edge.target.clone())) {
            continue;
        }
        edges.push(edge);
    }

    let explicit_count = edges.len();

    for id in order {
        let Some(node) = nodes.get(id) else { continue };
        for parent in &node.parents {
            if nodes.contains_key(parent) {
                push_hint_edge(&mut seen, &mut edges, parent, id);
            }
        }
        for child in &node.children {
            if nodes.contains_key(child) {
                push_hint_edge(&mut seen, &mut edges, id, child);
            }
        }
    }

    debug!(
        explicit = explicit_count,
        synthesized = edges.len() - explicit_count,
        "edge set resolved"
    );

    edges
}

fn push_hint_edge(
    seen: &mut HashSet<(String, String)>,
    edges: &mut Vec<MapEdge>,
    source: &str,
    target: &str,
) {
    if !seen.insert((source.to_string(), target.to_string())) {
        return;
    }
    edges.push(MapEdge {
        id: format!("{source}->{target}"),
        source: source.to_string(),
        target: target.to_string(),
        label: None,
        kind: StrokeKind::Connection,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, parents: &[&str], children: &[&str]) -> MapNode {
        MapNode {
            id: id.to_string(),
            label: id.to_string(),
            definition: None,
            hint_depth: 2,
            parents: parents.iter().map(|s| s.to_string()).collect(),
            children: children.iter().map(|s| s.to_string()).collect(),
            tags: Vec::new(),
            color: None,
        }
    }

    fn index(nodes: &[MapNode]) -> (HashMap<String, MapNode>, Vec<String>) {
        let order: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();
        let map = nodes.iter().map(|n| (n.id.clone(), n.clone())).collect();
        (map, order)
    }

    fn edge(source: &str, target: &str) -> MapEdge {
        MapEdge {
            id: format!("{source}->{target}"),
            source: source.to_string(),
            target: target.to_string(),
            label: None,
            kind: StrokeKind::Connection,
        }
    }

    #[test]
    fn derives_edges_from_hints_when_none_are_explicit() {
        let (nodes, order) = index(&[
            node("root", &[], &[]),
            node("a", &["root"], &[]),
            node("b", &[], &["a"]),
        ]);

        let edges = synthesize_edges(&nodes, &order, Vec::new());
        let pairs: Vec<(&str, &str)> = edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();

        assert_eq!(pairs, vec![("root", "a"), ("b", "a")]);
    }

    #[test]
    fn explicit_edges_suppress_matching_hints() {
        let (nodes, order) = index(&[node("root", &[], &[]), node("a", &["root"], &[])]);
        let labeled = MapEdge {
            label: Some("relates to".to_string()),
            ..edge("root", "a")
        };

        let edges = synthesize_edges(&nodes, &order, vec![labeled]);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].label.as_deref(), Some("relates to"));
    }

    #[test]
    fn never_produces_duplicate_pairs() {
        let (nodes, order) = index(&[
            node("root", &[], &["a"]),
            node("a", &["root"], &[]),
        ]);

        let edges = synthesize_edges(
            &nodes,
            &order,
            vec![edge("root", "a"), edge("root", "a")],
        );

        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn hint_to_unknown_node_is_ignored() {
        let (nodes, order) = index(&[node("a", &["ghost"], &["phantom"])]);
        let edges = synthesize_edges(&nodes, &order, Vec::new());
        assert!(edges.is_empty());
    }

    #[test]
    fn rerunning_on_own_output_is_identity() {
        let (nodes, order) = index(&[
            node("root", &[], &["a", "b"]),
            node("a", &["root"], &[]),
            node("b", &["root"], &["c"]),
            node("c", &[], &[]),
        ]);

        let first = synthesize_edges(&nodes, &order, vec![edge("root", "a")]);
        let second = synthesize_edges(&nodes, &order, first.clone());

        assert_eq!(first, second);
    }
}
