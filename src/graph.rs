use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::synth::synthesize_edges;
use crate::StrokeKind;

/// Node record as emitted by the generation layer. Every field is optional
/// and unknown fields are ignored, never rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub importance: Option<String>,
    #[serde(default)]
    pub depth: Option<i64>,
    #[serde(default)]
    pub parents: Vec<Value>,
    #[serde(default)]
    pub children: Vec<Value>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEdge {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, alias = "from")]
    pub source: Option<Value>,
    #[serde(default, alias = "to")]
    pub target: Option<Value>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
}

/// One resolved graph snapshot from the generation/storage layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapSnapshot {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
    #[serde(default)]
    pub central_idea: String,
}

/// Node after ingestion: canonical string id, display label, normalized
/// hierarchy hints.
#[derive(Debug, Clone, PartialEq)]
pub struct MapNode {
    pub id: String,
    pub label: String,
    pub definition: Option<String>,
    pub hint_depth: usize,
    pub parents: Vec<String>,
    pub children: Vec<String>,
    pub tags: Vec<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub kind: StrokeKind,
}

/// Indexed, immutable view of one concept-graph snapshot. All downstream
/// derivation (depth, position, visibility, focus) reads from this and
/// transient UI state; nothing here is mutated after construction.
#[derive(Debug, Clone)]
pub struct MindMap {
    pub central_idea: String,
    pub nodes: HashMap<String, MapNode>,
    /// Node ids in input order. Governs placeholder ids, BFS seeding and
    /// sibling stacking, so output is reproducible for a given input.
    pub order: Vec<String>,
    pub edges: Vec<MapEdge>,
    pub parents_of: HashMap<String, Vec<String>>,
    pub children_of: HashMap<String, Vec<String>>,
}

impl MindMap {
    pub fn from_json(payload: &str) -> Result<Self> {
        let snapshot: MapSnapshot =
            serde_json::from_str(payload).context("malformed graph snapshot payload")?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_value(payload: Value) -> Result<Self> {
        let snapshot: MapSnapshot =
            serde_json::from_value(payload).context("malformed graph snapshot payload")?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_snapshot(snapshot: MapSnapshot) -> Self {
        Self::from_parts(snapshot.nodes, snapshot.edges, snapshot.central_idea)
    }

    pub fn from_parts(raw_nodes: Vec<RawNode>, raw_edges: Vec<RawEdge>, central_idea: String) -> Self {
        let (nodes, order) = normalize_nodes(raw_nodes);
        let explicit = normalize_edges(raw_edges);
        let edges = synthesize_edges(&nodes, &order, explicit);
        let (parents_of, children_of) = build_adjacency(&nodes, &order, &edges);

        debug!(
            nodes = order.len(),
            edges = edges.len(),
            "graph snapshot indexed"
        );

        Self {
            central_idea,
            nodes,
            order,
            edges,
            parents_of,
            children_of,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Canonical string form of a scalar id. Non-scalar values have no
/// canonical form and yield `None`.
pub fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn hint_depth_of(raw: &RawNode) -> usize {
    if let Some(depth) = raw.depth {
        return depth.max(0) as usize;
    }
    match raw
        .importance
        .as_deref()
        .map(|s| s.trim().to_ascii_lowercase())
        .as_deref()
    {
        Some("core") => 0,
        Some("supporting") => 1,
        _ => 2,
    }
}

fn normalize_nodes(raw_nodes: Vec<RawNode>) -> (HashMap<String, MapNode>, Vec<String>) {
    let mut nodes = HashMap::with_capacity(raw_nodes.len());
    let mut order = Vec::with_capacity(raw_nodes.len());

    for (index, raw) in raw_nodes.into_iter().enumerate() {
        let id = match &raw.id {
            None => format!("node-{index}"),
            Some(value) => match scalar_id(value) {
                Some(id) => id,
                None => {
                    debug!(index, "node id has no canonical form, excluding node");
                    continue;
                }
            },
        };

        if nodes.contains_key(&id) {
            debug!(id = id.as_str(), "duplicate node id, keeping first occurrence");
            continue;
        }

        let hint_depth = hint_depth_of(&raw);
        let label = raw.label.unwrap_or_else(|| id.clone());
        let parents = raw.parents.iter().filter_map(scalar_id).collect();
        let children = raw.children.iter().filter_map(scalar_id).collect();

        order.push(id.clone());
        nodes.insert(
            id.clone(),
            MapNode {
                id,
                label,
                definition: raw.definition,
                hint_depth,
                parents,
                children,
                tags: raw.tags,
                color: raw.color,
            },
        );
    }

    (nodes, order)
}

fn normalize_edges(raw_edges: Vec<RawEdge>) -> Vec<MapEdge> {
    let mut edges = Vec::with_capacity(raw_edges.len());

    for raw in raw_edges {
        let source = raw.source.as_ref().and_then(scalar_id);
        let target = raw.target.as_ref().and_then(scalar_id);
        let (Some(source), Some(target)) = (source, target) else {
            debug!("edge missing resolvable endpoints, skipping");
            continue;
        };

        let id = raw
            .id
            .as_ref()
            .and_then(scalar_id)
            .unwrap_or_else(|| format!("{source}->{target}"));
        let kind = StrokeKind::from_tag(raw.kind.as_deref().unwrap_or("connection"));

        edges.push(MapEdge {
            id,
            source,
            target,
            label: raw.label,
            kind,
        });
    }

    edges
}

type Adjacency = (HashMap<String, Vec<String>>, HashMap<String, Vec<String>>);

/// Merges edge-declared and hint-declared relations into parent/child
/// adjacency. The same relation declared twice yields one entry; edges
/// touching unknown ids contribute nothing.
fn build_adjacency(
    nodes: &HashMap<String, MapNode>,
    order: &[String],
    edges: &[MapEdge],
) -> Adjacency {
    let mut parents_of: HashMap<String, Vec<String>> = HashMap::new();
    let mut children_of: HashMap<String, Vec<String>> = HashMap::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for edge in edges {
        if nodes.contains_key(&edge.source) && nodes.contains_key(&edge.target) {
            link_relation(&mut seen, &mut parents_of, &mut children_of, &edge.source, &edge.target);
        }
    }

    for id in order {
        let Some(node) = nodes.get(id) else { continue };
        for parent in &node.parents {
            if nodes.contains_key(parent) {
                link_relation(&mut seen, &mut parents_of, &mut children_of, parent, id);
            }
        }
        for child in &node.children {
            if nodes.contains_key(child) {
                link_relation(&mut seen, &mut parents_of, &mut children_of, id, child);
            }
        }
    }

    (parents_of, children_of)
}

fn link_relation(
    seen: &mut HashSet<(String, String)>,
    parents_of: &mut HashMap<String, Vec<String>>,
    children_of: &mut HashMap<String, Vec<String>>,
    from: &str,
    to: &str,
) {
    if !seen.insert((from.to_string(), to.to_string())) {
        return;
    }
    children_of
        .entry(from.to_string())
        .or_default()
        .push(to.to_string());
    parents_of
        .entry(to.to_string())
        .or_default()
        .push(from.to_string());
}
