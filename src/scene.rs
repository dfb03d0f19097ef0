use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::depth::resolve_depths;
use crate::focus::{node_emphasis, Selection};
use crate::layout::{compute_extent, placeholder_root, plan_positions};
use crate::visibility::{visible_nodes, ExpansionState};
use crate::{CanvasExtent, EmphasisTier, MindMap, Point, StrokeKind};

/// Transient UI state for one render cycle. The engine reads it, the
/// hosting application owns and mutates it.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub selection: Selection,
    /// `None` disables progressive disclosure and shows the whole graph.
    pub expansion: Option<ExpansionState>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub id: String,
    pub position: Point,
    pub display_label: String,
    pub depth: usize,
    pub emphasis_tier: EmphasisTier,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub stroke_kind: StrokeKind,
}

/// Everything the rendering layer needs for one frame: visible nodes with
/// positions and emphasis, visible edges, and the overall extent.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
    pub extent: CanvasExtent,
}

impl MindMap {
    /// Runs the full derivation pipeline over this snapshot: depth
    /// resolution, level placement, progressive disclosure, selection
    /// focus. Pure and synchronous; recompute on any input change.
    pub fn scene(&self, view: &ViewState) -> Scene {
        if self.is_empty() {
            debug!("empty snapshot, emitting placeholder root");
            return Scene {
                nodes: vec![placeholder_root(&self.central_idea)],
                edges: Vec::new(),
                extent: compute_extent(std::iter::once(Point::ORIGIN)),
            };
        }

        let depths = resolve_depths(self);
        let positions = plan_positions(&self.order, &depths);
        let visible: HashSet<String> = match &view.expansion {
            Some(expansion) => visible_nodes(self, &depths, expansion),
            None => self.order.iter().cloned().collect(),
        };

        let mut nodes = Vec::with_capacity(visible.len());
        for id in &self.order {
            if !visible.contains(id) {
                continue;
            }
            let Some(node) = self.nodes.get(id) else { continue };
            let Some(position) = positions.get(id).copied() else {
                continue;
            };
            let emphasis = node_emphasis(self, &view.selection, id);
            nodes.push(SceneNode {
                id: id.clone(),
                position,
                display_label: node.label.clone(),
                depth: depths.get(id).copied().unwrap_or(0),
                emphasis_tier: emphasis.tier,
            });
        }

        let edges: Vec<SceneEdge> = self
            .edges
            .iter()
            .filter(|edge| visible.contains(&edge.source) && visible.contains(&edge.target))
            .map(|edge| SceneEdge {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                label: edge.label.clone(),
                stroke_kind: edge.kind,
            })
            .collect();

        let extent = compute_extent(nodes.iter().map(|n| n.position));

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            "scene assembled"
        );

        Scene { nodes, edges, extent }
    }
}
