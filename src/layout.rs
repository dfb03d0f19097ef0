use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::scene::SceneNode;
use crate::{
    CanvasExtent, EmphasisTier, Point, DEFAULT_CENTRAL_IDEA, LEVEL_SPACING, NODE_HEIGHT,
    NODE_SPACING, NODE_WIDTH, ROOT_NODE_ID, START_X,
};

/// Converts resolved depths into concrete, non-overlapping coordinates.
///
/// Nodes are bucketed by depth into ordered levels. Each level occupies one
/// column left to right; within a level, nodes stack top to bottom in
/// bucket insertion order, centered vertically around y = 0.
pub fn plan_positions(order: &[String], depths: &HashMap<String, usize>) -> HashMap<String, Point> {
    let mut levels: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    for id in order {
        let depth = depths.get(id).copied().unwrap_or(0);
        levels.entry(depth).or_default().push(id);
    }

    let level_count = levels.len();
    let step = NODE_HEIGHT + NODE_SPACING;
    let mut positions = HashMap::with_capacity(order.len());

    for (level_index, (_, ids)) in levels.into_iter().enumerate() {
        let x = START_X + level_index as f32 * LEVEL_SPACING;
        let total_height = ids.len() as f32 * step - NODE_SPACING;
        let start_y = -total_height / 2.0;

        for (slot, id) in ids.into_iter().enumerate() {
            positions.insert(
                id.to_string(),
                Point {
                    x,
                    y: start_y + slot as f32 * step,
                },
            );
        }
    }

    debug!(levels = level_count, nodes = positions.len(), "positions planned");

    positions
}

/// Synthetic node shown when the snapshot carries no nodes at all, so a
/// renderer always has something to draw.
pub fn placeholder_root(central_idea: &str) -> SceneNode {
    let label = central_idea.trim();
    SceneNode {
        id: ROOT_NODE_ID.to_string(),
        position: Point::ORIGIN,
        display_label: if label.is_empty() {
            DEFAULT_CENTRAL_IDEA.to_string()
        } else {
            label.to_string()
        },
        depth: 0,
        emphasis_tier: EmphasisTier::Full,
    }
}

pub fn compute_extent(points: impl IntoIterator<Item = Point>) -> CanvasExtent {
    let mut bounds: Option<(f32, f32, f32, f32)> = None;

    for point in points {
        let (min_x, max_x, min_y, max_y) = bounds.get_or_insert((point.x, point.x, point.y, point.y));
        *min_x = min_x.min(point.x);
        *max_x = max_x.max(point.x);
        *min_y = min_y.min(point.y);
        *max_y = max_y.max(point.y);
    }

    match bounds {
        Some((min_x, max_x, min_y, max_y)) => CanvasExtent {
            width: max_x - min_x + NODE_WIDTH,
            height: max_y - min_y + NODE_HEIGHT,
        },
        None => CanvasExtent {
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
        },
    }
}
