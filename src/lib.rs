use serde::{Deserialize, Serialize};

pub mod depth;
pub mod focus;
pub mod graph;
pub mod layout;
pub mod scene;
pub mod synth;
pub mod visibility;

pub use depth::*;
pub use focus::*;
pub use graph::*;
pub use layout::*;
pub use scene::*;
pub use synth::*;
pub use visibility::*;

pub const NODE_WIDTH: f32 = 180.0;
pub const NODE_HEIGHT: f32 = 64.0;
pub const NODE_SPACING: f32 = 36.0;
pub const LEVEL_SPACING: f32 = 260.0;
pub const START_X: f32 = 0.0;
pub const ROOT_NODE_ID: &str = "root";
pub const DEFAULT_CENTRAL_IDEA: &str = "Mind Map";

pub const OPACITY_FULL: f32 = 1.0;
pub const OPACITY_ELEVATED: f32 = 0.85;
pub const OPACITY_DIMMED: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };
}

/// Overall bounding size of a laid-out scene, so the hosting renderer can
/// size its viewport without rescanning node positions.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CanvasExtent {
    pub width: f32,
    pub height: f32,
}

/// Highlight strength the rendering layer applies to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmphasisTier {
    Full,
    Elevated,
    Dimmed,
}

impl EmphasisTier {
    pub fn opacity(self) -> f32 {
        match self {
            EmphasisTier::Full => OPACITY_FULL,
            EmphasisTier::Elevated => OPACITY_ELEVATED,
            EmphasisTier::Dimmed => OPACITY_DIMMED,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmphasisTier::Full => "full",
            EmphasisTier::Elevated => "elevated",
            EmphasisTier::Dimmed => "dimmed",
        }
    }
}

/// Rendering treatment of an edge. Unrecognized kind tags from the
/// generation layer collapse to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    #[default]
    Connection,
    Emphasis,
    Flow,
}

impl StrokeKind {
    pub fn from_tag(tag: &str) -> StrokeKind {
        match tag.trim().to_ascii_lowercase().as_str() {
            "emphasis" => StrokeKind::Emphasis,
            "flow" => StrokeKind::Flow,
            _ => StrokeKind::Connection,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrokeKind::Connection => "connection",
            StrokeKind::Emphasis => "emphasis",
            StrokeKind::Flow => "flow",
        }
    }
}
