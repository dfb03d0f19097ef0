use crate::{EmphasisTier, MindMap};

/// Currently focused node, if any. Transient UI state owned by the host;
/// re-selecting the focused node clears the focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: &str) {
        if self.current.as_deref() == Some(id) {
            self.current = None;
        } else {
            self.current = Some(id.to_string());
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeEmphasis {
    pub is_selected: bool,
    pub is_neighbor: bool,
    pub tier: EmphasisTier,
}

impl NodeEmphasis {
    const BASELINE: NodeEmphasis = NodeEmphasis {
        is_selected: false,
        is_neighbor: false,
        tier: EmphasisTier::Full,
    };
}

/// Highlight classification for one node given the active selection: the
/// selected node keeps full emphasis, its direct parents and children are
/// elevated, everything else dims. With no selection active every node is
/// at full emphasis.
pub fn node_emphasis(map: &MindMap, selection: &Selection, id: &str) -> NodeEmphasis {
    let Some(selected) = selection.selected() else {
        return NodeEmphasis::BASELINE;
    };

    if id == selected {
        return NodeEmphasis {
            is_selected: true,
            is_neighbor: false,
            tier: EmphasisTier::Full,
        };
    }

    let is_neighbor = map
        .parents_of
        .get(selected)
        .map_or(false, |parents| parents.iter().any(|p| p == id))
        || map
            .children_of
            .get(selected)
            .map_or(false, |children| children.iter().any(|c| c == id));

    NodeEmphasis {
        is_selected: false,
        is_neighbor,
        tier: if is_neighbor {
            EmphasisTier::Elevated
        } else {
            EmphasisTier::Dimmed
        },
    }
}
