use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

use crate::MindMap;

/// Transient record of which branch is currently revealing its deeper
/// descendants. Owned by the hosting application, never persisted with the
/// graph. Activating one branch deactivates every other, bounding the
/// rendered node count on large graphs.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: &str) {
        if self.expanded.contains(id) {
            self.expanded.remove(id);
        } else {
            self.expanded.clear();
            self.expanded.insert(id.to_string());
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.expanded
    }
}

impl FromIterator<String> for ExpansionState {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            expanded: iter.into_iter().collect(),
        }
    }
}

/// Progressive disclosure: depth-0 and depth-1 nodes are always shown, an
/// expanded node additionally reveals its direct children, and the result
/// is closed under ancestor inclusion so no visible edge can point at a
/// hidden endpoint. Closure runs iteratively over a worklist; the visible
/// set doubles as the visited set, so deep or cyclic parent chains
/// terminate.
pub fn visible_nodes(
    map: &MindMap,
    depths: &HashMap<String, usize>,
    expansion: &ExpansionState,
) -> HashSet<String> {
    let mut visible: HashSet<String> = HashSet::new();
    let mut worklist: VecDeque<String> = VecDeque::new();

    for id in &map.order {
        if depths.get(id).copied().unwrap_or(0) <= 1 {
            visible.insert(id.clone());
            worklist.push_back(id.clone());
        }
    }

    for id in expansion.ids() {
        let Some(children) = map.children_of.get(id) else {
            continue;
        };
        for child in children {
            if visible.insert(child.clone()) {
                worklist.push_back(child.clone());
            }
        }
    }

    while let Some(id) = worklist.pop_front() {
        let Some(parents) = map.parents_of.get(&id) else {
            continue;
        };
        for parent in parents {
            if visible.insert(parent.clone()) {
                worklist.push_back(parent.clone());
            }
        }
    }

    debug!(visible = visible.len(), total = map.order.len(), "visibility resolved");

    visible
}
