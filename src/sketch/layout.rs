use std::collections::HashMap;

use egui::{Pos2, Rect};
use rand::Rng;

use crate::sketch::graph::NodeId;

/// Screen-space position store, keyed by node id.
///
/// Logically separate from the graph: the caller that creates or removes
/// a node is responsible for keeping the two in sync. Positions are
/// freely mutable (drags) without touching topology.
#[derive(Clone, Debug, Default)]
pub struct LayoutStore {
    positions: HashMap<NodeId, Pos2>,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: NodeId, pos: Pos2) {
        self.positions.insert(id, pos);
    }

    /// `None` means the node has no entry (NotFound).
    pub fn get(&self, id: NodeId) -> Option<Pos2> {
        self.positions.get(&id).copied()
    }

    pub fn remove(&mut self, id: NodeId) {
        self.positions.remove(&id);
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Random placement for a newly added node, kept away from the edges
    /// of the canvas so the glyph and its label stay visible.
    pub fn scatter(&self, area: Rect) -> Pos2 {
        let mut rng = rand::rng();
        let margin = 24.0_f32.min(area.width() * 0.25).min(area.height() * 0.25);
        let x = rng.random_range(area.left() + margin..=area.right() - margin);
        let y = rng.random_range(area.top() + margin..=area.bottom() - margin);
        Pos2::new(x, y)
    }
}
