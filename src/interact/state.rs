//! Edit modes, transient gesture state, and pointer-event dispatch.
//!
//! The sketchpad is the single mutation path: every pointer or button
//! event lands here, mutates the model, and re-derives the displayed
//! facts before the frontend draws the next frame. No rendering happens
//! in this module, which keeps event sequences unit-testable without a
//! display.

use egui::{Pos2, Rect};

use crate::analysis::{self, GraphFacts};
use crate::interact::hit_test;
use crate::sketch::graph::{MultiGraph, NodeId, Palette};
use crate::sketch::layout::LayoutStore;

/// Pointer distance within which a node glyph counts as hit.
pub const NODE_HIT_RADIUS: f32 = 14.0;
/// Perpendicular distance within which an edge segment counts as hit.
pub const EDGE_HIT_RADIUS: f32 = 6.0;

/// Current edit mode. Exactly one is active; re-selecting the active
/// mode drops back to `Move`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Move,
    AddEdge,
    Remove,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Transient per-session interaction bookkeeping, distinct from graph
/// data. At most one node each; a pending edge source deliberately
/// survives mode switches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Gesture {
    pub dragging: Option<NodeId>,
    pub pending_edge: Option<NodeId>,
    pub inspected: Option<NodeId>,
}

/// The interactive editor core: multigraph, layout, mode, gesture state,
/// and the facts derived from the current graph.
#[derive(Clone, Debug, Default)]
pub struct Sketchpad {
    pub graph: MultiGraph,
    pub layout: LayoutStore,
    mode: Mode,
    gesture: Gesture,
    facts: GraphFacts,
}

impl Sketchpad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn facts(&self) -> &GraphFacts {
        &self.facts
    }

    /// Select `mode`, or return to `Move` when it is already active.
    pub fn toggle_mode(&mut self, mode: Mode) {
        self.mode = if self.mode == mode { Mode::Move } else { mode };
        log::debug!("mode -> {:?}", self.mode);
    }

    /// Add a node at a random position inside `area`.
    pub fn add_node(&mut self, area: Rect) -> NodeId {
        let id = self.graph.add_node();
        self.layout.set(id, self.layout.scatter(area));
        log::debug!("added node {id}");
        self.refresh();
        id
    }

    /// Drop everything: graph, layout, gestures, and the id allocator.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.layout.clear();
        self.gesture = Gesture::default();
        log::debug!("cleared sketchpad");
        self.refresh();
    }

    /// Pointer press dispatch. Secondary selects the inspected node;
    /// primary is mode-dependent. In `Remove` mode edges are tested
    /// before nodes and an edge hit consumes the click.
    pub fn press(&mut self, point: Pos2, button: PointerButton) {
        if button == PointerButton::Secondary {
            if let Some(id) = hit_test::hit_node(point, &self.graph, &self.layout, NODE_HIT_RADIUS)
            {
                self.gesture.inspected = Some(id);
            }
            return;
        }

        if self.mode == Mode::Remove {
            if let Some(eid) = hit_test::hit_edge(point, &self.graph, &self.layout, EDGE_HIT_RADIUS)
            {
                self.graph.remove_edge(eid);
                log::debug!("removed edge {eid:?}");
                self.refresh();
                return;
            }
        }

        let Some(id) = hit_test::hit_node(point, &self.graph, &self.layout, NODE_HIT_RADIUS)
        else {
            return;
        };
        match self.mode {
            Mode::AddEdge => match self.gesture.pending_edge.take() {
                None => self.gesture.pending_edge = Some(id),
                Some(src) => {
                    // stale source collapses to a no-op inside add_edge
                    if let Some(eid) = self.graph.add_edge(src, id) {
                        log::debug!("added edge {eid:?}");
                    }
                    self.refresh();
                }
            },
            Mode::Move => self.gesture.dragging = Some(id),
            Mode::Remove => {
                self.graph.remove_node(id);
                self.layout.remove(id);
                if self.gesture.inspected == Some(id) {
                    self.gesture.inspected = None;
                }
                if self.gesture.dragging == Some(id) {
                    self.gesture.dragging = None;
                }
                log::debug!("removed node {id}");
                self.refresh();
            }
        }
    }

    /// Pointer release ends any active drag.
    pub fn release(&mut self) {
        self.gesture.dragging = None;
    }

    /// Pointer motion moves the dragged node, if any.
    pub fn motion(&mut self, point: Pos2) {
        if let Some(id) = self.gesture.dragging {
            if self.graph.contains_node(id) {
                self.layout.set(id, point);
            }
        }
    }

    /// Relabel the inspected node; invalid text is silently rejected.
    pub fn change_label(&mut self, text: &str) -> bool {
        match self.gesture.inspected {
            Some(id) => self.graph.set_node_label(id, text),
            None => false,
        }
    }

    /// Recolor the inspected node.
    pub fn recolor_inspected(&mut self, color: Palette) -> bool {
        match self.gesture.inspected {
            Some(id) => self.graph.set_node_color(id, color),
            None => false,
        }
    }

    /// Paint the current bridge set red, everything else black.
    pub fn show_bridges(&mut self) {
        self.graph.reset_edge_colors();
        for eid in analysis::bridges(&self.graph) {
            self.graph.set_edge_color(eid, Palette::Red);
        }
    }

    /// Recolor nodes by bipartite side, when a 2-coloring exists. A
    /// non-bipartite graph keeps its colors.
    pub fn check_bipartite(&mut self) {
        if let Some(sides) = analysis::bipartite_sides(&self.graph) {
            for (id, side) in sides {
                self.graph.set_node_color(id, analysis::side_color(side));
            }
        }
    }

    /// Recolor nodes through the greedy-coloring display palette.
    pub fn minimal_coloring(&mut self) {
        for (id, color) in analysis::greedy_coloring(&self.graph) {
            self.graph.set_node_color(id, analysis::color_for_index(color));
        }
    }

    /// Post-mutation step: drop any stale bridge highlight, then
    /// re-derive the displayed facts. Must run before the next redraw.
    fn refresh(&mut self) {
        self.graph.reset_edge_colors();
        self.facts = GraphFacts::derive(&self.graph);
    }
}
