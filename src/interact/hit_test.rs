//! Resolves a pointer coordinate against the drawn graph.

use egui::Pos2;

use crate::sketch::graph::{EdgeId, MultiGraph, NodeId};
use crate::sketch::layout::LayoutStore;

/// First node in creation order whose position lies within `radius` of
/// `point`. First-match is the documented tie-break; it is deterministic,
/// not "closest".
pub fn hit_node(
    point: Pos2,
    graph: &MultiGraph,
    layout: &LayoutStore,
    radius: f32,
) -> Option<NodeId> {
    for id in graph.node_ids() {
        if let Some(pos) = layout.get(id) {
            let dx = pos.x - point.x;
            let dy = pos.y - point.y;
            if dx * dx + dy * dy < radius * radius {
                return Some(id);
            }
        }
    }
    None
}

/// Whether `point` lies within `threshold` of the segment `a`-`b`.
///
/// The projection parameter is clamped to [0, 1], so the distance is to
/// the segment itself, never its extension. A degenerate segment (both
/// endpoints coincide) is no hit.
pub fn hit_segment(point: Pos2, a: Pos2, b: Pos2, threshold: f32) -> bool {
    let line = b - a;
    let len2 = line.x * line.x + line.y * line.y;
    if len2 == 0.0 {
        return false;
    }
    let click = point - a;
    let t = ((click.x * line.x + click.y * line.y) / len2).clamp(0.0, 1.0);
    let proj = Pos2::new(a.x + t * line.x, a.y + t * line.y);
    let dx = point.x - proj.x;
    let dy = point.y - proj.y;
    (dx * dx + dy * dy).sqrt() < threshold
}

/// First edge in iteration order whose straight endpoint segment is hit.
/// Parallel copies share that segment, so this resolves to the lowest key
/// of the pair; curvature offsets are a rendering concern only.
pub fn hit_edge(
    point: Pos2,
    graph: &MultiGraph,
    layout: &LayoutStore,
    threshold: f32,
) -> Option<EdgeId> {
    for edge in graph.edges() {
        let (Some(a), Some(b)) = (layout.get(edge.id.u), layout.get(edge.id.v)) else {
            continue;
        };
        if hit_segment(point, a, b, threshold) {
            return Some(edge.id);
        }
    }
    None
}
