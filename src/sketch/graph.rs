use std::collections::{BTreeMap, BTreeSet};

// Node identity: small monotonic integers, never reused within a session
pub type NodeId = u64;

/// Longest accepted node label, in characters.
pub const MAX_LABEL_LEN: usize = 10;

/// Fixed set of visual tokens the renderer understands.
///
/// Nodes default to `SkyBlue`, edges to `Black`. `Red` is reserved for
/// bridge highlighting and the drag highlight.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    SkyBlue,
    Yellow,
    Green,
    Purple,
    Orange,
    Black,
    Red,
}

impl Palette {
    pub const NODE_DEFAULT: Palette = Palette::SkyBlue;
    pub const EDGE_DEFAULT: Palette = Palette::Black;
}

/// Edge identity: canonical endpoint pair (`u <= v`) plus a per-pair
/// sequence key, so parallel copies between the same endpoints stay
/// individually addressable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId {
    pub u: NodeId,
    pub v: NodeId,
    pub key: u32,
}

impl EdgeId {
    pub fn is_self_loop(&self) -> bool {
        self.u == self.v
    }

    // Canonical endpoint order for an unordered pair
    fn pair(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
        if a <= b { (a, b) } else { (b, a) }
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub color: Palette,
    pub label: String,
}

#[derive(Clone, Debug)]
pub struct Edge {
    pub id: EdgeId,
    pub color: Palette,
}

/// Undirected multigraph with per-element visual attributes.
///
/// Parallel edges and self-loops are permitted. Storage is `BTreeMap`
/// keyed by monotonic ids, so node iteration order is creation order and
/// edge iteration is grouped by endpoint pair. Holds no derived
/// algorithmic state; callers re-derive facts after mutating.
#[derive(Clone, Debug, Default)]
pub struct MultiGraph {
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeId, Edge>,
    next_id: NodeId,
}

impl MultiGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with the default color and a label of its stringified id.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                id,
                color: Palette::NODE_DEFAULT,
                label: id.to_string(),
            },
        );
        id
    }

    /// Remove a node and every incident edge. No-op on an absent id.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if self.nodes.remove(&id).is_none() {
            return false;
        }
        let incident: Vec<EdgeId> = self
            .edges
            .keys()
            .filter(|e| e.u == id || e.v == id)
            .copied()
            .collect();
        for eid in incident {
            self.edges.remove(&eid);
        }
        true
    }

    /// Add one edge between `a` and `b`. Self-loops and parallel copies are
    /// always accepted; `None` only when an endpoint no longer exists
    /// (a stale hit-test result must stay a safe no-op).
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        if !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return None;
        }
        let (u, v) = EdgeId::pair(a, b);
        // Smallest unused key for this pair
        let mut key = 0u32;
        for existing in self.pair_range(u, v) {
            if existing.key == key {
                key += 1;
            } else {
                break;
            }
        }
        let id = EdgeId { u, v, key };
        self.edges.insert(
            id,
            Edge {
                id,
                color: Palette::EDGE_DEFAULT,
            },
        );
        Some(id)
    }

    /// Remove exactly one parallel copy; siblings are untouched.
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        self.edges.remove(&id).is_some()
    }

    pub fn set_node_color(&mut self, id: NodeId, color: Palette) -> bool {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.color = color;
            true
        } else {
            false
        }
    }

    /// Update a node label. Rejected (no state change) when the text is
    /// empty, the literal placeholder "None", or longer than
    /// [`MAX_LABEL_LEN`] characters.
    pub fn set_node_label(&mut self, id: NodeId, text: &str) -> bool {
        if text.is_empty() || text == "None" || text.chars().count() > MAX_LABEL_LEN {
            return false;
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.label = text.to_string();
            true
        } else {
            false
        }
    }

    pub fn set_edge_color(&mut self, id: EdgeId, color: Palette) -> bool {
        if let Some(edge) = self.edges.get_mut(&id) {
            edge.color = color;
            true
        } else {
            false
        }
    }

    /// Repaint every edge with the default black.
    pub fn reset_edge_colors(&mut self) {
        for edge in self.edges.values_mut() {
            edge.color = Palette::EDGE_DEFAULT;
        }
    }

    /// Drop all nodes and edges and restart the id allocator at 0.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.next_id = 0;
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Edges sorted by (endpoint pair, key), i.e. parallel copies grouped.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of parallel copies between `a` and `b` (order irrelevant).
    pub fn multiplicity(&self, a: NodeId, b: NodeId) -> usize {
        let (u, v) = EdgeId::pair(a, b);
        self.pair_range(u, v).count()
    }

    pub fn edges_between(&self, a: NodeId, b: NodeId) -> Vec<EdgeId> {
        let (u, v) = EdgeId::pair(a, b);
        self.pair_range(u, v).collect()
    }

    /// Multigraph degree: parallel copies each count, a self-loop counts 2.
    pub fn degree(&self, id: NodeId) -> usize {
        self.edges
            .keys()
            .map(|e| match (e.u == id, e.v == id) {
                (true, true) => 2,
                (true, false) | (false, true) => 1,
                (false, false) => 0,
            })
            .sum()
    }

    /// Neighbors under the simple-graph projection, self excluded.
    pub fn neighbors(&self, id: NodeId) -> BTreeSet<NodeId> {
        let mut out = BTreeSet::new();
        for e in self.edges.keys() {
            if e.u == id && e.v != id {
                out.insert(e.v);
            } else if e.v == id && e.u != id {
                out.insert(e.u);
            }
        }
        out
    }

    pub fn has_self_loop(&self, id: NodeId) -> bool {
        self.multiplicity(id, id) > 0
    }

    fn pair_range(&self, u: NodeId, v: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let lo = EdgeId { u, v, key: 0 };
        let hi = EdgeId { u, v, key: u32::MAX };
        self.edges.range(lo..=hi).map(|(id, _)| *id)
    }
}
