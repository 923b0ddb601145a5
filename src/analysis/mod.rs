//! Derived structural facts over a [`MultiGraph`] snapshot.
//!
//! Everything here is a pure function of the graph: no caching, no
//! incremental state. Callers recompute after every structural mutation,
//! which is cheap at interactive-editing scale.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

use crate::sketch::graph::{EdgeId, MultiGraph, NodeId, Palette};

pub mod planarity;

/// Connectedness with an explicit empty-graph sentinel: an empty node set
/// is reported as "No Graph", not as true or false.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Connectivity {
    NoGraph,
    Connected,
    Disconnected,
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connectivity::NoGraph => write!(f, "No Graph"),
            Connectivity::Connected => write!(f, "True"),
            Connectivity::Disconnected => write!(f, "False"),
        }
    }
}

/// Number of connected components (0 for the empty graph).
pub fn component_count(graph: &MultiGraph) -> usize {
    let mut seen: HashMap<NodeId, ()> = HashMap::new();
    let mut count = 0;
    for root in graph.node_ids() {
        if seen.contains_key(&root) {
            continue;
        }
        count += 1;
        let mut queue = VecDeque::from([root]);
        seen.insert(root, ());
        while let Some(v) = queue.pop_front() {
            for w in graph.neighbors(v) {
                if seen.insert(w, ()).is_none() {
                    queue.push_back(w);
                }
            }
        }
    }
    count
}

pub fn connectivity(graph: &MultiGraph) -> Connectivity {
    if graph.node_count() == 0 {
        Connectivity::NoGraph
    } else if component_count(graph) == 1 {
        Connectivity::Connected
    } else {
        Connectivity::Disconnected
    }
}

/// BFS 2-coloring over the simple projection. `None` when no valid
/// partition exists; any self-loop makes the graph non-bipartite. The
/// empty graph is vacuously bipartite with an empty assignment.
pub fn bipartite_sides(graph: &MultiGraph) -> Option<BTreeMap<NodeId, u8>> {
    let mut sides: BTreeMap<NodeId, u8> = BTreeMap::new();
    for root in graph.node_ids() {
        if graph.has_self_loop(root) {
            return None;
        }
        if sides.contains_key(&root) {
            continue;
        }
        sides.insert(root, 0);
        let mut queue = VecDeque::from([root]);
        while let Some(v) = queue.pop_front() {
            let side = sides[&v];
            for w in graph.neighbors(v) {
                match sides.get(&w) {
                    None => {
                        sides.insert(w, 1 - side);
                        queue.push_back(w);
                    }
                    Some(&s) if s == side => return None,
                    Some(_) => {}
                }
            }
        }
    }
    Some(sides)
}

pub fn is_bipartite(graph: &MultiGraph) -> bool {
    bipartite_sides(graph).is_some()
}

/// Planarity of the underlying simple graph (parallel copies collapse,
/// self-loops are ignored). See [`planarity`].
pub fn is_planar(graph: &MultiGraph) -> bool {
    planarity::is_planar(graph)
}

/// Edges whose removal increases the component count.
///
/// Computed by lowpoint DFS on the simple projection; an edge with a
/// parallel sibling is disqualified up front, because removing one copy
/// leaves connectivity through the sibling. That check is part of the
/// algorithm, not an accident of the projection.
pub fn bridges(graph: &MultiGraph) -> Vec<EdgeId> {
    struct Dfs<'g> {
        graph: &'g MultiGraph,
        disc: HashMap<NodeId, usize>,
        low: HashMap<NodeId, usize>,
        timer: usize,
        out: Vec<EdgeId>,
    }

    impl Dfs<'_> {
        fn run(&mut self, v: NodeId, parent: Option<NodeId>) {
            self.disc.insert(v, self.timer);
            self.low.insert(v, self.timer);
            self.timer += 1;
            for w in self.graph.neighbors(v) {
                if Some(w) == parent {
                    continue;
                }
                if let Some(&dw) = self.disc.get(&w) {
                    // back edge
                    let lv = self.low[&v].min(dw);
                    self.low.insert(v, lv);
                } else {
                    self.run(w, Some(v));
                    let lw = self.low[&w];
                    let lv = self.low[&v].min(lw);
                    self.low.insert(v, lv);
                    if lw > self.disc[&v] && self.graph.multiplicity(v, w) == 1 {
                        // the unique copy for this pair
                        if let Some(&id) = self.graph.edges_between(v, w).first() {
                            self.out.push(id);
                        }
                    }
                }
            }
        }
    }

    let mut dfs = Dfs {
        graph,
        disc: HashMap::new(),
        low: HashMap::new(),
        timer: 0,
        out: Vec::new(),
    };
    for root in graph.node_ids() {
        if !dfs.disc.contains_key(&root) {
            dfs.run(root, None);
        }
    }
    dfs.out.sort();
    dfs.out
}

/// Greedy largest-first coloring: nodes ordered by multigraph degree
/// descending (ties broken by id ascending), each assigned the smallest
/// color index unused by its already-colored neighbors.
pub fn greedy_coloring(graph: &MultiGraph) -> BTreeMap<NodeId, usize> {
    let mut order: Vec<NodeId> = graph.node_ids().collect();
    order.sort_by_key(|&id| (std::cmp::Reverse(graph.degree(id)), id));

    let mut colors: BTreeMap<NodeId, usize> = BTreeMap::new();
    for id in order {
        let taken: Vec<usize> = graph
            .neighbors(id)
            .iter()
            .filter_map(|n| colors.get(n).copied())
            .collect();
        let mut color = 0;
        while taken.contains(&color) {
            color += 1;
        }
        colors.insert(id, color);
    }
    colors
}

/// Colors a greedy coloring needs: highest index + 1, or 0 when empty.
pub fn required_colors(coloring: &BTreeMap<NodeId, usize>) -> usize {
    coloring.values().max().map_or(0, |&m| m + 1)
}

/// Display policy for coloring indices. Total and deterministic; indices
/// past 4 collapse onto skyblue while staying logically distinct.
pub fn color_for_index(index: usize) -> Palette {
    match index {
        0 => Palette::Green,
        1 => Palette::Yellow,
        2 => Palette::Purple,
        3 => Palette::Orange,
        _ => Palette::SkyBlue,
    }
}

/// Display policy for bipartite sides.
pub fn side_color(side: u8) -> Palette {
    if side == 0 { Palette::Green } else { Palette::Yellow }
}

/// Snapshot of every displayed fact, re-derived after each mutation so
/// the readout never lags the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphFacts {
    pub node_count: usize,
    pub edge_count: usize,
    pub connectivity: Connectivity,
    pub component_count: usize,
    pub planar: bool,
    pub bipartite: bool,
    pub required_colors: usize,
}

impl GraphFacts {
    pub fn derive(graph: &MultiGraph) -> Self {
        GraphFacts {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            connectivity: connectivity(graph),
            component_count: component_count(graph),
            planar: is_planar(graph),
            bipartite: is_bipartite(graph),
            required_colors: required_colors(&greedy_coloring(graph)),
        }
    }
}

impl Default for GraphFacts {
    fn default() -> Self {
        GraphFacts::derive(&MultiGraph::new())
    }
}
