//! Left-right planarity test (Brandes' formulation of de Fraysseix /
//! Rosenstiehl) over the simple projection of a multigraph.
//!
//! Parallel copies collapse to a single edge and self-loops are dropped
//! before testing; neither affects planarity of the underlying simple
//! graph. The test is decision-only, no embedding is produced.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::sketch::graph::{MultiGraph, NodeId};

pub fn is_planar(graph: &MultiGraph) -> bool {
    let ids: Vec<NodeId> = graph.node_ids().collect();
    let index: HashMap<NodeId, usize> = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

    let mut pairs: BTreeSet<(usize, usize)> = BTreeSet::new();
    for edge in graph.edges() {
        if edge.id.is_self_loop() {
            continue;
        }
        pairs.insert((index[&edge.id.u], index[&edge.id.v]));
    }

    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); ids.len()];
    for &(u, v) in &pairs {
        adj[u].push(v);
        adj[v].push(u);
    }
    lr_planar(&adj, pairs.len())
}

fn lr_planar(adj: &[Vec<usize>], edge_count: usize) -> bool {
    let n = adj.len();
    // Every simple graph on fewer than five vertices is planar
    if n < 5 {
        return true;
    }
    if edge_count > 3 * n - 6 {
        return false;
    }
    Lr::new(adj).run()
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Interval {
    low: Option<usize>,
    high: Option<usize>,
}

impl Interval {
    fn is_empty(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct ConflictPair {
    l: Interval,
    r: Interval,
}

impl ConflictPair {
    fn swap(&mut self) {
        std::mem::swap(&mut self.l, &mut self.r);
    }
}

/// DFS state shared by the orientation and testing phases. Oriented edges
/// live in an arena and are addressed by index throughout.
struct Lr<'a> {
    adj: &'a [Vec<usize>],
    edges: Vec<(usize, usize)>,
    oriented: HashSet<(usize, usize)>,
    height: Vec<Option<usize>>,
    parent_edge: Vec<Option<usize>>,
    ordered: Vec<Vec<usize>>,
    lowpt: Vec<usize>,
    lowpt2: Vec<usize>,
    nesting: Vec<i64>,
    lowpt_edge: Vec<Option<usize>>,
    edge_ref: Vec<Option<usize>>,
    stack_bottom: Vec<usize>,
    stack: Vec<ConflictPair>,
    roots: Vec<usize>,
}

impl<'a> Lr<'a> {
    fn new(adj: &'a [Vec<usize>]) -> Self {
        let n = adj.len();
        Lr {
            adj,
            edges: Vec::new(),
            oriented: HashSet::new(),
            height: vec![None; n],
            parent_edge: vec![None; n],
            ordered: vec![Vec::new(); n],
            lowpt: Vec::new(),
            lowpt2: Vec::new(),
            nesting: Vec::new(),
            lowpt_edge: Vec::new(),
            edge_ref: Vec::new(),
            stack_bottom: Vec::new(),
            stack: Vec::new(),
            roots: Vec::new(),
        }
    }

    fn run(mut self) -> bool {
        for v in 0..self.adj.len() {
            if self.height[v].is_none() {
                self.height[v] = Some(0);
                self.roots.push(v);
                self.orient(v);
            }
        }

        // Outgoing edges per vertex, sorted by nesting depth (stable, so
        // equal depths keep discovery order)
        for ei in 0..self.edges.len() {
            let src = self.edges[ei].0;
            self.ordered[src].push(ei);
        }
        for v in 0..self.adj.len() {
            let mut out = std::mem::take(&mut self.ordered[v]);
            out.sort_by_key(|&ei| self.nesting[ei]);
            self.ordered[v] = out;
        }

        let roots = self.roots.clone();
        for v in roots {
            if !self.test(v) {
                return false;
            }
        }
        true
    }

    fn new_edge(&mut self, v: usize, w: usize) -> usize {
        let ei = self.edges.len();
        self.edges.push((v, w));
        self.oriented.insert((v, w));
        self.lowpt.push(0);
        self.lowpt2.push(0);
        self.nesting.push(0);
        self.lowpt_edge.push(None);
        self.edge_ref.push(None);
        self.stack_bottom.push(0);
        ei
    }

    /// Phase 1: orient the graph into a DFS forest plus back edges and
    /// compute lowpoints and nesting depths.
    fn orient(&mut self, v: usize) {
        let parent = self.parent_edge[v];
        let hv = self.height[v].expect("visited vertex has a height");
        for i in 0..self.adj[v].len() {
            let w = self.adj[v][i];
            if self.oriented.contains(&(v, w)) || self.oriented.contains(&(w, v)) {
                continue;
            }
            let ei = self.new_edge(v, w);
            self.lowpt[ei] = hv;
            self.lowpt2[ei] = hv;
            if self.height[w].is_none() {
                // tree edge
                self.parent_edge[w] = Some(ei);
                self.height[w] = Some(hv + 1);
                self.orient(w);
            } else {
                // back edge
                self.lowpt[ei] = self.height[w].expect("back edge target has a height");
            }

            self.nesting[ei] = 2 * self.lowpt[ei] as i64;
            if self.lowpt2[ei] < hv {
                // chordal: tuck in deeper
                self.nesting[ei] += 1;
            }

            if let Some(pe) = parent {
                if self.lowpt[ei] < self.lowpt[pe] {
                    self.lowpt2[pe] = self.lowpt[pe].min(self.lowpt2[ei]);
                    self.lowpt[pe] = self.lowpt[ei];
                } else if self.lowpt[ei] > self.lowpt[pe] {
                    self.lowpt2[pe] = self.lowpt2[pe].min(self.lowpt[ei]);
                } else {
                    self.lowpt2[pe] = self.lowpt2[pe].min(self.lowpt2[ei]);
                }
            }
        }
    }

    /// Phase 2: walk the oriented forest in nesting order, maintaining the
    /// stack of conflict pairs. Returns false at the first left-right
    /// constraint that cannot be satisfied.
    fn test(&mut self, v: usize) -> bool {
        let parent = self.parent_edge[v];
        let hv = self.height[v].expect("visited vertex has a height");
        let out = self.ordered[v].clone();
        for (i, &ei) in out.iter().enumerate() {
            let w = self.edges[ei].1;
            self.stack_bottom[ei] = self.stack.len();
            if self.parent_edge[w] == Some(ei) {
                // tree edge
                if !self.test(w) {
                    return false;
                }
            } else {
                // back edge
                self.lowpt_edge[ei] = Some(ei);
                self.stack.push(ConflictPair {
                    l: Interval::default(),
                    r: Interval {
                        low: Some(ei),
                        high: Some(ei),
                    },
                });
            }
            if self.lowpt[ei] < hv {
                // ei has a return edge
                if i == 0 {
                    if let Some(pe) = parent {
                        self.lowpt_edge[pe] = self.lowpt_edge[ei];
                    }
                } else if !self.add_constraints(ei, parent.expect("non-first child has a parent")) {
                    return false;
                }
            }
        }

        if let Some(pe) = parent {
            let u = self.edges[pe].0;
            self.trim_back_edges(u);
            // side of pe is the side of its highest return edge
            if self.lowpt[pe] < self.height[u].expect("parent vertex has a height") {
                if let Some(top) = self.stack.last() {
                    let hl = top.l.high;
                    let hr = top.r.high;
                    self.edge_ref[pe] = match (hl, hr) {
                        (Some(l), Some(r)) => {
                            if self.lowpt[l] > self.lowpt[r] {
                                Some(l)
                            } else {
                                Some(r)
                            }
                        }
                        (Some(l), None) => Some(l),
                        (None, r) => r,
                    };
                }
            }
        }
        true
    }

    fn conflicting(&self, interval: &Interval, b: usize) -> bool {
        match interval.high {
            Some(h) => self.lowpt[h] > self.lowpt[b],
            None => false,
        }
    }

    fn add_constraints(&mut self, ei: usize, pe: usize) -> bool {
        let mut p = ConflictPair::default();

        // merge return edges of ei into p.r
        while self.stack.len() > self.stack_bottom[ei] {
            let mut q = self.stack.pop().expect("stack above recorded bottom");
            if !q.l.is_empty() {
                q.swap();
            }
            if !q.l.is_empty() {
                return false;
            }
            let q_low = q.r.low.expect("stacked pair has a right interval");
            if self.lowpt[q_low] > self.lowpt[pe] {
                // merge intervals
                match p.r.low {
                    None => p.r.high = q.r.high,
                    Some(prl) => self.edge_ref[prl] = q.r.high,
                }
                p.r.low = q.r.low;
            } else {
                // align
                self.edge_ref[q_low] = self.lowpt_edge[pe];
            }
        }

        // merge conflicting return edges of earlier siblings into p.l
        loop {
            let top = match self.stack.last() {
                Some(t) => *t,
                None => break,
            };
            if !self.conflicting(&top.l, ei) && !self.conflicting(&top.r, ei) {
                break;
            }
            let mut q = self.stack.pop().expect("just peeked");
            if self.conflicting(&q.r, ei) {
                q.swap();
            }
            if self.conflicting(&q.r, ei) {
                return false;
            }
            // merge the interval below lowpt(ei) into p.r
            if let Some(prl) = p.r.low {
                self.edge_ref[prl] = q.r.high;
            }
            if q.r.low.is_some() {
                p.r.low = q.r.low;
            }
            match p.l.low {
                None => p.l.high = q.l.high,
                Some(pll) => self.edge_ref[pll] = q.l.high,
            }
            p.l.low = q.l.low;
        }

        if !(p.l.is_empty() && p.r.is_empty()) {
            self.stack.push(p);
        }
        true
    }

    fn lowest(&self, p: &ConflictPair) -> usize {
        match (p.l.low, p.r.low) {
            (Some(l), Some(r)) => self.lowpt[l].min(self.lowpt[r]),
            (Some(l), None) => self.lowpt[l],
            (None, Some(r)) => self.lowpt[r],
            (None, None) => usize::MAX,
        }
    }

    /// Drop back edges ending at `u` now that its subtree is done.
    fn trim_back_edges(&mut self, u: usize) {
        let hu = self.height[u].expect("parent vertex has a height");

        // whole conflict pairs returning to u
        while let Some(&top) = self.stack.last() {
            if self.lowest(&top) == hu {
                self.stack.pop();
            } else {
                break;
            }
        }

        if let Some(mut p) = self.stack.pop() {
            // trim left interval
            while let Some(h) = p.l.high {
                if self.edges[h].1 == u {
                    p.l.high = self.edge_ref[h];
                } else {
                    break;
                }
            }
            if p.l.high.is_none() {
                if let Some(pll) = p.l.low {
                    self.edge_ref[pll] = p.r.low;
                    p.l.low = None;
                }
            }
            // trim right interval
            while let Some(h) = p.r.high {
                if self.edges[h].1 == u {
                    p.r.high = self.edge_ref[h];
                } else {
                    break;
                }
            }
            if p.r.high.is_none() {
                if let Some(prl) = p.r.low {
                    self.edge_ref[prl] = p.l.low;
                    p.r.low = None;
                }
            }
            self.stack.push(p);
        }
    }
}
