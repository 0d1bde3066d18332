use std::collections::HashSet;

use itertools::Itertools;
use petgraph::{
    graph::{DiGraph, Graph, NodeIndex},
    visit::{EdgeRef, NodeIndexable},
    EdgeType,
};
use rand::{
    distributions::Uniform,
    prelude::*
};
use rand_distr::Normal;
use rand_xoshiro::Xoshiro256Plus;

/// Deterministic stream of random digraphs
pub struct DigraphIter {
    rng: Xoshiro256Plus,
    node_distr: Uniform<usize>,
    edge_distr: Normal<f64>,
    loops: bool,
}

impl Default for DigraphIter {
    fn default() -> Self {
        Self {
            rng: Xoshiro256Plus::seed_from_u64(0),
            node_distr: Uniform::from(1..9),
            edge_distr: Normal::new(0.5, 1.0).unwrap(),
            loops: false,
        }
    }
}

impl DigraphIter {
    /// Also generate self-loops
    pub fn with_loops(mut self, loops: bool) -> Self {
        self.loops = loops;
        self
    }

    /// Generate digraphs with between one and `n` vertices
    pub fn max_order(mut self, n: usize) -> Self {
        self.node_distr = Uniform::from(1..=n);
        self
    }
}

impl Iterator for DigraphIter {
    type Item = DiGraph<(), ()>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut rng = &mut self.rng;
        let mut g = DiGraph::default();
        let nnodes = self.node_distr.sample(&mut rng);
        for _ in 0..nnodes {
            g.add_node(());
        }
        for i in 0..nnodes {
            for j in 0..nnodes {
                if i == j && !self.loops {
                    continue;
                }
                let edge = self.edge_distr.sample(&mut rng)
                    .clamp(0.0, 1.0)
                    .round() as u64;
                if edge > 0 {
                    g.add_edge(g.from_index(i), g.from_index(j), ());
                }
            }
        }
        Some(g)
    }
}

/// Randomly permute the vertices of a graph
pub fn randomize_labels<N, E, Ty, R>(
    g: Graph<N, E, Ty>,
    rng: &mut R,
) -> Graph<N, E, Ty>
where
    Ty: EdgeType,
    R: Rng,
{
    let mut perm = Vec::from_iter(0..g.node_count());
    perm.shuffle(rng);
    let mut new_index = vec![0; perm.len()];
    for (new, &old) in perm.iter().enumerate() {
        new_index[old] = new;
    }

    let (nodes, edges) = g.into_nodes_edges();
    let mut weights = Vec::from_iter(nodes.into_iter().map(|n| Some(n.weight)));
    let mut res = Graph::with_capacity(perm.len(), edges.len());
    for &old in &perm {
        if let Some(weight) = weights[old].take() {
            res.add_node(weight);
        }
    }
    for e in edges {
        let source = NodeIndex::new(new_index[e.source().index()]);
        let target = NodeIndex::new(new_index[e.target().index()]);
        res.add_edge(source, target, e.weight);
    }
    res
}

fn adjacency(g: &DiGraph<(), ()>) -> Vec<Vec<bool>> {
    let n = g.node_count();
    let mut adj = vec![vec![false; n]; n];
    for e in g.edge_references() {
        adj[g.to_index(e.source())][g.to_index(e.target())] = true;
    }
    adj
}

/// All automorphisms, found by trying every vertex permutation
///
/// `p[v]` is the image of vertex `v`.
pub fn brute_force_automorphisms(g: &DiGraph<(), ()>) -> Vec<Vec<usize>> {
    let n = g.node_count();
    let adj = adjacency(g);
    (0..n)
        .permutations(n)
        .filter(|p| {
            (0..n).all(|i| (0..n).all(|j| adj[i][j] == adj[p[i]][p[j]]))
        })
        .collect()
}

/// Number of orbits of the automorphism group on vertex colourings
///
/// Only colourings with `num_colours` colours whose sum lies in
/// `[min, max]` are considered.
pub fn count_colouring_orbits(
    g: &DiGraph<(), ()>,
    num_colours: u8,
    min: usize,
    max: usize,
) -> usize {
    let n = g.node_count();
    let autom = brute_force_automorphisms(g);
    let k = num_colours as usize;
    let mut orbits = HashSet::new();
    for mut code in 0..k.pow(n as u32) {
        let mut col = Vec::with_capacity(n);
        for _ in 0..n {
            col.push((code % k) as u8);
            code /= k;
        }
        let sum: usize = col.iter().map(|&c| c as usize).sum();
        if sum < min || sum > max {
            continue;
        }
        let rep = autom
            .iter()
            .map(|p| Vec::from_iter(p.iter().map(|&i| col[i])))
            .max()
            .unwrap();
        orbits.insert(rep);
    }
    orbits.len()
}

/// Whether no edge leaves the given set of vertices
pub fn is_leaf_component(g: &DiGraph<(), ()>, component: &[usize]) -> bool {
    g.edge_references().all(|e| {
        !component.contains(&g.to_index(e.source()))
            || component.contains(&g.to_index(e.target()))
    })
}
