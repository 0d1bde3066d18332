use petgraph::{
    graph::{DiGraph, Graph, IndexType},
    visit::{EdgeRef, NodeIndexable},
    Directed,
};

use crate::set::{VertexSet, SET_CAPACITY};

/// Directed graph on the vertices `0..n` stored as packed adjacency rows
///
/// Row `v` holds the out-neighbours of `v`. Self-loops are allowed
/// and stored like any other edge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Digraph {
    rows: Vec<VertexSet>,
}

impl Digraph {
    /// Digraph with `n` vertices and no edges
    ///
    /// # Panics
    ///
    /// If `n` exceeds [SET_CAPACITY].
    pub fn new(n: usize) -> Self {
        assert!(n <= SET_CAPACITY, "{n} vertices do not fit into a VertexSet");
        Self {
            rows: vec![VertexSet::empty(); n],
        }
    }

    pub fn from_edges<I>(n: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut g = Self::new(n);
        for (source, target) in edges {
            g.add_edge(source, target);
        }
        g
    }

    /// Number of vertices
    pub fn order(&self) -> usize {
        self.rows.len()
    }

    pub fn vertices(&self) -> VertexSet {
        VertexSet::full(self.order())
    }

    pub fn add_edge(&mut self, source: usize, target: usize) {
        assert!(target < self.order());
        self.rows[source].insert(target)
    }

    pub fn has_edge(&self, source: usize, target: usize) -> bool {
        self.rows[source].contains(target)
    }

    pub fn out_neighbours(&self, v: usize) -> VertexSet {
        self.rows[v]
    }

    /// All edges `(source, target)`, ordered by source and then target
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(v, row)| row.iter().map(move |w| (v, w)))
    }

    pub fn edge_count(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }

    /// Vertices carrying a self-loop
    pub fn loops(&self) -> VertexSet {
        self.rows
            .iter()
            .enumerate()
            .filter(|(v, row)| row.contains(*v))
            .map(|(v, _)| v)
            .collect()
    }

    /// Copy of the digraph with all self-loops removed
    pub fn without_loops(&self) -> Self {
        let mut g = self.clone();
        for (v, row) in g.rows.iter_mut().enumerate() {
            row.remove(v);
        }
        g
    }

    /// The digraph with all edges reversed
    pub fn converse(&self) -> Self {
        let mut g = Self::new(self.order());
        for (source, target) in self.edges() {
            g.add_edge(target, source);
        }
        g
    }

    /// Extend by one new vertex `n` with an edge from every vertex in `marked`
    ///
    /// # Panics
    ///
    /// If the digraph is already at [SET_CAPACITY].
    pub fn with_sink(&self, marked: VertexSet) -> Self {
        let n = self.order();
        debug_assert!(marked.is_subset(self.vertices()));
        let mut rows = Vec::with_capacity(n + 1);
        rows.extend_from_slice(&self.rows);
        rows.push(VertexSet::empty());
        let mut g = Self { rows };
        assert!(g.order() <= SET_CAPACITY);
        for v in marked {
            g.add_edge(v, n);
        }
        g
    }

    /// All vertices reachable from `v`, including `v` itself
    pub fn reachable_from(&self, v: usize) -> VertexSet {
        let mut seen = VertexSet::singleton(v);
        let mut frontier = seen;
        while let Some(w) = frontier.first() {
            frontier.remove(w);
            let new = self.rows[w] - seen;
            seen |= new;
            frontier |= new;
        }
        seen
    }

    /// Whether `v` has no outgoing edges and is reachable from every vertex
    pub fn is_global_sink(&self, v: usize) -> bool {
        self.rows[v].is_empty()
            && (0..self.order()).all(|w| self.reachable_from(w).contains(v))
    }
}

impl<N, E, Ix: IndexType> From<&Graph<N, E, Directed, Ix>> for Digraph {
    fn from(g: &Graph<N, E, Directed, Ix>) -> Self {
        Self::from_edges(
            g.node_count(),
            g.edge_references()
                .map(|e| (g.to_index(e.source()), g.to_index(e.target()))),
        )
    }
}

impl From<&Digraph> for DiGraph<(), ()> {
    fn from(g: &Digraph) -> Self {
        let mut res = DiGraph::with_capacity(g.order(), g.edge_count());
        for _ in 0..g.order() {
            res.add_node(());
        }
        for (source, target) in g.edges() {
            let source = res.from_index(source);
            let target = res.from_index(target);
            res.add_edge(source, target, ());
        }
        res
    }
}
