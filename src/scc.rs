//! Strongly connected components and the leaves of their condensation
//!
//! Components are found with Tarjan's algorithm. A component is a
//! leaf if none of its vertices has an edge leaving it, i.e. it is a
//! sink of the condensation DAG.
use log::trace;

use crate::digraph::Digraph;
use crate::set::VertexSet;

/// A strongly connected component
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scc {
    vertices: VertexSet,
    is_leaf: bool,
}

impl Scc {
    pub fn vertices(&self) -> VertexSet {
        self.vertices
    }

    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    /// Whether no edge leaves the component
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }
}

/// Partition of a digraph into strongly connected components
///
/// Components are indexed in the order in which they are completed,
/// which is a reverse topological order of the condensation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SccDecomposition {
    components: Vec<Scc>,
    component_of: Vec<usize>,
    discovery: Vec<usize>,
}

impl SccDecomposition {
    pub fn new(g: &Digraph) -> Self {
        Tarjan::new(g).run()
    }

    pub fn components(&self) -> &[Scc] {
        &self.components
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Scc> + '_ {
        self.components.iter().filter(|c| c.is_leaf)
    }

    /// Index of the component containing `v`
    pub fn component_of(&self, v: usize) -> usize {
        self.component_of[v]
    }

    /// Discovery index of each vertex in the depth-first search
    pub fn discovery_order(&self) -> &[usize] {
        &self.discovery
    }

    /// Whether every leaf component contains at least one vertex in `marked`
    pub fn leaves_hit_by(&self, marked: VertexSet) -> bool {
        self.leaves().all(|c| !c.vertices.is_disjoint(marked))
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct VertexState {
    index: Option<usize>,
    lowlink: usize,
    on_stack: bool,
    // direct successors seen during the search
    descendants: VertexSet,
}

struct Tarjan<'a> {
    g: &'a Digraph,
    next_index: usize,
    stack: Vec<usize>,
    vertices: Vec<VertexState>,
    components: Vec<Scc>,
}

impl<'a> Tarjan<'a> {
    fn new(g: &'a Digraph) -> Self {
        Self {
            g,
            next_index: 0,
            stack: Vec::with_capacity(g.order()),
            vertices: vec![VertexState::default(); g.order()],
            components: Vec::new(),
        }
    }

    fn run(mut self) -> SccDecomposition {
        for v in 0..self.g.order() {
            if self.vertices[v].index.is_none() {
                self.strong_connect(v);
            }
        }
        debug_assert!(self.stack.is_empty());

        let mut component_of = vec![0; self.g.order()];
        for (idx, c) in self.components.iter().enumerate() {
            for v in c.vertices {
                component_of[v] = idx;
            }
        }
        let discovery = self
            .vertices
            .iter()
            .map(|s| s.index.unwrap_or_default())
            .collect();
        SccDecomposition {
            components: self.components,
            component_of,
            discovery,
        }
    }

    fn strong_connect(&mut self, v: usize) {
        let index = self.next_index;
        self.next_index += 1;
        self.vertices[v].index = Some(index);
        self.vertices[v].lowlink = index;
        self.vertices[v].on_stack = true;
        self.stack.push(v);

        for w in self.g.out_neighbours(v) {
            self.vertices[v].descendants.insert(w);
            match self.vertices[w].index {
                None => {
                    self.strong_connect(w);
                    let lowlink = self.vertices[w].lowlink;
                    let state = &mut self.vertices[v];
                    state.lowlink = state.lowlink.min(lowlink);
                }
                Some(w_index) if self.vertices[w].on_stack => {
                    let state = &mut self.vertices[v];
                    state.lowlink = state.lowlink.min(w_index);
                }
                Some(_) => {}
            }
        }

        if self.vertices[v].lowlink == index {
            self.complete_component(v);
        }
    }

    fn complete_component(&mut self, root: usize) {
        let mut members = VertexSet::empty();
        let mut descendants = VertexSet::empty();
        while let Some(w) = self.stack.pop() {
            self.vertices[w].on_stack = false;
            members.insert(w);
            descendants |= self.vertices[w].descendants;
            if w == root {
                break;
            }
        }
        let leaves_component = !(descendants - members).is_empty();
        // The first component to be completed cannot have any
        // successor components left to visit.
        let is_leaf = if self.components.is_empty() {
            debug_assert!(!leaves_component);
            true
        } else {
            !leaves_component
        };
        trace!("SCC {}: {members:?}, leaf: {is_leaf}", self.components.len());
        self.components.push(Scc {
            vertices: members,
            is_leaf,
        });
    }
}
