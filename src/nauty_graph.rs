use std::fmt::Debug;
use std::os::raw::c_int;

use itertools::izip;
use nauty_Traces_sys::{empty_graph, graph, ADDONEARC, SETWORDSNEEDED};

use crate::digraph::Digraph;

/// A digraph in nauty's dense format together with a vertex partition
#[derive(Debug, Default, Clone)]
pub(crate) struct DenseGraph {
    pub(crate) n: usize,
    pub(crate) m: usize,
    pub(crate) g: Vec<graph>,
    pub(crate) nodes: Nodes,
}

/// Vertex partition in nauty's `lab`/`ptn` encoding
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq)]
pub(crate) struct Nodes {
    pub(crate) lab: Vec<c_int>,
    pub(crate) ptn: Vec<c_int>,
}

impl Nodes {
    /// Cells of vertices with equal weight, in increasing weight order
    pub(crate) fn from_weights<W: Ord>(weights: &[W]) -> Self {
        let mut order = Vec::from_iter(0..weights.len());
        order.sort_by(|&i, &j| weights[i].cmp(&weights[j]));
        let mut ptn = vec![1; order.len()];
        for (ptn, w) in izip!(&mut ptn, order.windows(2)) {
            if weights[w[1]] > weights[w[0]] {
                *ptn = 0;
            }
        }
        if let Some(last) = ptn.last_mut() {
            *last = 0;
        }
        let lab = order.into_iter().map(|v| v as c_int).collect();
        Self { lab, ptn }
    }
}

impl DenseGraph {
    pub(crate) fn new<W: Ord>(g: &Digraph, weights: &[W]) -> Self {
        debug_assert_eq!(g.order(), weights.len());
        let n = g.order();
        let m = SETWORDSNEEDED(n);
        let mut dg = empty_graph(m, n);
        for (source, target) in g.edges() {
            ADDONEARC(&mut dg, source, target, m);
        }
        Self {
            n,
            m,
            g: dg,
            nodes: Nodes::from_weights(weights),
        }
    }
}

impl From<&Digraph> for DenseGraph {
    fn from(g: &Digraph) -> Self {
        Self::new(g, &vec![0u8; g.order()])
    }
}

pub(crate) fn inv_perm<I>(perm: &[I]) -> Vec<usize>
where
    I: Copy + TryInto<usize>,
    <I as TryInto<usize>>::Error: Debug,
{
    let mut relabel = vec![0; perm.len()];
    for (new, &old) in perm.iter().enumerate() {
        let old = old.try_into().unwrap();
        relabel[old] = new;
    }
    relabel
}
