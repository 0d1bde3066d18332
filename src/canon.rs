use std::fmt::Debug;
use std::os::raw::c_int;

use nauty_Traces_sys::{
    densenauty, empty_graph, optionblk, statsblk, FALSE, MTOOBIG, NTOOBIG, TRUE,
};

use crate::digraph::Digraph;
use crate::error::Error;
use crate::nauty_graph::{inv_perm, DenseGraph};

/// Find the canonical labelling for a digraph
pub trait IntoCanon {
    fn into_canon(self) -> Self;
}

/// Try to find the canonical labelling for a digraph
pub trait TryIntoCanon {
    type Error;

    fn try_into_canon(self) -> Result<Self, Self::Error>
    where
        Self: Sized;
}

impl<T> IntoCanon for T
where
    T: TryIntoCanon,
    <T as TryIntoCanon>::Error: Debug,
{
    fn into_canon(self) -> Self {
        self.try_into_canon().unwrap()
    }
}

impl TryIntoCanon for Digraph {
    type Error = Error;

    fn try_into_canon(self) -> Result<Self, Self::Error> {
        use Error::*;

        if self.order() == 0 {
            return Ok(self);
        }
        let mut options = optionblk {
            getcanon: TRUE,
            defaultptn: FALSE,
            ..optionblk::default_digraph()
        };
        let mut stats = statsblk::default();
        let mut dg = DenseGraph::from(&self);
        let mut orbits = vec![0; dg.n];
        let mut cg = empty_graph(dg.m, dg.n);
        unsafe {
            densenauty(
                dg.g.as_mut_ptr(),
                dg.nodes.lab.as_mut_ptr(),
                dg.nodes.ptn.as_mut_ptr(),
                orbits.as_mut_ptr(),
                &mut options,
                &mut stats,
                dg.m as c_int,
                dg.n as c_int,
                cg.as_mut_ptr(),
            );
        }
        match stats.errstatus {
            0 => {}
            MTOOBIG => return Err(MTooBig),
            NTOOBIG => return Err(NTooBig),
            _ => unreachable!(),
        }
        // lab[i] is the vertex placed at position i
        let relabel = inv_perm(&dg.nodes.lab);
        Ok(Digraph::from_edges(
            self.order(),
            self.edges().map(|(v, w)| (relabel[v], relabel[w])),
        ))
    }
}

/// Canonically labelled digraph
///
/// Two digraphs are isomorphic exactly if their canonical forms
/// compare equal, so `CanonDigraph` can be used to collect
/// isomorphism classes in hash sets and tables.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CanonDigraph(Digraph);

impl CanonDigraph {
    /// Canonically relabel a copy of `g`
    pub fn new(g: &Digraph) -> Result<Self, Error> {
        Self::try_from(g)
    }

    pub fn order(&self) -> usize {
        self.0.order()
    }
}

impl TryFrom<Digraph> for CanonDigraph {
    type Error = Error;

    fn try_from(g: Digraph) -> Result<Self, Self::Error> {
        g.try_into_canon().map(Self)
    }
}

impl TryFrom<&Digraph> for CanonDigraph {
    type Error = Error;

    fn try_from(g: &Digraph) -> Result<Self, Self::Error> {
        Self::try_from(g.clone())
    }
}

impl From<CanonDigraph> for Digraph {
    fn from(g: CanonDigraph) -> Self {
        g.0
    }
}

impl AsRef<Digraph> for CanonDigraph {
    fn as_ref(&self) -> &Digraph {
        &self.0
    }
}
