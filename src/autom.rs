//! Automorphism groups of digraphs
//!
//! The colouring search only needs a few capabilities of an
//! automorphism group, collected in [AutomorphismGroup]. Any
//! [AutomorphismEngine] able to produce such a group can drive the
//! search; [NautyEngine] uses dense nauty and its group records.
use std::ops::ControlFlow;
use std::os::raw::c_int;
use std::ptr::addr_of;

use log::trace;
use nauty_Traces_sys::{
    densenauty, groupautomproc, grouplevelproc, groupptr, grouprec, levelrec,
    makecosetreps, optionblk, permrec, statsblk, FALSE, MTOOBIG, NTOOBIG,
};

use crate::digraph::Digraph;
use crate::error::Error;
use crate::group::{Level, PermGroup, Permutation};
use crate::nauty_graph::DenseGraph;

/// A group of vertex permutations acting on colourings
pub trait AutomorphismGroup {
    /// Number of points the group acts on
    fn degree(&self) -> usize;

    fn generators(&self) -> &[Permutation];

    /// The group order, saturating at `u128::MAX`
    fn order(&self) -> u128;

    /// Visit every group element, starting with the identity
    fn try_for_each_element<B, F>(&self, f: F) -> ControlFlow<B>
    where
        F: FnMut(&Permutation) -> ControlFlow<B>;
}

impl AutomorphismGroup for PermGroup {
    fn degree(&self) -> usize {
        PermGroup::degree(self)
    }

    fn generators(&self) -> &[Permutation] {
        PermGroup::generators(self)
    }

    fn order(&self) -> u128 {
        PermGroup::order(self)
    }

    fn try_for_each_element<B, F>(&self, f: F) -> ControlFlow<B>
    where
        F: FnMut(&Permutation) -> ControlFlow<B>,
    {
        PermGroup::try_for_each_element(self, f)
    }
}

/// Automorphism group of a digraph together with its vertex orbits
#[derive(Clone, Debug)]
pub struct Automorphisms<G = PermGroup> {
    pub group: G,
    /// `orbits[v]` is the smallest vertex in the orbit of `v`
    pub orbits: Vec<usize>,
}

impl<G: AutomorphismGroup> Automorphisms<G> {
    pub fn num_orbits(&self) -> usize {
        self.orbits
            .iter()
            .enumerate()
            .filter(|&(v, &o)| v == o)
            .count()
    }
}

/// Computes automorphism groups
pub trait AutomorphismEngine {
    type Group: AutomorphismGroup;

    /// Automorphisms of `g` that preserve the vertex `weights`
    ///
    /// Self-loops are part of the structure to preserve.
    fn automorphisms(
        &self,
        g: &Digraph,
        weights: &[usize],
    ) -> Result<Automorphisms<Self::Group>, Error>;
}

/// Automorphism engine backed by dense nauty
///
/// nauty's group records live in thread-local storage, so the engine
/// can be used from several threads at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NautyEngine;

fn nauty_options(n: usize) -> optionblk {
    optionblk {
        getcanon: FALSE,
        defaultptn: FALSE,
        userautomproc: Some(groupautomproc),
        userlevelproc: Some(grouplevelproc),
        maxinvarlevel: n as c_int,
        ..optionblk::default_digraph()
    }
}

// nauty reports the order as grpsize1 * 10^grpsize2
fn group_order(stats: &statsblk) -> u128 {
    if stats.grpsize2 == 0 {
        (stats.grpsize1 + 0.1) as u128
    } else {
        (stats.grpsize1 * 10f64.powi(stats.grpsize2)) as u128
    }
}

unsafe fn read_perm(p: *const permrec, n: usize) -> Option<Permutation> {
    if p.is_null() {
        return None;
    }
    let images = std::slice::from_raw_parts(addr_of!((*p).p) as *const c_int, n);
    let images = images.iter().map(|&i| i as usize).collect();
    Some(Permutation::from_images_unchecked(images))
}

/// Copy the group nauty recorded during the last call on this thread
///
/// `grp` must have its coset representatives filled in by
/// `makecosetreps`.
unsafe fn read_group(grp: *const grouprec, order: u128) -> PermGroup {
    let n = (*grp).n as usize;
    let depth = (*grp).depth as usize;
    let levelinfo = addr_of!((*grp).levelinfo) as *const levelrec;
    let mut levels = Vec::with_capacity(depth);
    for i in 0..depth {
        let level = *levelinfo.add(i);
        let replist = std::slice::from_raw_parts(level.replist, level.orbitsize as usize);
        let reps = replist.iter().map(|cr| read_perm(cr.rep, n)).collect();
        levels.push(Level::new(level.fixedpt as usize, reps));
    }
    let mut generators = Vec::new();
    if depth > 0 {
        // the top level holds all generators
        let mut gen = (*levelinfo).gens;
        while let Some(p) = read_perm(gen, n) {
            generators.push(p);
            gen = (*gen).ptr;
        }
    }
    PermGroup::from_chain(n, generators, levels, order)
}

impl AutomorphismEngine for NautyEngine {
    type Group = PermGroup;

    fn automorphisms(
        &self,
        g: &Digraph,
        weights: &[usize],
    ) -> Result<Automorphisms, Error> {
        use Error::*;

        let n = g.order();
        if n == 0 {
            return Ok(Automorphisms {
                group: PermGroup::trivial(0),
                orbits: Vec::new(),
            });
        }
        let mut options = nauty_options(n);
        let mut stats = statsblk::default();
        let mut dg = DenseGraph::new(g, weights);
        let mut orbits = vec![0; dg.n];
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
                std::ptr::null_mut(),
            );
        }
        match stats.errstatus {
            0 => {}
            MTOOBIG => return Err(MTooBig),
            NTOOBIG => return Err(NTooBig),
            _ => unreachable!(),
        }
        let order = group_order(&stats);
        let group = unsafe {
            let grp = groupptr(FALSE);
            if grp.is_null() {
                PermGroup::trivial(n)
            } else {
                makecosetreps(grp);
                read_group(grp, order)
            }
        };
        trace!(
            "nauty found {} generators, group order {order}",
            group.generators().len()
        );
        Ok(Automorphisms {
            group,
            orbits: orbits.into_iter().map(|o| o as usize).collect(),
        })
    }
}
