//! Vertex colourings up to automorphism
//!
//! Colourings are visited in a depth-first search assigning colours to
//! the vertices `0, 1, ..., n - 1` in turn. Of every orbit of the
//! automorphism group only one colouring is reported. Two devices keep
//! the search small:
//!
//! * Interchangeable vertices ("twins") are detected in a pre-pass. A
//!   twin never gets a larger colour than its earlier partner, and the
//!   automorphism group is only computed for the partition of vertices
//!   by twin depth.
//! * A complete colouring is accepted if no group element maps it to a
//!   lexicographically larger one. A rejecting element also tells how
//!   far up the search can jump back.
use std::cmp::Ordering;
use std::ops::ControlFlow;

use log::{debug, trace};

use crate::autom::{AutomorphismEngine, AutomorphismGroup};
use crate::digraph::Digraph;
use crate::error::{check_order, Error};
use crate::group::Permutation;

/// Constraints on the colourings to enumerate
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColouringOptions {
    /// Colours are `0..num_colours`
    pub num_colours: u8,
    /// Lower bound on the sum of all vertex colours
    pub min_weight: usize,
    /// Upper bound on the sum of all vertex colours
    pub max_weight: Option<usize>,
}

impl Default for ColouringOptions {
    fn default() -> Self {
        Self {
            num_colours: 2,
            min_weight: 0,
            max_weight: None,
        }
    }
}

/// Interchangeable vertices
///
/// `prev[i]` is the most recent vertex `j < i` such that swapping `i`
/// and `j` is an automorphism, and `weight[i]` the length of the chain
/// of such predecessors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Twins {
    pub(crate) prev: Vec<Option<usize>>,
    pub(crate) weight: Vec<usize>,
}

impl Twins {
    pub(crate) fn new(g: &Digraph) -> Self {
        let n = g.order();
        let loops = g.loops();
        let out = g.without_loops();
        let inc = out.converse();
        let interchangeable = |i: usize, j: usize| {
            if loops.contains(i) != loops.contains(j)
                || out.has_edge(i, j) != out.has_edge(j, i)
            {
                return false;
            }
            let (oi, oj) = (out.out_neighbours(i), out.out_neighbours(j));
            let (ii, ij) = (inc.out_neighbours(i), inc.out_neighbours(j));
            (oi == oj && ii == ij)
                || (oi.toggled(i) == oj.toggled(j) && ii.toggled(i) == ij.toggled(j))
        };

        let mut prev = vec![None; n];
        let mut weight = vec![0; n];
        for i in 0..n {
            if let Some(j) = (0..i).rev().find(|&j| interchangeable(i, j)) {
                prev[i] = Some(j);
                weight[i] = weight[j] + 1;
            }
        }
        Self { prev, weight }
    }
}

/// Visit one colouring from every orbit of the automorphism group of `g`
///
/// Only colourings satisfying the bounds in `options` are considered.
/// Each representative is passed to `visit` exactly once. Returns the
/// number of representatives.
pub fn for_each_colouring<E, F>(
    g: &Digraph,
    engine: &E,
    options: &ColouringOptions,
    visit: F,
) -> Result<u64, Error>
where
    E: AutomorphismEngine,
    F: FnMut(&[u8]),
{
    let n = g.order();
    check_order(n)?;
    if options.num_colours == 0 {
        return Ok(0);
    }
    let top = (options.num_colours - 1) as usize;
    let max_total = n * top;
    if options.min_weight > max_total {
        return Ok(0);
    }
    let max_weight = options.max_weight.map_or(max_total, |m| m.min(max_total));

    let Twins { mut prev, weight } = Twins::new(g);
    let autom = engine.automorphisms(g, &weight)?;
    debug_assert_eq!(autom.group.degree(), n);
    let group_order = autom.group.order();
    debug!(
        "{n} vertices, {} twins, group order {group_order}, {} generators",
        prev.iter().flatten().count(),
        autom.group.generators().len()
    );

    if autom.num_orbits() < n {
        let least_moved = autom
            .orbits
            .iter()
            .enumerate()
            .filter(|&(i, &o)| o < i)
            .map(|(_, &o)| o)
            .min();
        if let Some(j) = least_moved {
            for i in j + 1..n {
                if autom.orbits[i] == j {
                    prev[i] = Some(j);
                }
            }
        }
    }

    let mut search = Search {
        n,
        top,
        min_weight: options.min_weight,
        max_weight,
        prev,
        group: &autom.group,
        group_order,
        col: vec![0; n],
        last_reject: None,
        fail_level: 0,
        visit,
        found: 0,
    };
    search.scan(0, 0);
    Ok(search.found)
}

/// Compare a colouring with its image under `p`
///
/// Returns the fail level if the image is lexicographically larger.
fn is_max(col: &[u8], p: &Permutation) -> Result<(), usize> {
    let mut fail = 0;
    for (i, &k) in p.images().iter().enumerate() {
        fail = fail.max(k);
        match col[k].cmp(&col[i]) {
            Ordering::Greater => return Err(fail),
            Ordering::Less => return Ok(()),
            Ordering::Equal => {}
        }
    }
    Ok(())
}

struct Search<'a, G, F> {
    n: usize,
    top: usize,
    min_weight: usize,
    max_weight: usize,
    prev: Vec<Option<usize>>,
    group: &'a G,
    group_order: u128,
    col: Vec<u8>,
    last_reject: Option<Permutation>,
    fail_level: usize,
    visit: F,
    found: u64,
}

impl<'a, G, F> Search<'a, G, F>
where
    G: AutomorphismGroup,
    F: FnMut(&[u8]),
{
    /// Colour `level` and all later vertices
    ///
    /// Returns the level the search should continue at; all deeper
    /// levels return immediately.
    fn scan(&mut self, level: usize, sofar: usize) -> isize {
        if level == self.n {
            return self.try_this_one();
        }
        let left = self.n - level - 1;
        let min = self.min_weight.saturating_sub(sofar + self.top * left);
        let mut max = (self.max_weight - sofar).min(self.top);
        if let Some(p) = self.prev[level] {
            max = max.min(self.col[p] as usize);
        }

        for k in min..=max {
            self.col[level] = k as u8;
            let ret = self.scan(level + 1, sofar + k);
            if ret < level as isize {
                return ret;
            }
        }
        level as isize - 1
    }

    fn try_this_one(&mut self) -> isize {
        let accept = if self.group_order == 1 {
            true
        } else if let Some(Err(fail)) =
            self.last_reject.as_ref().map(|p| is_max(&self.col, p))
        {
            self.fail_level = fail;
            false
        } else if self.last_reject.is_some() && self.group_order == 2 {
            true
        } else {
            self.test_group()
        };

        if accept {
            trace!("canonical colouring {:?}", self.col);
            self.found += 1;
            (self.visit)(&self.col);
            self.n as isize - 1
        } else {
            self.fail_level as isize - 1
        }
    }

    fn test_group(&mut self) -> bool {
        let col = &self.col;
        let mut first = true;
        let res = self.group.try_for_each_element(|p| {
            if std::mem::take(&mut first) {
                // identity
                return ControlFlow::Continue(());
            }
            match is_max(col, p) {
                Ok(()) => ControlFlow::Continue(()),
                Err(fail) => ControlFlow::Break((p.clone(), fail)),
            }
        });
        match res {
            ControlFlow::Continue(()) => true,
            ControlFlow::Break((p, fail)) => {
                self.last_reject = Some(p);
                self.fail_level = fail;
                false
            }
        }
    }
}
