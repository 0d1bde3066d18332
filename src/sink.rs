//! Admissible colourings and the digraphs they extend to
//!
//! A colouring marks the vertices that get an edge to the new sink.
//! It is admissible if it marks a vertex in every leaf component, so
//! that the new vertex is reachable from everywhere.
use log::trace;

use crate::digraph::Digraph;
use crate::scc::SccDecomposition;
use crate::set::VertexSet;

/// The vertices with a non-zero colour
pub fn marked_vertices(colouring: &[u8]) -> VertexSet {
    colouring
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c != 0)
        .map(|(v, _)| v)
        .collect()
}

/// Filters colourings and builds the extended digraphs
pub struct SinkBuilder<'a, F> {
    g: &'a Digraph,
    scc: &'a SccDecomposition,
    construct: bool,
    emit: F,
    count: u64,
}

impl<'a, F> SinkBuilder<'a, F>
where
    F: FnMut(Digraph),
{
    /// If `construct` is set, every accepted extension is passed to `emit`
    pub fn new(
        g: &'a Digraph,
        scc: &'a SccDecomposition,
        construct: bool,
        emit: F,
    ) -> Self {
        Self {
            g,
            scc,
            construct,
            emit,
            count: 0,
        }
    }

    /// Whether the colouring hits every leaf component
    pub fn is_admissible(&self, colouring: &[u8]) -> bool {
        self.scc.leaves_hit_by(marked_vertices(colouring))
    }

    /// Count the colouring if it is admissible
    pub fn offer(&mut self, colouring: &[u8]) -> bool {
        let marked = marked_vertices(colouring);
        if !self.scc.leaves_hit_by(marked) {
            return false;
        }
        if self.construct {
            let extended = self.g.with_sink(marked);
            trace!("extension {extended:?}");
            (self.emit)(extended);
        }
        self.count += 1;
        true
    }

    /// Number of accepted colourings so far
    pub fn count(&self) -> u64 {
        self.count
    }
}
