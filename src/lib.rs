//! Digraphs with a unique global sink.
//!
//! For a digraph `G`, finds all ways up to isomorphism to add one new
//! vertex `s` with edges into `s` from a set of old vertices, such that
//! `s` becomes a global sink: it has no outgoing edges and can be
//! reached from every vertex. The new vertex has to receive an edge
//! from at least one vertex in every leaf of the condensation of `G`.
//!
//! Vertex sets are enumerated as two-colourings of `G`, one per orbit
//! of the automorphism group. Automorphism groups are computed with
//! [nauty](http://pallini.di.uniroma1.it/).
//!
//! # Example
//!
//! ```rust
//! use gsinks::prelude::*;
//!
//! // A directed two-cycle
//! let g = Digraph::from_edges(2, [(0, 1), (1, 0)]);
//!
//! // The new vertex gets an edge from one or from both cycle vertices
//! let mut extensions = Vec::new();
//! let options = ExtensionOptions { construct: true };
//! let count = count_sink_extensions(&g, &NautyEngine, &options, |h| {
//!     extensions.push(h)
//! }).unwrap();
//! assert_eq!(count, 2);
//! assert!(extensions.iter().all(|h| h.is_global_sink(2)));
//!
//! // The extensions are pairwise non-isomorphic
//! let c1 = CanonDigraph::new(&extensions[0]).unwrap();
//! let c2 = CanonDigraph::new(&extensions[1]).unwrap();
//! assert_ne!(c1, c2);
//!
//! // Digraphs are read and written in digraph6 format
//! assert_eq!(to_digraph6(&g), "&AW");
//! assert_eq!(from_digraph6("&AW").unwrap(), g);
//! ```
//!
//! # Features
//!
//! * `build-binary`: Builds the `gsinks` command-line tool, reading
//!                   digraph6 files.
//!
//! * `parallel`: Enables
//!               [count_batch_parallel](driver::count_batch_parallel),
//!               which processes the digraphs of a batch with
//!               [rayon](https://crates.io/crates/rayon).
pub mod autom;
pub mod canon;
pub mod colour;
pub mod digraph;
pub mod digraph6;
pub mod driver;
pub mod error;
pub mod group;
mod nauty_graph;
pub mod prelude;
pub mod scc;
pub mod set;
pub mod sink;

pub use canon::IntoCanon;
pub use driver::count_sink_extensions;
pub use error::Error;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn log_init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn count(g: &Digraph) -> u64 {
        count_sink_extensions(g, &NautyEngine, &Default::default(), |_| {}).unwrap()
    }

    #[test]
    fn transitive_tournament() {
        log_init();

        // 0 -> 1 -> 2, 0 -> 2: only vertex 2 is a leaf and the group
        // is trivial, so any superset of {2} works
        let g = Digraph::from_edges(3, [(0, 1), (1, 2), (0, 2)]);
        assert_eq!(count(&g), 4);
    }

    #[test]
    fn empty_digraphs() {
        log_init();

        // every vertex is a leaf and has to be marked
        for n in 0..8 {
            assert_eq!(count(&Digraph::new(n)), 1);
        }
    }

    #[test]
    fn out_star() {
        log_init();

        // 0 -> 1, ..., 0 -> n - 1: all leaves are marked, the centre
        // is optional
        for n in 2..8 {
            let g = Digraph::from_edges(n, (1..n).map(|v| (0, v)));
            assert_eq!(count(&g), 2);
        }
    }

    #[test]
    fn in_star() {
        log_init();

        // 1 -> 0, ..., n - 1 -> 0: the centre is the only leaf, the
        // others are interchangeable
        for n in 2..8 {
            let g = Digraph::from_edges(n, (1..n).map(|v| (v, 0)));
            assert_eq!(count(&g), n as u64);
        }
    }

    #[test]
    fn directed_cycles() {
        log_init();

        // cyclic necklaces with two colours and at least one black bead
        let necklaces = [1, 2, 3, 5, 7, 13, 19];
        for (n, expected) in (1..).zip(necklaces) {
            let g = Digraph::from_edges(n, (0..n).map(|v| (v, (v + 1) % n)));
            assert_eq!(count(&g), expected, "cycle of length {n}");
        }
    }
}
