//! Counting sink extensions of single digraphs and of whole batches
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use log::{debug, info};

use crate::autom::AutomorphismEngine;
use crate::colour::{for_each_colouring, ColouringOptions};
use crate::digraph::Digraph;
use crate::error::{check_order, Error};
use crate::scc::SccDecomposition;
use crate::sink::SinkBuilder;

/// What to do with accepted extensions
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExtensionOptions {
    /// Build every extended digraph and pass it to the caller
    pub construct: bool,
}

/// Count the non-isomorphic ways to add a global sink to `g`
///
/// The new vertex receives edges from a set of old vertices that meets
/// every leaf component of `g`. For the empty digraph this is the empty
/// set, so its only extension is a single vertex. With `options.construct`,
/// one representative of every isomorphism class is passed to `emit`.
pub fn count_sink_extensions<E, F>(
    g: &Digraph,
    engine: &E,
    options: &ExtensionOptions,
    emit: F,
) -> Result<u64, Error>
where
    E: AutomorphismEngine,
    F: FnMut(Digraph),
{
    check_order(g.order())?;
    let scc = SccDecomposition::new(g);
    debug!(
        "{} components, {} leaves",
        scc.components().len(),
        scc.leaves().count()
    );
    let mut builder = SinkBuilder::new(g, &scc, options.construct, emit);
    let visited = for_each_colouring(g, engine, &ColouringOptions::default(), |c| {
        builder.offer(c);
    })?;
    let count = builder.count();
    debug!("{count} of {visited} colourings admissible");
    Ok(count)
}

/// Running totals for a batch of digraphs of the same order
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tally {
    digraphs: u64,
    total: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the count for one more digraph
    pub fn record(&mut self, count: u64) {
        self.digraphs += 1;
        self.total += count;
    }

    /// Number of digraphs processed
    pub fn digraphs(&self) -> u64 {
        self.digraphs
    }

    /// Sum of the counts of all processed digraphs
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Add for Tally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            digraphs: self.digraphs + rhs.digraphs,
            total: self.total + rhs.total,
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Count sink extensions for every digraph in a batch
///
/// Stops at the first error, whether it comes from the input or from
/// processing a digraph.
pub fn count_batch<I, E, F>(
    digraphs: I,
    engine: &E,
    options: &ExtensionOptions,
    mut emit: F,
) -> Result<Tally, Error>
where
    I: IntoIterator<Item = Result<Digraph, Error>>,
    E: AutomorphismEngine,
    F: FnMut(Digraph),
{
    let mut tally = Tally::new();
    for g in digraphs {
        let g = g?;
        let count = count_sink_extensions(&g, engine, options, &mut emit)?;
        tally.record(count);
    }
    info!(
        "{} digraphs, {} sink extensions",
        tally.digraphs(),
        tally.total()
    );
    Ok(tally)
}

/// Count sink extensions for a batch of digraphs in parallel
#[cfg(feature = "parallel")]
pub fn count_batch_parallel<E>(digraphs: &[Digraph], engine: &E) -> Result<Tally, Error>
where
    E: AutomorphismEngine + Sync,
{
    use rayon::prelude::*;

    let options = ExtensionOptions::default();
    let tally = digraphs
        .par_iter()
        .map(|g| -> Result<Tally, Error> {
            let total = count_sink_extensions(g, engine, &options, |_| {})?;
            Ok(Tally { digraphs: 1, total })
        })
        .try_reduce(Tally::default, |a, b| Ok(a + b))?;
    info!(
        "{} digraphs, {} sink extensions",
        tally.digraphs(),
        tally.total()
    );
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    use ahash::AHashSet;
    use log::debug;
    use testing::DigraphIter;

    use crate::autom::NautyEngine;
    use crate::canon::CanonDigraph;
    use crate::set::VertexSet;

    fn log_init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn extensions(g: &Digraph) -> (u64, Vec<Digraph>) {
        let mut emitted = Vec::new();
        let options = ExtensionOptions { construct: true };
        let count =
            count_sink_extensions(g, &NautyEngine, &options, |h| emitted.push(h)).unwrap();
        (count, emitted)
    }

    /// Isomorphism classes of sink extensions, found by trying every
    /// subset of vertices
    fn brute_force(g: &Digraph) -> AHashSet<CanonDigraph> {
        let n = g.order();
        let scc = SccDecomposition::new(g);
        (0..1u64 << n)
            .map(|bits| (0..n).filter(|&v| bits & (1 << v) != 0).collect::<VertexSet>())
            .filter(|&marked| scc.leaves_hit_by(marked))
            .map(|marked| CanonDigraph::try_from(g.with_sink(marked)).unwrap())
            .collect()
    }

    #[test]
    fn empty_digraph() {
        log_init();
        let (count, emitted) = extensions(&Digraph::new(0));
        assert_eq!(count, 1);
        assert_eq!(emitted, [Digraph::new(1)]);
        assert!(emitted[0].is_global_sink(0));
    }

    #[test]
    fn isolated_vertex() {
        log_init();
        let (count, emitted) = extensions(&Digraph::new(1));
        assert_eq!(count, 1);
        assert_eq!(emitted, [Digraph::from_edges(2, [(0, 1)])]);
    }

    #[test]
    fn single_edge() {
        log_init();
        let g = Digraph::from_edges(2, [(0, 1)]);
        let (count, emitted) = extensions(&g);
        assert_eq!(count, 2);
        for h in &emitted {
            assert!(h.has_edge(1, 2));
            assert!(h.has_edge(0, 1));
        }
    }

    #[test]
    fn two_cycle() {
        log_init();
        let g = Digraph::from_edges(2, [(0, 1), (1, 0)]);
        let (count, emitted) = extensions(&g);
        assert_eq!(count, 2);
        let edge_counts: Vec<_> = emitted.iter().map(|h| h.edge_count()).collect();
        assert_eq!(edge_counts, [3, 4]);
    }

    #[test]
    fn counting_only() {
        log_init();
        let g = Digraph::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
        let mut called = false;
        let count =
            count_sink_extensions(&g, &NautyEngine, &ExtensionOptions::default(), |_| {
                called = true
            })
            .unwrap();
        // one, two or three marked vertices on the cycle
        assert_eq!(count, 3);
        assert!(!called);
    }

    #[test]
    fn too_many_vertices() {
        log_init();
        let g = Digraph::new(crate::set::MAX_VERTICES + 1);
        let res = count_sink_extensions(&g, &NautyEngine, &Default::default(), |_| {});
        assert!(matches!(res, Err(Error::TooManyVertices { .. })));
    }

    #[test]
    fn random_against_brute_force() {
        log_init();

        for pg in DigraphIter::default().with_loops(true).max_order(5).take(300) {
            let g = Digraph::from(&pg);
            debug!("{g:?}");
            let (count, emitted) = extensions(&g);
            let expected = brute_force(&g);
            assert_eq!(count, expected.len() as u64);
            assert_eq!(emitted.len() as u64, count);

            let found: AHashSet<_> = emitted
                .iter()
                .map(|h| CanonDigraph::try_from(h).unwrap())
                .collect();
            assert_eq!(found, expected);
        }
    }

    #[test]
    fn extensions_have_global_sink() {
        log_init();

        for pg in DigraphIter::default().with_loops(true).take(200) {
            let g = Digraph::from(&pg);
            let sink = g.order();
            let (_, emitted) = extensions(&g);
            for h in emitted {
                assert_eq!(h.order(), sink + 1);
                assert!(h.is_global_sink(sink));
                for v in 0..sink {
                    assert!(!h.is_global_sink(v));
                }
                let scc = SccDecomposition::new(&h);
                let leaves: Vec<_> = scc.leaves().collect();
                assert_eq!(leaves.len(), 1);
                assert_eq!(leaves[0].vertices(), VertexSet::singleton(sink));
            }
        }
    }

    #[test]
    fn idempotent() {
        log_init();

        for pg in DigraphIter::default().take(50) {
            let g = Digraph::from(&pg);
            assert_eq!(extensions(&g), extensions(&g));
        }
    }

    #[test]
    fn batch() {
        log_init();

        let digraphs: Vec<_> = DigraphIter::default()
            .max_order(6)
            .take(100)
            .map(|pg| Digraph::from(&pg))
            .collect();
        let expected: u64 = digraphs.iter().map(|g| extensions(g).0).sum();
        let mut emitted = 0;
        let tally = count_batch(
            digraphs.iter().cloned().map(Ok),
            &NautyEngine,
            &ExtensionOptions { construct: true },
            |_| emitted += 1,
        )
        .unwrap();
        assert_eq!(tally.digraphs(), 100);
        assert_eq!(tally.total(), expected);
        assert_eq!(emitted, expected);

        let tallies = [Tally { digraphs: 1, total: 4 }, Tally { digraphs: 2, total: 3 }];
        assert_eq!(tallies.into_iter().sum::<Tally>(), Tally { digraphs: 3, total: 7 });
    }

    #[test]
    fn batch_stops_at_error() {
        log_init();

        let input = vec![
            Ok(Digraph::new(1)),
            Err(Error::Digraph6 { line: 2, reason: "missing '&'" }),
            Ok(Digraph::new(2)),
        ];
        let res = count_batch(input, &NautyEngine, &Default::default(), |_| {});
        assert!(matches!(res, Err(Error::Digraph6 { line: 2, .. })));
    }

    #[test]
    fn concurrent_threads() {
        log_init();

        let digraphs: Vec<_> = DigraphIter::default()
            .with_loops(true)
            .take(400)
            .map(|pg| Digraph::from(&pg))
            .collect();
        let serial: Vec<_> = digraphs.iter().map(|g| extensions(g).0).collect();
        let chunks: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = digraphs
                .chunks(50)
                .map(|chunk| {
                    s.spawn(move || Vec::from_iter(chunk.iter().map(|g| extensions(g).0)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(chunks.concat(), serial);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_batch() {
        log_init();

        let digraphs: Vec<_> = DigraphIter::default()
            .with_loops(true)
            .take(200)
            .map(|pg| Digraph::from(&pg))
            .collect();
        let serial = count_batch(
            digraphs.iter().cloned().map(Ok),
            &NautyEngine,
            &Default::default(),
            |_| {},
        )
        .unwrap();
        let parallel = count_batch_parallel(&digraphs, &NautyEngine).unwrap();
        assert_eq!(serial, parallel);
    }
}
