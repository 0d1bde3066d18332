pub use crate::autom::{AutomorphismEngine, AutomorphismGroup, Automorphisms, NautyEngine};
pub use crate::canon::{CanonDigraph, IntoCanon, TryIntoCanon};
pub use crate::colour::{for_each_colouring, ColouringOptions};
pub use crate::digraph::Digraph;
pub use crate::digraph6::{from_digraph6, read_digraphs, to_digraph6};
pub use crate::driver::{count_batch, count_sink_extensions, ExtensionOptions, Tally};
#[cfg(feature = "parallel")]
pub use crate::driver::count_batch_parallel;
pub use crate::error::Error;
pub use crate::scc::{Scc, SccDecomposition};
pub use crate::set::VertexSet;
