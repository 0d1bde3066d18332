use thiserror::Error;

use crate::set::MAX_VERTICES;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Too many vertices: {n} exceeds the maximum of {max}")]
    TooManyVertices { n: usize, max: usize },
    #[error("Too much memory needed")]
    MTooBig,
    #[error("Too many nodes")]
    NTooBig,
    #[error("Malformed digraph6 record on line {line}: {reason}")]
    Digraph6 { line: usize, reason: &'static str },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub(crate) fn check_order(n: usize) -> Result<(), Error> {
    if n > MAX_VERTICES {
        Err(Error::TooManyVertices { n, max: MAX_VERTICES })
    } else {
        Ok(())
    }
}
