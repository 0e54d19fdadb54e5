//! Emission errors.
//!
//! Well-formed trees cannot fail to lower; the only failure source at
//! emission time is the sink itself.

use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitError<E> {
    /// The sink rejected an appended cell (e.g. backing storage
    /// exhausted). Cells already written stay written; the caller must
    /// discard the partial stream.
    Sink(E),
}

impl<E: fmt::Display> fmt::Display for EmitError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::Sink(inner) => write!(f, "Sink failed while appending cell: {}", inner),
        }
    }
}
