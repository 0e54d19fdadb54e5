//! Append-only destinations for emitted instruction streams.
//!
//! The emission engine is generic over anything that can accept one cell
//! at a time. Cells arrive in exactly emission order, and a sink is used
//! exclusively by one emission call at a time; interleaving two emissions
//! into the same sink requires serialization by the host.

use core::convert::Infallible;

use crate::Vec;
use crate::isa::Cell;

/// An append-only cell destination.
///
/// Implementations may fail (storage exhaustion, I/O errors); the failure
/// is surfaced to the emission caller immediately, and cells already
/// appended are not rolled back.
pub trait CellSink {
    type Error;

    /// Append one cell at the end of the stream.
    fn append(&mut self, cell: Cell) -> Result<(), Self::Error>;
}

impl<S: CellSink + ?Sized> CellSink for &mut S {
    type Error = S::Error;

    fn append(&mut self, cell: Cell) -> Result<(), Self::Error> {
        (**self).append(cell)
    }
}

/// Growable in-memory sink.
///
/// The common case: collect a whole stream, then hand it to whatever
/// loads it into the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellBuffer {
    cells: Vec<Cell>,
}

impl CellBuffer {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// The cells appended so far, in emission order.
    pub fn as_cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl CellSink for CellBuffer {
    type Error = Infallible;

    fn append(&mut self, cell: Cell) -> Result<(), Infallible> {
        self.cells.push(cell);
        Ok(())
    }
}

/// Sink that streams cells to a [`std::io::Write`] destination.
///
/// Each cell is written as eight little-endian bytes. Useful for writing
/// a stream straight to a file or a socket without buffering it first.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSink<W> {
    writer: W,
}

#[cfg(feature = "std")]
impl<W: std::io::Write> IoSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> CellSink for IoSink<W> {
    type Error = std::io::Error;

    fn append(&mut self, cell: Cell) -> Result<(), std::io::Error> {
        self.writer.write_all(&cell.to_le_bytes())
    }
}
