//! Lowering of expression trees into linear instruction streams.
//!
//! The emitter walks a tree in deterministic post-order and writes each
//! node's instruction to a cell sink per the encoding contract in
//! [`crate::isa`].
//!
//! ## Design
//!
//! - Implements the [`crate::visitor::TreeTransformer`] pattern for
//!   traversal
//! - Tracks operand-stack depth per the instructions' stack effects,
//!   so the host can size the runtime stack
//! - Generic over the sink; a sink failure aborts the walk immediately
//!   with no rollback of cells already written

mod error;
mod lowering;


pub use error::EmitError;
pub use lowering::{EmitStats, Emitter, emit_to};
