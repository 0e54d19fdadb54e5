//! Smelta - expression-to-bytecode lowering for a small stack machine
//!
//! # Overview
//!
//! Smelta lets a host program compose bytecode programmatically: build an
//! expression tree through typed combinators, then lower it into a linear
//! instruction stream for a two-stack virtual machine. There is no textual
//! front-end and no interpreter here: the crate produces streams, and an
//! external runtime loads and executes them.
//!
//! - Trees are immutable and arena-allocated; combinators validate their
//!   arguments before a node can exist
//! - Lowering is a deterministic post-order walk: operands left-to-right,
//!   then the instruction that consumes them
//! - The engine writes through a sink abstraction, so streams can go to
//!   an in-memory buffer, a file, or a socket without touching the engine
//!
//! # Quick Start
//!
//! ```
//! use bumpalo::Bump;
//! use smelta::{CellBuffer, ExprBuilder, emit_to};
//!
//! // Build `3 + 4` in a host-owned arena.
//! let arena = Bump::new();
//! let b = ExprBuilder::new(&arena);
//! let sum = b.apply_add(b.literal(3), b.literal(4));
//!
//! // Lower it: [LITERAL 3] [LITERAL 4] [ADD], five cells total.
//! let buffer = emit_to(sum, CellBuffer::new()).unwrap();
//! assert_eq!(buffer.len(), 5);
//! ```
//!
//! # Calling external functions
//!
//! Intrinsics are named functions the runtime resolves; smelta only
//! checks the declared arity at construction time:
//!
//! ```
//! use bumpalo::Bump;
//! use smelta::{CellBuffer, ExprBuilder, emit_to};
//!
//! let arena = Bump::new();
//! let b = ExprBuilder::new(&arena);
//! let clamp = b.intrinsic("clamp", 2, 1).unwrap();
//! let call = b.apply(clamp, &[b.literal(10), b.literal(5)]).unwrap();
//! let buffer = emit_to(call, CellBuffer::new()).unwrap();
//! assert!(!buffer.is_empty());
//! ```

// Re-export public API from smelta_core
pub use smelta_core::emitter::{self, EmitError, EmitStats, Emitter, emit_to};
pub use smelta_core::expr::{self, BuildError, Expr, ExprBuilder, ExprKind};
pub use smelta_core::isa::{self, Cell, Instruction, Op, StackEffect};
pub use smelta_core::sink::{self, CellBuffer, CellSink};
pub use smelta_core::visitor::TreeTransformer;

#[cfg(feature = "std")]
pub use smelta_core::sink::IoSink;
