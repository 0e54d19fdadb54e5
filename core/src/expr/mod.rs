//! Expression trees and the combinator layer that builds them.
//!
//! Trees are immutable once constructed and live in a [`bumpalo::Bump`]
//! arena owned by the host. The only supported construction path is
//! [`ExprBuilder`]: its combinators validate their arguments up front, so
//! an invalid tree can never reach the emission engine.
//!
//! ## Design
//!
//! - Nodes reference already-built subtrees, so trees are finite and
//!   acyclic by construction
//! - Composition always allocates a new node; existing nodes are never
//!   mutated, and subtrees may be shared between parents
//! - The single composite form is [`ExprKind::Apply`]: arguments first,
//!   callee last, which is exactly the emitted instruction order

mod builder;
mod error;
mod tree;


pub use builder::ExprBuilder;
pub use error::BuildError;
pub use tree::{Expr, ExprKind};
