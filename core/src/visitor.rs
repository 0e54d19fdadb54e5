//! Tree-transformer trait for algorithms over expression trees.
//!
//! The transformer recurses into children itself, so it controls both
//! traversal order and what happens at each node. It can be stateful
//! (`&mut self`) to accumulate results along the way.
//!
//! The emission engine is one implementation; anything else that walks
//! trees (depth analyses, pretty-printers) plugs in the same way.

use crate::expr::Expr;

/// Generic transformer over expression trees.
///
/// Examples of `Output`:
/// - `Result<(), E>` for emission and other fallible side-effect walks
/// - `usize` for counting or measuring
pub trait TreeTransformer<'arena> {
    /// The type of value produced per transformed node.
    type Output;

    /// Transform a tree. Implementations recurse into children as
    /// needed.
    fn transform(&mut self, expr: &'arena Expr<'arena>) -> Self::Output;
}
