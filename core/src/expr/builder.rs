use bumpalo::Bump;

use super::error::BuildError;
use super::tree::{Expr, ExprKind};
use crate::ToString;

/// Combinator factory for expression trees.
///
/// Holds the arena every node is allocated in. Combinators are pure:
/// they only build data, and each call yields a fresh node. Index
/// arguments are `u32` because that is the encoding's index width, so
/// an out-of-range index is unrepresentable; everything else is checked
/// here, before an invalid tree can exist.
#[derive(Clone, Copy)]
pub struct ExprBuilder<'arena> {
    arena: &'arena Bump,
}

impl<'arena> ExprBuilder<'arena> {
    pub fn new(arena: &'arena Bump) -> Self {
        Self { arena }
    }

    fn alloc(&self, kind: ExprKind<'arena>) -> &'arena Expr<'arena> {
        self.arena.alloc(Expr::new(kind))
    }

    /// Drop the operand-stack top.
    pub fn drop(&self) -> &'arena Expr<'arena> {
        self.alloc(ExprKind::Drop)
    }

    /// Duplicate the value at the given depth onto the top (0 = top).
    pub fn dup(&self, index: u32) -> &'arena Expr<'arena> {
        self.alloc(ExprKind::Dup(index))
    }

    /// Push the binding-table constant at the given index.
    pub fn binding(&self, index: u32) -> &'arena Expr<'arena> {
        self.alloc(ExprKind::Binding(index))
    }

    /// Move the operand-stack top onto the scope stack.
    pub fn scope_push(&self) -> &'arena Expr<'arena> {
        self.alloc(ExprKind::ScopePush)
    }

    /// Push a copy of the scope-stack entry at the given index.
    pub fn scope_get(&self, index: u32) -> &'arena Expr<'arena> {
        self.alloc(ExprKind::ScopeGet(index))
    }

    /// Push an immediate constant.
    pub fn literal(&self, value: i64) -> &'arena Expr<'arena> {
        self.alloc(ExprKind::Literal(value))
    }

    /// Integer addition instruction (operands must already be on the
    /// stack; see [`Self::apply_add`] for the composite form).
    pub fn add(&self) -> &'arena Expr<'arena> {
        self.alloc(ExprKind::Add)
    }

    /// Bitwise AND instruction; composite form in [`Self::apply_and`].
    pub fn bitwise_and(&self) -> &'arena Expr<'arena> {
        self.alloc(ExprKind::BitwiseAnd)
    }

    /// Structural marker opening a conditional region.
    pub fn check_if(&self) -> &'arena Expr<'arena> {
        self.alloc(ExprKind::CheckIf)
    }

    /// Structural marker starting the taken branch.
    pub fn then(&self) -> &'arena Expr<'arena> {
        self.alloc(ExprKind::Then)
    }

    /// Structural marker starting the alternative branch.
    pub fn else_then(&self) -> &'arena Expr<'arena> {
        self.alloc(ExprKind::ElseThen)
    }

    /// Structural marker closing a conditional region.
    pub fn end(&self) -> &'arena Expr<'arena> {
        self.alloc(ExprKind::End)
    }

    /// Reference to a named external function with fixed arity.
    ///
    /// The name must be non-empty ASCII with no embedded NUL byte, since
    /// it is NUL-terminated on the wire. Rejected here, never at emission
    /// time. The name is copied into the arena.
    pub fn intrinsic(
        &self,
        name: &str,
        num_args: u8,
        num_retvals: u8,
    ) -> Result<&'arena Expr<'arena>, BuildError> {
        if name.is_empty() {
            return Err(BuildError::EmptyIntrinsicName);
        }
        if !name.is_ascii() {
            return Err(BuildError::IntrinsicNameNotAscii {
                name: name.to_string(),
            });
        }
        if name.bytes().any(|b| b == 0) {
            return Err(BuildError::IntrinsicNameHasNul {
                name: name.to_string(),
            });
        }
        let name = self.arena.alloc_str(name);
        Ok(self.alloc(ExprKind::Intrinsic {
            name,
            num_args,
            num_retvals,
        }))
    }

    /// Wrap a callee and an ordered, possibly-empty argument sequence.
    ///
    /// Lowering emits the arguments left-to-right and the callee last.
    /// When the callee is an intrinsic, the argument count must match
    /// its declared arity. This is a construction-time contract, not an
    /// emission-time check.
    pub fn apply(
        &self,
        callee: &'arena Expr<'arena>,
        args: &[&'arena Expr<'arena>],
    ) -> Result<&'arena Expr<'arena>, BuildError> {
        if let ExprKind::Intrinsic { name, num_args, .. } = callee.kind() {
            if usize::from(*num_args) != args.len() {
                return Err(BuildError::ArityMismatch {
                    name: (*name).to_string(),
                    declared: *num_args,
                    supplied: args.len(),
                });
            }
        }
        let args = self.arena.alloc_slice_copy(args);
        Ok(self.alloc(ExprKind::Apply { callee, args }))
    }

    /// Composite addition: `lhs + rhs`.
    pub fn apply_add(
        &self,
        lhs: &'arena Expr<'arena>,
        rhs: &'arena Expr<'arena>,
    ) -> &'arena Expr<'arena> {
        self.alloc(ExprKind::Apply {
            callee: self.add(),
            args: self.arena.alloc_slice_copy(&[lhs, rhs]),
        })
    }

    /// Composite bitwise AND: `lhs & rhs`.
    pub fn apply_and(
        &self,
        lhs: &'arena Expr<'arena>,
        rhs: &'arena Expr<'arena>,
    ) -> &'arena Expr<'arena> {
        self.alloc(ExprKind::Apply {
            callee: self.bitwise_and(),
            args: self.arena.alloc_slice_copy(&[lhs, rhs]),
        })
    }
}
