/// An expression-tree node.
///
/// Immutable once built; children are references into the same arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr<'arena> {
    kind: ExprKind<'arena>,
}

impl<'arena> Expr<'arena> {
    pub(crate) fn new(kind: ExprKind<'arena>) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &ExprKind<'arena> {
        &self.kind
    }

    /// Number of instruction-bearing nodes in this tree.
    ///
    /// [`ExprKind::Apply`] is purely structural (it sequences its
    /// children and emits no instruction of its own), so it contributes
    /// only its arguments and callee. Emitting a tree produces exactly
    /// this many instructions.
    pub fn node_count(&self) -> usize {
        match self.kind {
            ExprKind::Apply { callee, args } => {
                args.iter().map(|arg| arg.node_count()).sum::<usize>() + callee.node_count()
            }
            _ => 1,
        }
    }
}

/// The variants an expression node can take.
///
/// Leaf variants correspond one-to-one with instructions; see
/// [`crate::isa::Instruction`] for their stack effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind<'arena> {
    /// Drop the operand-stack top.
    Drop,
    /// Duplicate the value at the given depth (0 = top).
    Dup(u32),
    /// Push the binding-table constant at the given index.
    Binding(u32),
    /// Move the operand-stack top onto the scope stack.
    ScopePush,
    /// Push a copy of the scope-stack entry at the given index.
    ScopeGet(u32),
    /// Push an immediate constant.
    Literal(i64),
    /// Integer addition over the top two operands.
    Add,
    /// Bitwise AND over the top two operands.
    BitwiseAnd,
    /// Call of a named external function with fixed arity.
    Intrinsic {
        name: &'arena str,
        num_args: u8,
        num_retvals: u8,
    },
    /// Ordered argument subtrees followed by a callee.
    ///
    /// Lowering emits the arguments left-to-right, then the callee:
    /// the call convention pushes arguments before the instruction that
    /// consumes them. An empty argument list degenerates to the callee
    /// alone.
    Apply {
        callee: &'arena Expr<'arena>,
        args: &'arena [&'arena Expr<'arena>],
    },
    /// Structural marker opening a conditional region.
    CheckIf,
    /// Structural marker: start of the taken branch.
    Then,
    /// Structural marker: start of the alternative branch.
    ElseThen,
    /// Structural marker closing a conditional region.
    End,
}
