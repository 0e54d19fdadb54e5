//! The lowering engine implementation.

use tracing::{debug, trace};

use super::error::EmitError;
use crate::expr::{Expr, ExprKind};
use crate::isa::Instruction;
use crate::sink::CellSink;
use crate::visitor::TreeTransformer;

/// Summary of one emitter's output so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    /// Instructions written to the sink.
    pub instructions: usize,
    /// Net operand-stack change of the emitted stream, relative to the
    /// stack depth when the stream starts executing.
    pub stack_delta: isize,
    /// Peak operand-stack growth above the entry depth. A runtime can
    /// use this to reserve stack space up front.
    pub max_stack_growth: usize,
}

/// Lowers expression trees into a linear instruction stream.
///
/// Walks each tree in post-order: for every composite, all operand
/// subtrees are fully emitted left-to-right before the composite's own
/// instruction. That order is a hard contract and is never reordered:
/// it is what makes the stream correct against the operand stack.
///
/// One emitter owns one sink. `emit` may be called repeatedly to append
/// successive trees to the same stream; the bookkeeping spans all of
/// them. A sink failure aborts the current walk immediately, and the
/// stream written so far must be discarded by the caller.
pub struct Emitter<S: CellSink> {
    sink: S,
    instructions: usize,
    stack_delta: isize,
    max_stack_growth: usize,
}

impl<S: CellSink> Emitter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            instructions: 0,
            stack_delta: 0,
            max_stack_growth: 0,
        }
    }

    /// Lower one tree, appending its instructions to the sink.
    pub fn emit<'arena>(
        &mut self,
        expr: &'arena Expr<'arena>,
    ) -> Result<(), EmitError<S::Error>> {
        self.transform(expr)?;
        debug!(
            instructions = self.instructions,
            stack_delta = self.stack_delta,
            "tree lowered"
        );
        Ok(())
    }

    /// Lower several trees in order, as one stream.
    pub fn emit_all<'arena>(
        &mut self,
        exprs: &[&'arena Expr<'arena>],
    ) -> Result<(), EmitError<S::Error>> {
        for &expr in exprs {
            self.emit(expr)?;
        }
        Ok(())
    }

    /// Bookkeeping snapshot for the stream emitted so far.
    pub fn stats(&self) -> EmitStats {
        EmitStats {
            instructions: self.instructions,
            stack_delta: self.stack_delta,
            max_stack_growth: self.max_stack_growth,
        }
    }

    /// Finish emission, handing back the sink and the final stats.
    pub fn finish(self) -> (S, EmitStats) {
        let stats = self.stats();
        (self.sink, stats)
    }

    /// Write one instruction and account for its stack effect.
    fn put(&mut self, instruction: Instruction<'_>) -> Result<(), EmitError<S::Error>> {
        trace!(instruction = ?instruction, "emit");
        instruction.encode(&mut self.sink).map_err(EmitError::Sink)?;
        self.instructions += 1;

        let effect = instruction.stack_effect();
        self.stack_delta += effect.net() as isize;
        if let Ok(depth) = usize::try_from(self.stack_delta) {
            if depth > self.max_stack_growth {
                self.max_stack_growth = depth;
            }
        }
        Ok(())
    }
}

impl<'arena, S: CellSink> TreeTransformer<'arena> for Emitter<S> {
    type Output = Result<(), EmitError<S::Error>>;

    fn transform(&mut self, expr: &'arena Expr<'arena>) -> Self::Output {
        match *expr.kind() {
            ExprKind::Drop => self.put(Instruction::Drop),
            ExprKind::Dup(index) => self.put(Instruction::Dup(index)),
            ExprKind::Binding(index) => self.put(Instruction::Binding(index)),
            ExprKind::ScopePush => self.put(Instruction::ScopePush),
            ExprKind::ScopeGet(index) => self.put(Instruction::ScopeGet(index)),
            ExprKind::Literal(value) => self.put(Instruction::Literal(value)),
            ExprKind::Add => self.put(Instruction::Add),
            ExprKind::BitwiseAnd => self.put(Instruction::BitwiseAnd),
            ExprKind::Intrinsic {
                name,
                num_args,
                num_retvals,
            } => self.put(Instruction::Intrin {
                name,
                num_args,
                num_retvals,
            }),
            ExprKind::Apply { callee, args } => {
                // Arguments left-to-right, callee last: the call
                // convention pushes operands before the instruction
                // that consumes them.
                for &arg in args {
                    self.transform(arg)?;
                }
                self.transform(callee)
            }
            ExprKind::CheckIf => self.put(Instruction::CheckIf),
            ExprKind::Then => self.put(Instruction::Then),
            ExprKind::ElseThen => self.put(Instruction::ElseThen),
            ExprKind::End => self.put(Instruction::End),
        }
    }
}

/// Convenience: lower one tree into a fresh or provided sink in one call.
pub fn emit_to<'arena, S: CellSink>(
    expr: &'arena Expr<'arena>,
    sink: S,
) -> Result<S, EmitError<S::Error>> {
    let mut emitter = Emitter::new(sink);
    emitter.emit(expr)?;
    let (sink, _stats) = emitter.finish();
    Ok(sink)
}
