//! Shared helpers for unit tests: logging setup, a reference decoder for
//! emitted cell streams, and a two-stack simulator that checks streams
//! against the instruction set's stack-effect contract.
//!
//! Decoding and simulation are deliberately test-only: the library
//! produces streams, it never consumes them.

use crate::isa::{Cell, Op};
use crate::{String, Vec};

/// Initialize tracing subscriber for tests with DEBUG level
/// Call this at the start of tests where you want to see logging output
///
/// # Example
/// ```ignore
/// #[test]
/// fn test_lowering() {
///     test_utils::init_test_logging();
///     // ... your test code
/// }
/// ```
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    // Try to initialize, ignore error if already initialized
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// An instruction recovered from a cell stream, with the intrinsic name
/// owned so decoded streams can outlive the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Drop,
    Dup(u32),
    Binding(u32),
    ScopePush,
    ScopeGet(u32),
    Literal(i64),
    Add,
    BitwiseAnd,
    Intrin {
        name: String,
        num_args: u8,
        num_retvals: u8,
    },
    CheckIf,
    Then,
    ElseThen,
    End,
}

/// Decode one instruction starting at `cells[0]`.
///
/// Returns the instruction and the number of cells consumed. Panics on
/// malformed input; tests feed it streams this crate just emitted.
pub fn decode_one(cells: &[Cell]) -> (Decoded, usize) {
    let tag = Op::from_cell(cells[0]).expect("stream does not start with a valid opcode tag");
    match tag {
        Op::Null => unreachable!("Op::from_cell never yields Null"),
        Op::Drop => (Decoded::Drop, 1),
        Op::Dup => (Decoded::Dup(cells[1] as u32), 2),
        Op::Binding => (Decoded::Binding(cells[1] as u32), 2),
        Op::ScopePush => (Decoded::ScopePush, 1),
        Op::ScopeGet => (Decoded::ScopeGet(cells[1] as u32), 2),
        Op::Literal => (Decoded::Literal(cells[1] as i64), 2),
        Op::Add => (Decoded::Add, 1),
        Op::BitwiseAnd => (Decoded::BitwiseAnd, 1),
        Op::Intrin => {
            let num_args = cells[1] as u8;
            let num_retvals = cells[2] as u8;
            // The name is variable-length: scan for the terminator.
            let mut name = String::new();
            let mut at = 3;
            while cells[at] != 0 {
                name.push(cells[at] as u8 as char);
                at += 1;
            }
            (
                Decoded::Intrin {
                    name,
                    num_args,
                    num_retvals,
                },
                at + 1,
            )
        }
        Op::CheckIf => (Decoded::CheckIf, 1),
        Op::Then => (Decoded::Then, 1),
        Op::ElseThen => (Decoded::ElseThen, 1),
        Op::End => (Decoded::End, 1),
    }
}

/// Decode a whole stream into instructions.
pub fn decode_stream(mut cells: &[Cell]) -> Vec<Decoded> {
    let mut out = Vec::new();
    while !cells.is_empty() {
        let (decoded, consumed) = decode_one(cells);
        out.push(decoded);
        cells = &cells[consumed..];
    }
    out
}

/// Run a stream against the stack-effect contract, starting from empty
/// operand and scope stacks.
///
/// `bindings` stands in for the host's binding-constant table and
/// `intrin` for its intrinsic registry. Conditional markers are
/// stack-neutral and skipped. Panics on operand-stack underflow, which
/// is exactly what the property tests are looking for.
pub fn simulate<F>(cells: &[Cell], bindings: &[i64], mut intrin: F) -> Vec<i64>
where
    F: FnMut(&str, &[i64]) -> Vec<i64>,
{
    let mut opstack: Vec<i64> = Vec::new();
    let mut sstack: Vec<i64> = Vec::new();

    for instruction in decode_stream(cells) {
        match instruction {
            Decoded::Drop => {
                opstack.pop().expect("DROP underflowed the operand stack");
            }
            Decoded::Dup(depth) => {
                let at = opstack
                    .len()
                    .checked_sub(1 + depth as usize)
                    .expect("DUP depth exceeds operand stack");
                opstack.push(opstack[at]);
            }
            Decoded::Binding(index) => opstack.push(bindings[index as usize]),
            Decoded::ScopePush => {
                let value = opstack
                    .pop()
                    .expect("SCOPE_PUSH underflowed the operand stack");
                sstack.push(value);
            }
            Decoded::ScopeGet(index) => opstack.push(sstack[index as usize]),
            Decoded::Literal(value) => opstack.push(value),
            Decoded::Add => {
                let rhs = opstack.pop().expect("ADD underflowed the operand stack");
                let lhs = opstack.pop().expect("ADD underflowed the operand stack");
                opstack.push(lhs.wrapping_add(rhs));
            }
            Decoded::BitwiseAnd => {
                let rhs = opstack
                    .pop()
                    .expect("BITWISE_AND underflowed the operand stack");
                let lhs = opstack
                    .pop()
                    .expect("BITWISE_AND underflowed the operand stack");
                opstack.push(lhs & rhs);
            }
            Decoded::Intrin {
                name,
                num_args,
                num_retvals,
            } => {
                let split = opstack
                    .len()
                    .checked_sub(num_args as usize)
                    .expect("INTRIN underflowed the operand stack");
                // Arguments come off in reverse-push order; splitting
                // hands them over first-pushed first.
                let args = opstack.split_off(split);
                let results = intrin(name.as_str(), &args);
                assert_eq!(
                    results.len(),
                    num_retvals as usize,
                    "intrinsic '{}' returned the wrong number of values",
                    name
                );
                opstack.extend(results);
            }
            Decoded::CheckIf | Decoded::Then | Decoded::ElseThen | Decoded::End => {}
        }
    }

    opstack
}

/// Intrinsic registry for tests that never call one.
pub fn no_intrinsics(name: &str, _args: &[i64]) -> Vec<i64> {
    panic!("unexpected intrinsic call: '{}'", name);
}
