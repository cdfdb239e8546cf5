//! Expression compiler.
//!
//! Transforms typed expression trees into stack-machine instructions. The
//! compiler uses the visitor pattern to traverse the tree and emits into an
//! [`InstructionSink`](crate::bytecode::InstructionSink).
//!
//! ## Design
//!
//! - Uses TreeTransformer pattern for tree traversal
//! - Selects instructions from the operand type's category ([`select`])
//! - Tracks stack depth precisely; every value expression nets one value
//! - Labels record the stack depth of every path reaching them
//! - Short-circuit `or`, negation, ternaries and comparisons share one
//!   branch-then-merge shape producing a canonical 0/1

mod branch;
mod constants;
mod error;
mod expression;
mod options;
pub mod select;


#[cfg(test)]
mod select_test;

pub use error::{CompileError, Operation};
pub use expression::{Compiled, ExpressionCompiler};
pub use options::CompilerOptions;
