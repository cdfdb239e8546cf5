//! Expression compilation errors.

use core::fmt;

use thiserror::Error;

use crate::bytecode::Label;
use crate::references::DispatchKind;
use crate::String;

/// Errors that can occur while compiling an expression.
///
/// Apart from the label and stack variants (which indicate a defect in the
/// compiler itself), these are caller-contract violations: the expression
/// tree was built incorrectly upstream. None are recoverable, and output
/// emitted before the error must be discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// No instruction exists for `operation` on values of type `ty`.
    #[error("cannot apply {operation} to values of type {ty}")]
    UnsupportedOperation { operation: Operation, ty: String },

    /// Only widening numeric conversions are supported.
    #[error("no widening conversion from {from} to {to}")]
    UnsupportedConversion { from: String, to: String },

    #[error("cannot cast to primitive type {ty}")]
    CastToPrimitive { ty: String },

    /// A `void` type (or `void` call) was used where a value is needed.
    #[error("type {ty} has no values")]
    VoidValue { ty: String },

    /// The expression's receiver shape does not match the method's dispatch.
    #[error("{dispatch} method {method} cannot be called this way")]
    ReceiverMismatch {
        method: String,
        dispatch: DispatchKind,
    },

    #[error("{method} takes {expected} argument(s) but {found} were supplied")]
    ArgumentCountMismatch {
        method: String,
        expected: usize,
        found: usize,
    },

    #[error("{} field {field} cannot be read this way", access_kind(.is_static))]
    FieldAccessMismatch { field: String, is_static: bool },

    /// Array length or index does not fit the 32-bit count operand.
    #[error("array of {len} elements is too large")]
    ArrayTooLarge { len: usize },

    #[error("too many labels in one compilation unit")]
    TooManyLabels,

    #[error("label {0} placed twice")]
    LabelAlreadyPlaced(Label),

    #[error("label {0} was never placed")]
    UnplacedLabel(Label),

    /// Control paths reached a point with different stack depths, or a visit
    /// left the wrong number of values behind.
    #[error("stack imbalance: expected depth {expected}, found {actual}")]
    StackImbalance { expected: usize, actual: usize },
}

fn access_kind(is_static: &bool) -> &'static str {
    if *is_static { "static" } else { "instance" }
}

/// Operation families the selector chooses instructions for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    LoadLocal,
    Add,
    Subtract,
    Multiply,
    Equality,
    Ordering,
    ArrayCreate,
    ArrayStore,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::LoadLocal => "local load",
            Operation::Add => "addition",
            Operation::Subtract => "subtraction",
            Operation::Multiply => "multiplication",
            Operation::Equality => "equality comparison",
            Operation::Ordering => "ordering comparison",
            Operation::ArrayCreate => "array creation",
            Operation::ArrayStore => "array store",
        })
    }
}
