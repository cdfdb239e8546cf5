//! Type-directed instruction selection.
//!
//! Each function maps a type (through its precomputed [`Category`]) to the
//! instruction for one operation family. Selection never emits anything, so
//! the compiler can reject an unsupported combination before touching the
//! sink.

use super::{CompileError, Operation};
use crate::bytecode::{ArithmeticOp, ArrayType, Condition, Instruction};
use crate::descriptor::DescriptorResolver;
use crate::references::LocalVariable;
use crate::types::{Category, Numeric, TypeReference};
use crate::ToString;

/// How a two-operand comparison is turned into a branch.
///
/// `reduce` (if any) folds the operands into a signed -1/0/1 int first;
/// `jump_if_false` then branches to the "false" arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub reduce: Option<Instruction>,
    pub jump_if_false: Condition,
}

pub fn category(ty: &TypeReference) -> Result<Category, CompileError> {
    ty.category().ok_or_else(|| CompileError::VoidValue { ty: ty.to_string() })
}

fn numeric(operation: Operation, ty: &TypeReference) -> Result<Numeric, CompileError> {
    category(ty)?
        .numeric()
        .ok_or_else(|| unsupported(operation, ty))
}

fn unsupported(operation: Operation, ty: &TypeReference) -> CompileError {
    CompileError::UnsupportedOperation {
        operation,
        ty: ty.to_string(),
    }
}

pub fn load_local(variable: &LocalVariable) -> Result<Instruction, CompileError> {
    Ok(Instruction::Load(category(variable.ty())?, variable.index()))
}

/// Arithmetic is defined on the four numeric categories only.
pub fn arithmetic(op: ArithmeticOp, ty: &TypeReference) -> Result<Instruction, CompileError> {
    let operation = match op {
        ArithmeticOp::Add => Operation::Add,
        ArithmeticOp::Subtract => Operation::Subtract,
        ArithmeticOp::Multiply => Operation::Multiply,
    };
    Ok(Instruction::Arithmetic(op, numeric(operation, ty)?))
}

/// Signed three-way comparison for the wide numeric categories.
fn three_way(numeric: Numeric) -> Option<Instruction> {
    match numeric {
        Numeric::Int => None,
        Numeric::Long => Some(Instruction::LCmp),
        Numeric::Float => Some(Instruction::FCmpL),
        Numeric::Double => Some(Instruction::DCmpL),
    }
}

pub fn equality(ty: &TypeReference) -> Result<Comparison, CompileError> {
    let comparison = match category(ty)? {
        Category::Int => Comparison {
            reduce: None,
            jump_if_false: Condition::ICmpNe,
        },
        Category::Reference => Comparison {
            reduce: None,
            jump_if_false: Condition::ACmpNe,
        },
        Category::Long => wide_comparison(Numeric::Long, Condition::Ne),
        Category::Float => wide_comparison(Numeric::Float, Condition::Ne),
        Category::Double => wide_comparison(Numeric::Double, Condition::Ne),
    };
    Ok(comparison)
}

/// `lhs > rhs`. References have no ordering.
pub fn ordering(ty: &TypeReference) -> Result<Comparison, CompileError> {
    let comparison = match numeric(Operation::Ordering, ty)? {
        Numeric::Int => Comparison {
            reduce: None,
            jump_if_false: Condition::ICmpLe,
        },
        wide => wide_comparison(wide, Condition::Le),
    };
    Ok(comparison)
}

fn wide_comparison(numeric: Numeric, jump_if_false: Condition) -> Comparison {
    Comparison {
        reduce: three_way(numeric),
        jump_if_false,
    }
}

pub fn array_type(element: &TypeReference) -> Result<ArrayType, CompileError> {
    match element.primitive_kind() {
        Some(primitive) => ArrayType::for_primitive(primitive).ok_or_else(|| {
            CompileError::VoidValue {
                ty: element.to_string(),
            }
        }),
        None => Ok(ArrayType::Reference),
    }
}

pub fn new_array<R: DescriptorResolver>(
    element: &TypeReference,
    resolver: &R,
) -> Result<Instruction, CompileError> {
    Ok(match array_type(element)? {
        ArrayType::Reference => Instruction::ANewArray(resolver.internal_name(element)),
        primitive => Instruction::NewArray(primitive),
    })
}

pub fn array_store(element: &TypeReference) -> Result<Instruction, CompileError> {
    Ok(Instruction::ArrayStore(array_type(element)?))
}

/// Widening conversion from `from` to `to`.
///
/// Returns `None` when both types share a category (e.g. `byte` to `int`),
/// which needs no instruction.
pub fn widening(
    from: &TypeReference,
    to: &TypeReference,
) -> Result<Option<Instruction>, CompileError> {
    let rejected = || CompileError::UnsupportedConversion {
        from: from.to_string(),
        to: to.to_string(),
    };
    let source = category(from)?.numeric().ok_or_else(rejected)?;
    let target = category(to)?.numeric().ok_or_else(rejected)?;

    use Numeric::*;
    match (source, target) {
        _ if source == target => Ok(None),
        (Int, Long) | (Int, Float) | (Int, Double) | (Long, Float) | (Long, Double)
        | (Float, Double) => Ok(Some(Instruction::Convert(source, target))),
        _ => Err(rejected()),
    }
}
