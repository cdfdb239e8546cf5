//! Typed expression trees.
//!
//! Trees are built by the caller (normally through [`ExprBuilder`]) in a bump
//! arena and only read by the compiler. Member and local references are
//! borrowed from the caller's environment.

mod builder;


pub use builder::ExprBuilder;

use crate::bytecode::ArithmeticOp;
use crate::references::{FieldReference, LocalVariable, MethodReference};
use crate::types::TypeReference;

/// A literal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constant<'a> {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(&'a str),
    /// A class literal.
    Type(&'a TypeReference),
}

/// One node of an expression tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'a> {
    Constant(Constant<'a>),

    Load(&'a LocalVariable),

    GetField {
        target: &'a Expr<'a>,
        field: &'a FieldReference,
    },

    GetStatic(&'a FieldReference),

    /// The receiver of the method being compiled (slot 0).
    LoadThis,

    /// Allocate and initialize an object: `new T(args)`.
    NewInstance {
        constructor: &'a MethodReference,
        args: &'a [&'a Expr<'a>],
    },

    /// Call on a receiver. Also used for direct constructor calls on an
    /// existing receiver, such as a super-constructor call.
    Invoke {
        target: &'a Expr<'a>,
        method: &'a MethodReference,
        args: &'a [&'a Expr<'a>],
    },

    InvokeStatic {
        method: &'a MethodReference,
        args: &'a [&'a Expr<'a>],
    },

    /// Boolean negation.
    Not(&'a Expr<'a>),

    /// Short-circuit disjunction.
    Or(&'a Expr<'a>, &'a Expr<'a>),

    Ternary {
        test: &'a Expr<'a>,
        on_true: &'a Expr<'a>,
        on_false: &'a Expr<'a>,
    },

    /// Equality of two operands of type `ty`.
    Eq {
        lhs: &'a Expr<'a>,
        rhs: &'a Expr<'a>,
        ty: &'a TypeReference,
    },

    /// `lhs > rhs` on operands of type `ty`.
    Gt {
        lhs: &'a Expr<'a>,
        rhs: &'a Expr<'a>,
        ty: &'a TypeReference,
    },

    Arithmetic {
        op: ArithmeticOp,
        lhs: &'a Expr<'a>,
        rhs: &'a Expr<'a>,
        ty: &'a TypeReference,
    },

    /// Numeric widening conversion.
    Widen {
        expr: &'a Expr<'a>,
        from: &'a TypeReference,
        to: &'a TypeReference,
    },

    /// Checked reference cast.
    Cast {
        ty: &'a TypeReference,
        expr: &'a Expr<'a>,
    },

    NewArray {
        element: &'a TypeReference,
        elements: &'a [&'a Expr<'a>],
    },

    /// Evaluate and discard.
    Pop(&'a Expr<'a>),
}

impl<'a> Expr<'a> {
    /// Whether visiting this expression leaves a value on the stack.
    ///
    /// Only `pop` and calls to `void` methods (including constructor calls on
    /// an existing receiver) leave nothing behind. A ternary follows its arms.
    pub fn produces_value(&self) -> bool {
        match self {
            Expr::Pop(_) => false,
            Expr::Ternary { on_true, .. } => on_true.produces_value(),
            Expr::Invoke { method, .. } | Expr::InvokeStatic { method, .. } => {
                !method.returns().is_void()
            }
            _ => true,
        }
    }

    /// Net number of values this expression leaves on the stack.
    pub fn stack_effect(&self) -> usize {
        usize::from(self.produces_value())
    }
}
