use bumpalo::Bump;

use super::{Constant, Expr};
use crate::bytecode::ArithmeticOp;
use crate::references::{FieldReference, LocalVariable, MethodReference};
use crate::types::{self, TypeReference};

/// Arena-backed constructor for expression trees.
///
/// Every node is allocated in the arena and borrowed for `'a`, so whole trees
/// are freed at once when the arena goes away.
#[derive(Clone, Copy)]
pub struct ExprBuilder<'a> {
    arena: &'a Bump,
}

impl<'a> ExprBuilder<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self { arena }
    }

    pub fn arena(&self) -> &'a Bump {
        self.arena
    }

    fn alloc(&self, expr: Expr<'a>) -> &'a Expr<'a> {
        self.arena.alloc(expr)
    }

    fn alloc_list(&self, exprs: &[&'a Expr<'a>]) -> &'a [&'a Expr<'a>] {
        self.arena.alloc_slice_copy(exprs)
    }

    // === Constants ===

    pub fn constant(&self, value: Constant<'a>) -> &'a Expr<'a> {
        self.alloc(Expr::Constant(value))
    }

    pub fn null(&self) -> &'a Expr<'a> {
        self.constant(Constant::Null)
    }

    pub fn bool(&self, value: bool) -> &'a Expr<'a> {
        self.constant(Constant::Bool(value))
    }

    pub fn int(&self, value: i32) -> &'a Expr<'a> {
        self.constant(Constant::Int(value))
    }

    pub fn long(&self, value: i64) -> &'a Expr<'a> {
        self.constant(Constant::Long(value))
    }

    pub fn float(&self, value: f32) -> &'a Expr<'a> {
        self.constant(Constant::Float(value))
    }

    pub fn double(&self, value: f64) -> &'a Expr<'a> {
        self.constant(Constant::Double(value))
    }

    /// A string literal, copied into the arena.
    pub fn string(&self, value: &str) -> &'a Expr<'a> {
        let value = self.arena.alloc_str(value);
        self.constant(Constant::Str(value))
    }

    pub fn class_literal(&self, ty: &'a TypeReference) -> &'a Expr<'a> {
        self.constant(Constant::Type(ty))
    }

    // === Loads ===

    pub fn load(&self, variable: &'a LocalVariable) -> &'a Expr<'a> {
        self.alloc(Expr::Load(variable))
    }

    pub fn load_this(&self) -> &'a Expr<'a> {
        self.alloc(Expr::LoadThis)
    }

    pub fn get_field(&self, target: &'a Expr<'a>, field: &'a FieldReference) -> &'a Expr<'a> {
        self.alloc(Expr::GetField { target, field })
    }

    pub fn get_static(&self, field: &'a FieldReference) -> &'a Expr<'a> {
        self.alloc(Expr::GetStatic(field))
    }

    // === Calls ===

    pub fn new_instance(
        &self,
        constructor: &'a MethodReference,
        args: &[&'a Expr<'a>],
    ) -> &'a Expr<'a> {
        let args = self.alloc_list(args);
        self.alloc(Expr::NewInstance { constructor, args })
    }

    pub fn invoke(
        &self,
        target: &'a Expr<'a>,
        method: &'a MethodReference,
        args: &[&'a Expr<'a>],
    ) -> &'a Expr<'a> {
        let args = self.alloc_list(args);
        self.alloc(Expr::Invoke {
            target,
            method,
            args,
        })
    }

    pub fn invoke_static(
        &self,
        method: &'a MethodReference,
        args: &[&'a Expr<'a>],
    ) -> &'a Expr<'a> {
        let args = self.alloc_list(args);
        self.alloc(Expr::InvokeStatic { method, args })
    }

    // === Boolean logic & comparisons ===

    pub fn not(&self, expr: &'a Expr<'a>) -> &'a Expr<'a> {
        self.alloc(Expr::Not(expr))
    }

    pub fn or(&self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>) -> &'a Expr<'a> {
        self.alloc(Expr::Or(lhs, rhs))
    }

    pub fn ternary(
        &self,
        test: &'a Expr<'a>,
        on_true: &'a Expr<'a>,
        on_false: &'a Expr<'a>,
    ) -> &'a Expr<'a> {
        self.alloc(Expr::Ternary {
            test,
            on_true,
            on_false,
        })
    }

    pub fn eq(&self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>, ty: &'a TypeReference) -> &'a Expr<'a> {
        self.alloc(Expr::Eq { lhs, rhs, ty })
    }

    pub fn gt(&self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>, ty: &'a TypeReference) -> &'a Expr<'a> {
        self.alloc(Expr::Gt { lhs, rhs, ty })
    }

    // === Arithmetic ===

    pub fn arithmetic(
        &self,
        op: ArithmeticOp,
        lhs: &'a Expr<'a>,
        rhs: &'a Expr<'a>,
        ty: &'a TypeReference,
    ) -> &'a Expr<'a> {
        self.alloc(Expr::Arithmetic { op, lhs, rhs, ty })
    }

    pub fn add(&self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>, ty: &'a TypeReference) -> &'a Expr<'a> {
        self.arithmetic(ArithmeticOp::Add, lhs, rhs, ty)
    }

    pub fn subtract(
        &self,
        lhs: &'a Expr<'a>,
        rhs: &'a Expr<'a>,
        ty: &'a TypeReference,
    ) -> &'a Expr<'a> {
        self.arithmetic(ArithmeticOp::Subtract, lhs, rhs, ty)
    }

    pub fn multiply(
        &self,
        lhs: &'a Expr<'a>,
        rhs: &'a Expr<'a>,
        ty: &'a TypeReference,
    ) -> &'a Expr<'a> {
        self.arithmetic(ArithmeticOp::Multiply, lhs, rhs, ty)
    }

    pub fn add_ints(&self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>) -> &'a Expr<'a> {
        self.add(lhs, rhs, &types::INT)
    }

    pub fn add_longs(&self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>) -> &'a Expr<'a> {
        self.add(lhs, rhs, &types::LONG)
    }

    pub fn add_doubles(&self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>) -> &'a Expr<'a> {
        self.add(lhs, rhs, &types::DOUBLE)
    }

    pub fn subtract_ints(&self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>) -> &'a Expr<'a> {
        self.subtract(lhs, rhs, &types::INT)
    }

    pub fn subtract_longs(&self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>) -> &'a Expr<'a> {
        self.subtract(lhs, rhs, &types::LONG)
    }

    pub fn subtract_doubles(&self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>) -> &'a Expr<'a> {
        self.subtract(lhs, rhs, &types::DOUBLE)
    }

    pub fn multiply_longs(&self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>) -> &'a Expr<'a> {
        self.multiply(lhs, rhs, &types::LONG)
    }

    pub fn multiply_doubles(&self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>) -> &'a Expr<'a> {
        self.multiply(lhs, rhs, &types::DOUBLE)
    }

    // === Conversions ===

    pub fn widen(
        &self,
        expr: &'a Expr<'a>,
        from: &'a TypeReference,
        to: &'a TypeReference,
    ) -> &'a Expr<'a> {
        self.alloc(Expr::Widen { expr, from, to })
    }

    pub fn long_to_double(&self, expr: &'a Expr<'a>) -> &'a Expr<'a> {
        self.widen(expr, &types::LONG, &types::DOUBLE)
    }

    pub fn cast(&self, ty: &'a TypeReference, expr: &'a Expr<'a>) -> &'a Expr<'a> {
        self.alloc(Expr::Cast { ty, expr })
    }

    // === Arrays & statements ===

    pub fn new_array(
        &self,
        element: &'a TypeReference,
        elements: &[&'a Expr<'a>],
    ) -> &'a Expr<'a> {
        let elements = self.alloc_list(elements);
        self.alloc(Expr::NewArray { element, elements })
    }

    pub fn pop(&self, expr: &'a Expr<'a>) -> &'a Expr<'a> {
        self.alloc(Expr::Pop(expr))
    }
}
