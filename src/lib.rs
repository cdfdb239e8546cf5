//! Stackgen - compiles typed expression trees into stack-machine instructions
//!
//! # Overview
//!
//! Stackgen is the expression layer of a class-file code generator. Given a
//! typed expression tree it emits the JVM-style instruction sequence that
//! leaves the expression's value on the operand stack, selecting
//! instructions from the operand types and wiring up the labels that
//! short-circuit `||`, negation, ternaries and comparisons need.
//!
//! # Quick Start
//!
//! ```
//! use stackgen::{Bump, Code, ExprBuilder, ExpressionCompiler, Instruction};
//! use stackgen::types;
//!
//! // Expression trees live in an arena
//! let arena = Bump::new();
//! let b = ExprBuilder::new(&arena);
//! let expr = b.add_ints(b.int(3), b.int(100));
//!
//! let code: Code = ExpressionCompiler::compile_to_code(expr).unwrap();
//! assert_eq!(
//!     code.instructions,
//!     vec![
//!         Instruction::IConst(3),
//!         Instruction::BiPush(100),
//!         Instruction::Arithmetic(stackgen::ArithmeticOp::Add, types::Numeric::Int),
//!     ]
//! );
//! ```
//!
//! # Sinks
//!
//! [`Code`] records instructions, label positions and a de-duplicated
//! constant pool. Any [`InstructionSink`] can be used instead, e.g. one that
//! writes straight into a method body.

pub use bumpalo::Bump;

pub use stackgen_core::bytecode::{
    ArithmeticOp, ArrayType, Code, Condition, ConstantPool, FieldAccess, Instruction,
    InstructionSink, Label, MethodCall, PoolConstant,
};
pub use stackgen_core::compiler::{
    CompileError, Compiled, CompilerOptions, ExpressionCompiler, Operation,
};
pub use stackgen_core::descriptor::{DescriptorResolver, JvmDescriptors};
pub use stackgen_core::expr::{Constant, Expr, ExprBuilder};
pub use stackgen_core::references::{
    DispatchKind, FieldReference, LocalVariable, MethodReference,
};
pub use stackgen_core::types::{self, Category, Modifiers, Primitive, TypeReference};
pub use stackgen_core::{bytecode, compiler, descriptor, expr, references, visitor};

/// Compile a single expression into fresh [`Code`] with the given options.
pub fn compile_with_options(
    expr: &Expr<'_>,
    options: CompilerOptions,
) -> Result<Code, CompileError> {
    let mut compiler = ExpressionCompiler::with_options(Code::new(), JvmDescriptors, options);
    compiler.compile(expr)?;
    Ok(compiler.finish()?.sink)
}
