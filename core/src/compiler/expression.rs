//! The expression dispatcher.

use super::{select, CompileError, CompilerOptions};
use crate::bytecode::{Code, FieldAccess, Instruction, InstructionSink, MethodCall};
use crate::compiler::branch::LabelManager;
use crate::descriptor::{DescriptorResolver, JvmDescriptors};
use crate::expr::Expr;
use crate::references::{DispatchKind, FieldReference, MethodReference};
use crate::types::Category;
use crate::visitor::TreeTransformer;
use crate::{String, ToString};

/// Compiles expression trees into stack-machine instructions.
///
/// The compiler walks each tree with [`TreeTransformer`] and emits into its
/// sink. It tracks the abstract operand stack precisely: every value
/// expression nets exactly one value, `pop` and `void` calls net zero, and
/// the maximum depth observed is reported by [`max_stack`](Self::max_stack).
///
/// A compiler is single-threaded and owns its label numbering. Several
/// expressions may be compiled into the same sink in sequence.
pub struct ExpressionCompiler<S, R = JvmDescriptors> {
    pub(super) sink: S,
    pub(super) resolver: R,
    pub(super) options: CompilerOptions,
    pub(super) labels: LabelManager,

    /// Current stack depth during compilation
    pub(super) current_stack_depth: usize,

    /// Maximum stack depth observed
    max_stack_size: usize,

    /// False right after an unconditional jump, until the next label.
    pub(super) reachable: bool,
}

/// Output of [`ExpressionCompiler::finish`].
#[derive(Debug)]
pub struct Compiled<S> {
    pub sink: S,
    pub max_stack: usize,
}

impl<S: InstructionSink> ExpressionCompiler<S> {
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, JvmDescriptors, CompilerOptions::default())
    }
}

impl ExpressionCompiler<Code> {
    /// Convenience method to compile a single expression into fresh [`Code`].
    pub fn compile_to_code(expr: &Expr<'_>) -> Result<Code, CompileError> {
        let mut compiler = Self::new(Code::new());
        compiler.compile(expr)?;
        Ok(compiler.finish()?.sink)
    }
}

impl<S: InstructionSink, R: DescriptorResolver> ExpressionCompiler<S, R> {
    pub fn with_options(sink: S, resolver: R, options: CompilerOptions) -> Self {
        Self {
            sink,
            resolver,
            options,
            labels: LabelManager::default(),
            current_stack_depth: 0,
            max_stack_size: 0,
            reachable: true,
        }
    }

    /// Compile one expression, appending its instructions to the sink.
    ///
    /// On error the sink may hold a partial sequence, which must be
    /// discarded. Errors detected while selecting instructions for a node are
    /// reported before that node emits anything.
    pub fn compile(&mut self, expr: &Expr<'_>) -> Result<(), CompileError> {
        let before = self.current_stack_depth;
        self.transform(expr)?;
        let expected = before + expr.stack_effect();
        if self.options.check_stack_balance && self.current_stack_depth != expected {
            return Err(CompileError::StackImbalance {
                expected,
                actual: self.current_stack_depth,
            });
        }
        tracing::debug!(
            depth = self.current_stack_depth,
            max_stack = self.max_stack_size,
            labels = self.labels.len(),
            "compiled expression"
        );
        Ok(())
    }

    pub fn stack_depth(&self) -> usize {
        self.current_stack_depth
    }

    pub fn max_stack(&self) -> usize {
        self.max_stack_size
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Finalize compilation: every label created must have been placed.
    pub fn finish(self) -> Result<Compiled<S>, CompileError> {
        self.labels.verify()?;
        Ok(Compiled {
            sink: self.sink,
            max_stack: self.max_stack_size,
        })
    }

    /// Emit one instruction and apply its stack effect.
    pub(super) fn emit(&mut self, instruction: Instruction) {
        let effect = instruction.stack_effect();
        debug_assert!(
            self.current_stack_depth >= effect.pops,
            "Stack underflow: {:?} pops {} but depth is {}",
            instruction,
            effect.pops,
            self.current_stack_depth
        );
        self.current_stack_depth =
            self.current_stack_depth.saturating_sub(effect.pops) + effect.pushes;
        if self.current_stack_depth > self.max_stack_size {
            self.max_stack_size = self.current_stack_depth;
        }
        tracing::trace!(?instruction, depth = self.current_stack_depth, "emit");
        self.sink.emit(instruction);
    }

    /// Compile a child whose value is consumed by its parent.
    pub(super) fn operand(&mut self, expr: &Expr<'_>) -> Result<(), CompileError> {
        if !expr.produces_value() {
            return Err(CompileError::VoidValue {
                ty: void_source(expr),
            });
        }
        self.transform(expr)
    }

    fn operands(&mut self, exprs: &[&Expr<'_>]) -> Result<(), CompileError> {
        exprs.iter().try_for_each(|expr| self.operand(expr))
    }

    fn field_access(&self, field: &FieldReference) -> FieldAccess {
        FieldAccess {
            owner: self.resolver.internal_name(field.owner()),
            name: field.name().to_string(),
            descriptor: self.resolver.field_descriptor(field),
        }
    }

    fn compile_get_field(
        &mut self,
        target: Option<&Expr<'_>>,
        field: &FieldReference,
    ) -> Result<(), CompileError> {
        if field.is_static() != target.is_none() {
            return Err(CompileError::FieldAccessMismatch {
                field: field.to_string(),
                is_static: field.is_static(),
            });
        }
        select::category(field.ty())?;
        let access = self.field_access(field);
        match target {
            Some(target) => {
                self.operand(target)?;
                self.emit(Instruction::GetField(access));
            }
            None => self.emit(Instruction::GetStatic(access)),
        }
        Ok(())
    }

    fn method_call(&self, method: &MethodReference) -> MethodCall {
        MethodCall {
            kind: method.dispatch(),
            owner: self.resolver.internal_name(method.owner()),
            name: method.name().to_string(),
            descriptor: self.resolver.method_descriptor(method),
            arguments: method.parameters().len(),
            returns_value: !method.returns().is_void(),
        }
    }

    fn check_arguments(
        method: &MethodReference,
        args: &[&Expr<'_>],
    ) -> Result<(), CompileError> {
        let expected = method.parameters().len();
        if args.len() != expected {
            return Err(CompileError::ArgumentCountMismatch {
                method: method.to_string(),
                expected,
                found: args.len(),
            });
        }
        Ok(())
    }

    /// A call with a receiver (`target`) or without one.
    ///
    /// Receiver-less calls must dispatch statically; calls on a receiver may
    /// use any other dispatch, including a constructor invoked on an existing
    /// object.
    fn compile_invoke(
        &mut self,
        target: Option<&Expr<'_>>,
        method: &MethodReference,
        args: &[&Expr<'_>],
    ) -> Result<(), CompileError> {
        let dispatch = method.dispatch();
        if dispatch.has_receiver() != target.is_some() {
            return Err(CompileError::ReceiverMismatch {
                method: method.to_string(),
                dispatch,
            });
        }
        Self::check_arguments(method, args)?;
        let call = self.method_call(method);
        if let Some(target) = target {
            self.operand(target)?;
        }
        self.operands(args)?;
        self.emit(Instruction::Invoke(call));
        Ok(())
    }

    /// `new T(args)`: allocate, duplicate, initialize; the copy survives.
    fn compile_new_instance(
        &mut self,
        constructor: &MethodReference,
        args: &[&Expr<'_>],
    ) -> Result<(), CompileError> {
        if constructor.dispatch() != DispatchKind::Constructor {
            return Err(CompileError::ReceiverMismatch {
                method: constructor.to_string(),
                dispatch: constructor.dispatch(),
            });
        }
        Self::check_arguments(constructor, args)?;
        let call = self.method_call(constructor);
        let owner = self.resolver.internal_name(constructor.owner());
        self.emit(Instruction::New(owner));
        self.emit(Instruction::Dup);
        self.operands(args)?;
        self.emit(Instruction::Invoke(call));
        Ok(())
    }

    fn compile_comparison(
        &mut self,
        comparison: select::Comparison,
        lhs: &Expr<'_>,
        rhs: &Expr<'_>,
    ) -> Result<(), CompileError> {
        self.operand(lhs)?;
        self.operand(rhs)?;
        if let Some(reduce) = comparison.reduce {
            self.emit(reduce);
        }
        self.select_boolean(comparison.jump_if_false)
    }
}

/// Describes why `expr` has no value, for [`CompileError::VoidValue`].
fn void_source(expr: &Expr<'_>) -> String {
    match expr {
        Expr::Invoke { method, .. } | Expr::InvokeStatic { method, .. } => {
            method.returns().to_string()
        }
        Expr::Ternary { on_true, .. } => void_source(on_true),
        _ => String::from("void"),
    }
}

impl<'a, 'e, S: InstructionSink, R: DescriptorResolver> TreeTransformer<&'a Expr<'e>>
    for ExpressionCompiler<S, R>
{
    type Output = Result<(), CompileError>;

    fn transform(&mut self, expr: &'a Expr<'e>) -> Self::Output {
        match *expr {
            Expr::Constant(ref constant) => {
                self.push_constant(constant);
                Ok(())
            }
            Expr::Load(variable) => {
                let load = select::load_local(variable)?;
                self.emit(load);
                Ok(())
            }
            Expr::LoadThis => {
                self.emit(Instruction::Load(Category::Reference, 0));
                Ok(())
            }
            Expr::GetField { target, field } => self.compile_get_field(Some(target), field),
            Expr::GetStatic(field) => self.compile_get_field(None, field),
            Expr::NewInstance { constructor, args } => self.compile_new_instance(constructor, args),
            Expr::Invoke {
                target,
                method,
                args,
            } => self.compile_invoke(Some(target), method, args),
            Expr::InvokeStatic { method, args } => self.compile_invoke(None, method, args),
            Expr::Not(operand) => self.compile_not(operand),
            Expr::Or(lhs, rhs) => self.compile_or(lhs, rhs),
            Expr::Ternary {
                test,
                on_true,
                on_false,
            } => {
                if on_true.produces_value() != on_false.produces_value() {
                    return Err(CompileError::VoidValue {
                        ty: void_source(if on_true.produces_value() {
                            on_false
                        } else {
                            on_true
                        }),
                    });
                }
                self.compile_ternary(test, on_true, on_false)
            }
            Expr::Eq { lhs, rhs, ty } => {
                let comparison = select::equality(ty)?;
                self.compile_comparison(comparison, lhs, rhs)
            }
            Expr::Gt { lhs, rhs, ty } => {
                let comparison = select::ordering(ty)?;
                self.compile_comparison(comparison, lhs, rhs)
            }
            Expr::Arithmetic { op, lhs, rhs, ty } => {
                let instruction = select::arithmetic(op, ty)?;
                self.operand(lhs)?;
                self.operand(rhs)?;
                self.emit(instruction);
                Ok(())
            }
            Expr::Widen { expr, from, to } => {
                let conversion = select::widening(from, to)?;
                self.operand(expr)?;
                if let Some(conversion) = conversion {
                    self.emit(conversion);
                }
                Ok(())
            }
            Expr::Cast { ty, expr } => {
                if ty.is_primitive() {
                    return Err(CompileError::CastToPrimitive { ty: ty.to_string() });
                }
                let name = self.resolver.internal_name(ty);
                self.operand(expr)?;
                self.emit(Instruction::CheckCast(name));
                Ok(())
            }
            Expr::NewArray { element, elements } => self.compile_new_array(element, elements),
            Expr::Pop(value) => {
                self.operand(value)?;
                self.emit(Instruction::Pop);
                Ok(())
            }
        }
    }
}
