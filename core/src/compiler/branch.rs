//! Labels and the two-outcome-to-one-value pattern.
//!
//! Negation, disjunction, ternaries and comparisons all compile to the same
//! shape: evaluate, branch, push one result, jump to the end, push the other
//! result, end. Each label tracks the stack depth expected on arrival so that
//! every control path reaching it agrees.

use super::{CompileError, ExpressionCompiler};
use crate::bytecode::{Condition, Instruction, InstructionSink, Label};
use crate::descriptor::DescriptorResolver;
use crate::expr::Expr;
use crate::visitor::TreeTransformer;
use crate::Vec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelState {
    /// `depth` is the stack depth of the first jump seen, if any.
    Unplaced { depth: Option<usize> },
    Placed { depth: usize },
}

/// Creates labels and enforces their lifecycle: created unplaced, jumped to
/// any number of times, placed exactly once.
#[derive(Debug, Default)]
pub(crate) struct LabelManager {
    labels: Vec<LabelState>,
}

impl LabelManager {
    pub(crate) fn create(&mut self) -> Result<Label, CompileError> {
        let id = u32::try_from(self.labels.len()).map_err(|_| CompileError::TooManyLabels)?;
        self.labels.push(LabelState::Unplaced { depth: None });
        Ok(Label::new(id))
    }

    fn state(&mut self, label: Label) -> Result<&mut LabelState, CompileError> {
        self.labels
            .get_mut(label.id() as usize)
            .ok_or(CompileError::UnplacedLabel(label))
    }

    /// Record a jump to `label` made with `depth` values on the stack.
    pub(crate) fn reference(&mut self, label: Label, depth: usize) -> Result<(), CompileError> {
        match self.state(label)? {
            LabelState::Unplaced { depth: recorded @ None } => {
                *recorded = Some(depth);
                Ok(())
            }
            LabelState::Unplaced {
                depth: Some(expected),
            }
            | LabelState::Placed { depth: expected } => check_depth(*expected, depth),
        }
    }

    /// Place `label` and return the stack depth in effect after it.
    ///
    /// `current` is the depth of the fall-through path, `None` when the
    /// preceding instruction never falls through.
    pub(crate) fn place(
        &mut self,
        label: Label,
        current: Option<usize>,
    ) -> Result<usize, CompileError> {
        let state = self.state(label)?;
        let depth = match (*state, current) {
            (LabelState::Placed { .. }, _) => return Err(CompileError::LabelAlreadyPlaced(label)),
            (LabelState::Unplaced { depth: Some(expected) }, Some(actual)) => {
                check_depth(expected, actual)?;
                actual
            }
            (LabelState::Unplaced { depth: Some(expected) }, None) => expected,
            (LabelState::Unplaced { depth: None }, Some(actual)) => actual,
            (LabelState::Unplaced { depth: None }, None) => 0,
        };
        *state = LabelState::Placed { depth };
        Ok(depth)
    }

    /// Fail on the first label that was created but never placed.
    pub(crate) fn verify(&self) -> Result<(), CompileError> {
        match self
            .labels
            .iter()
            .position(|state| matches!(state, LabelState::Unplaced { .. }))
        {
            Some(id) => Err(CompileError::UnplacedLabel(Label::new(id as u32))),
            None => Ok(()),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }
}

fn check_depth(expected: usize, actual: usize) -> Result<(), CompileError> {
    if expected == actual {
        Ok(())
    } else {
        Err(CompileError::StackImbalance { expected, actual })
    }
}

impl<S: InstructionSink, R: DescriptorResolver> ExpressionCompiler<S, R> {
    pub(super) fn new_label(&mut self) -> Result<Label, CompileError> {
        self.labels.create()
    }

    /// Emit a branch or `goto`, recording the depth its target will see.
    pub(super) fn jump(&mut self, instruction: Instruction) -> Result<(), CompileError> {
        let Some(target) = instruction.branch_target() else {
            self.emit(instruction);
            return Ok(());
        };
        let unconditional = instruction.is_unconditional_jump();
        self.emit(instruction);
        self.labels.reference(target, self.current_stack_depth)?;
        if unconditional {
            self.reachable = false;
        }
        Ok(())
    }

    pub(super) fn place(&mut self, label: Label) -> Result<(), CompileError> {
        let current = self.reachable.then_some(self.current_stack_depth);
        self.current_stack_depth = self.labels.place(label, current)?;
        self.reachable = true;
        tracing::trace!(%label, depth = self.current_stack_depth, "place label");
        self.sink.place_label(label);
        Ok(())
    }

    /// Consume the operands of a comparison via `jump_if_false` and leave a
    /// canonical 1 (comparison held) or 0 on the stack.
    pub(super) fn select_boolean(&mut self, jump_if_false: Condition) -> Result<(), CompileError> {
        let on_false = self.new_label()?;
        self.jump(Instruction::Branch(jump_if_false, on_false))?;
        self.emit(Instruction::IConst(1));
        let end = self.new_label()?;
        self.jump(Instruction::Goto(end))?;
        self.place(on_false)?;
        self.emit(Instruction::IConst(0));
        self.place(end)
    }

    pub(super) fn compile_not(&mut self, expr: &Expr<'_>) -> Result<(), CompileError> {
        self.operand(expr)?;
        // A non-zero operand takes the "false" arm.
        self.select_boolean(Condition::Ne)
    }

    /// `lhs || rhs`; `rhs` is only reachable when `lhs` is false.
    pub(super) fn compile_or(&mut self, lhs: &Expr<'_>, rhs: &Expr<'_>) -> Result<(), CompileError> {
        self.operand(lhs)?;
        let on_true = self.new_label()?;
        self.jump(Instruction::Branch(Condition::Ne, on_true))?;
        self.operand(rhs)?;
        let on_false = self.new_label()?;
        self.jump(Instruction::Branch(Condition::Eq, on_false))?;
        self.place(on_true)?;
        self.emit(Instruction::IConst(1));
        let end = self.new_label()?;
        self.jump(Instruction::Goto(end))?;
        self.place(on_false)?;
        self.emit(Instruction::IConst(0));
        self.place(end)
    }

    /// Exactly one of `on_true` and `on_false` runs.
    pub(super) fn compile_ternary(
        &mut self,
        test: &Expr<'_>,
        on_true: &Expr<'_>,
        on_false: &Expr<'_>,
    ) -> Result<(), CompileError> {
        self.operand(test)?;
        let false_branch = self.new_label()?;
        self.jump(Instruction::Branch(Condition::Eq, false_branch))?;
        self.transform(on_true)?;
        let end = self.new_label()?;
        self.jump(Instruction::Goto(end))?;
        self.place(false_branch)?;
        self.transform(on_false)?;
        self.place(end)
    }
}
