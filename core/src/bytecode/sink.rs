use super::{Instruction, Label};

/// Append-only destination for emitted instructions.
///
/// The sink owns layout: it records where each label lands and resolves jump
/// offsets later. Label lifecycle (placed exactly once) is enforced by the
/// compiler before `place_label` is called.
pub trait InstructionSink {
    fn emit(&mut self, instruction: Instruction);

    /// Bind `label` to the position of the next emitted instruction.
    fn place_label(&mut self, label: Label);
}

impl<S: InstructionSink + ?Sized> InstructionSink for &mut S {
    fn emit(&mut self, instruction: Instruction) {
        (**self).emit(instruction)
    }

    fn place_label(&mut self, label: Label) {
        (**self).place_label(label)
    }
}
