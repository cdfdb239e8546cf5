use hashbrown::HashMap;

use super::{ConstantPool, Instruction, InstructionSink, Label};
use crate::{String, Vec};

/// A recording instruction sink.
///
/// Keeps the instruction stream, where each label was placed, and the
/// constants referenced by `ldc`. This is what an assembler consumes to lay
/// out a method body; tests use it to inspect emitted code.
#[derive(Clone, Default)]
pub struct Code {
    pub instructions: Vec<Instruction>,
    pub constants: ConstantPool,
    labels: HashMap<Label, usize>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the instruction `label` was placed before.
    ///
    /// A label placed at the very end maps to `instructions.len()`.
    pub fn label_position(&self, label: Label) -> Option<usize> {
        self.labels.get(&label).copied()
    }

    /// Labels placed at `position`, in creation order.
    pub fn labels_at(&self, position: usize) -> Vec<Label> {
        let mut labels: Vec<Label> = self
            .labels
            .iter()
            .filter(|&(_, &at)| at == position)
            .map(|(&label, _)| label)
            .collect();
        labels.sort();
        labels
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl InstructionSink for Code {
    fn emit(&mut self, instruction: Instruction) {
        if let Instruction::Ldc(constant) = &instruction {
            self.constants.intern(constant);
        }
        self.instructions.push(instruction);
    }

    fn place_label(&mut self, label: Label) {
        self.labels.insert(label, self.instructions.len());
    }
}

impl core::fmt::Debug for Code {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Code {{")?;

        if !self.constants.is_empty() {
            writeln!(f, "  constants: [")?;
            for (i, constant) in self.constants.iter().enumerate() {
                writeln!(f, "    [{}] = {:?}", i, constant)?;
            }
            writeln!(f, "  ]")?;
        } else {
            writeln!(f, "  constants: []")?;
        }

        writeln!(f, "  instructions:")?;
        for addr in 0..=self.instructions.len() {
            let labels = self.labels_at(addr);
            let label_prefix = if labels.is_empty() {
                String::new()
            } else {
                let names: Vec<String> = labels.iter().map(|l| crate::format!("{}", l)).collect();
                crate::format!("{}:", names.join(","))
            };

            match self.instructions.get(addr) {
                Some(instr) => writeln!(f, "    {:4} {:>6}  {:?}", addr, label_prefix, instr)?,
                None if !label_prefix.is_empty() => writeln!(f, "    {:4} {:>6}", addr, label_prefix)?,
                None => {}
            }
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::{Condition, PoolConstant};

    #[test]
    fn test_records_labels_and_constants() {
        let mut code = Code::new();
        let end = Label::new(0);
        code.emit(Instruction::Ldc(PoolConstant::Int(100_000)));
        code.emit(Instruction::Branch(Condition::Eq, end));
        code.emit(Instruction::Ldc(PoolConstant::Int(100_000)));
        code.place_label(end);

        assert_eq!(code.len(), 3);
        assert_eq!(code.constants.len(), 1);
        assert_eq!(code.label_position(end), Some(3));
        assert_eq!(code.labels_at(3), [end]);
        assert_eq!(code.label_position(Label::new(1)), None);
    }

    #[test]
    fn test_debug_listing() {
        let mut code = Code::new();
        let target = Label::new(0);
        code.emit(Instruction::IConst(1));
        code.emit(Instruction::Branch(Condition::Ne, target));
        code.emit(Instruction::IConst(0));
        code.place_label(target);

        let listing = crate::format!("{:?}", code);
        assert!(listing.contains("iconst_1"));
        assert!(listing.contains("ifne"));
        assert!(listing.contains("L0:"));
    }
}
