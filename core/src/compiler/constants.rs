//! Literal and array encoding.

use super::{select, CompileError, ExpressionCompiler};
use crate::bytecode::{FieldAccess, Instruction, InstructionSink, PoolConstant};
use crate::descriptor::DescriptorResolver;
use crate::expr::{Constant, Expr};
use crate::types::{Primitive, TypeReference};
use crate::String;

/// Wrapper class holding the `TYPE` class object of a primitive.
const fn boxed_class(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Boolean => "java/lang/Boolean",
        Primitive::Byte => "java/lang/Byte",
        Primitive::Short => "java/lang/Short",
        Primitive::Char => "java/lang/Character",
        Primitive::Int => "java/lang/Integer",
        Primitive::Long => "java/lang/Long",
        Primitive::Float => "java/lang/Float",
        Primitive::Double => "java/lang/Double",
        Primitive::Void => "java/lang/Void",
    }
}

/// The most compact instruction pushing the int `value`.
pub(crate) fn int_constant(value: i32, compact: bool) -> Instruction {
    if !compact {
        return Instruction::Ldc(PoolConstant::Int(value));
    }
    if let Ok(small @ 0..=5) = u8::try_from(value) {
        Instruction::IConst(small)
    } else if let Ok(byte) = i8::try_from(value) {
        Instruction::BiPush(byte)
    } else if let Ok(short) = i16::try_from(value) {
        Instruction::SiPush(short)
    } else {
        Instruction::Ldc(PoolConstant::Int(value))
    }
}

impl<S: InstructionSink, R: DescriptorResolver> ExpressionCompiler<S, R> {
    pub(super) fn push_int(&mut self, value: i32) {
        let instruction = int_constant(value, self.options.compact_constants);
        self.emit(instruction);
    }

    pub(super) fn push_constant(&mut self, constant: &Constant<'_>) {
        match *constant {
            Constant::Null => self.emit(Instruction::AConstNull),
            Constant::Bool(value) => self.emit(Instruction::IConst(u8::from(value))),
            Constant::Byte(value) => self.push_int(i32::from(value)),
            Constant::Short(value) => self.push_int(i32::from(value)),
            Constant::Char(value) => self.push_int(i32::from(value)),
            Constant::Int(value) => self.push_int(value),
            Constant::Long(value) => self.emit(Instruction::Ldc(PoolConstant::Long(value))),
            Constant::Float(value) => self.emit(Instruction::Ldc(PoolConstant::Float(value))),
            Constant::Double(value) => self.emit(Instruction::Ldc(PoolConstant::Double(value))),
            Constant::Str(value) => {
                self.emit(Instruction::Ldc(PoolConstant::String(String::from(value))))
            }
            Constant::Type(ty) => self.push_class_literal(ty),
        }
    }

    /// `int.class` has no pool entry; it is read from the wrapper's `TYPE`.
    fn push_class_literal(&mut self, ty: &TypeReference) {
        let instruction = match ty.primitive_kind() {
            Some(primitive) => Instruction::GetStatic(FieldAccess {
                owner: String::from(boxed_class(primitive)),
                name: String::from("TYPE"),
                descriptor: String::from("Ljava/lang/Class;"),
            }),
            None => Instruction::Ldc(PoolConstant::Class(self.resolver.internal_name(ty))),
        };
        self.emit(instruction);
    }

    /// Allocate an array of `elements.len()` and store each element in order.
    ///
    /// Both the allocation and the store instruction are chosen before
    /// anything is emitted.
    pub(super) fn compile_new_array(
        &mut self,
        element: &TypeReference,
        elements: &[&Expr<'_>],
    ) -> Result<(), CompileError> {
        let create = select::new_array(element, &self.resolver)?;
        let store = select::array_store(element)?;
        let len = i32::try_from(elements.len())
            .map_err(|_| CompileError::ArrayTooLarge { len: elements.len() })?;

        self.push_int(len);
        self.emit(create);
        for (index, value) in (0..len).zip(elements) {
            self.emit(Instruction::Dup);
            self.push_int(index);
            self.operand(value)?;
            self.emit(store.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_constant_ranges() {
        assert_eq!(int_constant(0, true), Instruction::IConst(0));
        assert_eq!(int_constant(5, true), Instruction::IConst(5));
        assert_eq!(int_constant(6, true), Instruction::BiPush(6));
        assert_eq!(int_constant(-1, true), Instruction::BiPush(-1));
        assert_eq!(int_constant(127, true), Instruction::BiPush(127));
        assert_eq!(int_constant(-128, true), Instruction::BiPush(-128));
        assert_eq!(int_constant(128, true), Instruction::SiPush(128));
        assert_eq!(int_constant(32767, true), Instruction::SiPush(32767));
        assert_eq!(int_constant(-32768, true), Instruction::SiPush(-32768));
        assert_eq!(
            int_constant(32768, true),
            Instruction::Ldc(PoolConstant::Int(32768))
        );
    }

    #[test]
    fn test_int_constant_uncompacted() {
        assert_eq!(int_constant(3, false), Instruction::Ldc(PoolConstant::Int(3)));
    }
}
