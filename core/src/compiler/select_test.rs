//! Tests for type-directed instruction selection.

use crate::{
    bytecode::{ArithmeticOp, ArrayType, Condition, Instruction},
    compiler::{select, CompileError, Operation},
    descriptor::JvmDescriptors,
    types::{self, Numeric, TypeReference},
};
use pretty_assertions::assert_eq;

#[test]
fn test_equality_covers_every_category() {
    let object = TypeReference::class("java.lang", "Object");
    let ints = [&types::BOOLEAN, &types::BYTE, &types::SHORT, &types::CHAR, &types::INT];

    for ty in ints {
        let comparison = select::equality(ty).unwrap();
        assert_eq!(comparison.reduce, None, "{}", ty);
        assert_eq!(comparison.jump_if_false, Condition::ICmpNe, "{}", ty);
    }

    let wide = [
        (&types::LONG, Instruction::LCmp),
        (&types::FLOAT, Instruction::FCmpL),
        (&types::DOUBLE, Instruction::DCmpL),
    ];
    for (ty, reduce) in wide {
        let comparison = select::equality(ty).unwrap();
        assert_eq!(comparison.reduce, Some(reduce));
        assert_eq!(comparison.jump_if_false, Condition::Ne);
    }

    let comparison = select::equality(&object).unwrap();
    assert_eq!(comparison.reduce, None);
    assert_eq!(comparison.jump_if_false, Condition::ACmpNe);

    assert!(matches!(
        select::equality(&types::VOID),
        Err(CompileError::VoidValue { .. })
    ));
}

#[test]
fn test_ordering() {
    let comparison = select::ordering(&types::INT).unwrap();
    assert_eq!(comparison.reduce, None);
    assert_eq!(comparison.jump_if_false, Condition::ICmpLe);

    let comparison = select::ordering(&types::FLOAT).unwrap();
    assert_eq!(comparison.reduce, Some(Instruction::FCmpL));
    assert_eq!(comparison.jump_if_false, Condition::Le);

    let array = TypeReference::array_of(types::INT.clone());
    assert_eq!(
        select::ordering(&array),
        Err(CompileError::UnsupportedOperation {
            operation: Operation::Ordering,
            ty: "int[]".into(),
        })
    );
}

#[test]
fn test_arithmetic() {
    assert_eq!(
        select::arithmetic(ArithmeticOp::Add, &types::CHAR),
        Ok(Instruction::Arithmetic(ArithmeticOp::Add, Numeric::Int))
    );
    assert_eq!(
        select::arithmetic(ArithmeticOp::Multiply, &types::FLOAT),
        Ok(Instruction::Arithmetic(ArithmeticOp::Multiply, Numeric::Float))
    );
    assert_eq!(
        select::arithmetic(ArithmeticOp::Subtract, &TypeReference::class("", "Thing")),
        Err(CompileError::UnsupportedOperation {
            operation: Operation::Subtract,
            ty: "Thing".into(),
        })
    );
}

#[test]
fn test_array_types_keep_element_width() {
    let cases = [
        (&types::BOOLEAN, ArrayType::Boolean),
        (&types::BYTE, ArrayType::Byte),
        (&types::SHORT, ArrayType::Short),
        (&types::CHAR, ArrayType::Char),
        (&types::INT, ArrayType::Int),
        (&types::LONG, ArrayType::Long),
        (&types::FLOAT, ArrayType::Float),
        (&types::DOUBLE, ArrayType::Double),
    ];
    for (ty, expected) in cases {
        assert_eq!(select::array_type(ty), Ok(expected));
        assert_eq!(
            select::new_array(ty, &JvmDescriptors),
            Ok(Instruction::NewArray(expected))
        );
        assert_eq!(
            select::array_store(ty),
            Ok(Instruction::ArrayStore(expected))
        );
    }

    let nested = TypeReference::array_of(types::INT.clone());
    assert_eq!(
        select::new_array(&nested, &JvmDescriptors),
        Ok(Instruction::ANewArray("[I".into()))
    );
}

#[test]
fn test_widening() {
    use Numeric::*;

    let allowed = [
        (&types::INT, &types::LONG, Int, Long),
        (&types::CHAR, &types::FLOAT, Int, Float),
        (&types::INT, &types::DOUBLE, Int, Double),
        (&types::LONG, &types::FLOAT, Long, Float),
        (&types::LONG, &types::DOUBLE, Long, Double),
        (&types::FLOAT, &types::DOUBLE, Float, Double),
    ];
    for (from, to, source, target) in allowed {
        assert_eq!(
            select::widening(from, to),
            Ok(Some(Instruction::Convert(source, target)))
        );
    }

    assert_eq!(select::widening(&types::BYTE, &types::SHORT), Ok(None));
    assert!(select::widening(&types::LONG, &types::INT).is_err());
    assert!(select::widening(&types::FLOAT, &types::LONG).is_err());
    assert!(select::widening(&TypeReference::class("", "Thing"), &types::INT).is_err());
}
