use pretty_assertions::assert_eq;
use stackgen::{
    types, Bump, Code, CompileError, CompilerOptions, Condition, ExprBuilder, ExpressionCompiler,
    Instruction, LocalVariable, MethodReference, PoolConstant, TypeReference,
};

#[test]
fn test_compile_with_options() {
    let arena = Bump::new();
    let b = ExprBuilder::new(&arena);
    let options = CompilerOptions {
        compact_constants: false,
        ..CompilerOptions::default()
    };

    let code = stackgen::compile_with_options(b.int(3), options).unwrap();
    assert_eq!(code.instructions, vec![Instruction::Ldc(PoolConstant::Int(3))]);
    assert_eq!(code.constants.len(), 1);
}

#[test]
fn test_several_expressions_share_one_sink() {
    let arena = Bump::new();
    let b = ExprBuilder::new(&arena);
    let flag = LocalVariable::new(1, types::BOOLEAN.clone());

    let mut compiler = ExpressionCompiler::new(Code::new());
    compiler.compile(b.pop(b.not(b.load(&flag)))).unwrap();
    assert_eq!(compiler.stack_depth(), 0);
    compiler.compile(b.gt(b.int(2), b.int(1), &types::INT)).unwrap();
    let compiled = compiler.finish().unwrap();

    assert_eq!(compiled.max_stack, 2);
    let code = compiled.sink;
    assert_eq!(code.instructions[5], Instruction::Pop);
    assert!(matches!(
        code.instructions[8],
        Instruction::Branch(Condition::ICmpLe, label) if label.id() == 2
    ));
}

#[test]
fn test_errors_render() {
    let arena = Bump::new();
    let b = ExprBuilder::new(&arena);
    let string = TypeReference::class("java.lang", "String");
    let length = MethodReference::method(string, types::INT.clone(), "length", []);

    let err = ExpressionCompiler::compile_to_code(b.invoke_static(&length, &[])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "virtual method java.lang.String.length() cannot be called this way"
    );
    assert!(matches!(err, CompileError::ReceiverMismatch { .. }));
}
