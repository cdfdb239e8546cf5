//! Instructions and the sink they are emitted into.

mod code;
mod constant_pool;
mod instruction_set;
mod label;
mod sink;

pub use code::Code;
pub use constant_pool::ConstantPool;
pub use instruction_set::{
    ArithmeticOp, ArrayType, Condition, FieldAccess, Instruction, MethodCall, PoolConstant,
    StackEffect,
};
pub use label::Label;
pub use sink::InstructionSink;
