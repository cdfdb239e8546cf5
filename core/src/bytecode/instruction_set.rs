//! Stack-machine instruction set.
//!
//! The instructions mirror the JVM operand-stack operations an expression
//! needs. Type-dependent families are parameterized by [`Category`] or
//! [`Numeric`] rather than spelled out per type, so selection code produces a
//! value instead of picking between near-identical variants.
//!
//! # Stack Discipline
//!
//! Every instruction reports its [`StackEffect`] in abstract values (a `long`
//! counts as one value, not two slots).

use core::fmt;
use core::hash::{Hash, Hasher};

use super::Label;
use crate::references::DispatchKind;
use crate::types::{Category, Numeric, Primitive};
use crate::String;

/// A single stack-machine instruction.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Instruction {
    // ========================================================================
    // Constants
    // ========================================================================
    /// Push `null`
    /// Stack: [...] -> [..., null]
    AConstNull,

    /// Push a small int constant (0 to 5)
    /// Stack: [...] -> [..., int]
    IConst(u8),

    /// Push a sign-extended byte
    /// Stack: [...] -> [..., int]
    BiPush(i8),

    /// Push a sign-extended short
    /// Stack: [...] -> [..., int]
    SiPush(i16),

    /// Push a constant from the pool
    /// Stack: [...] -> [..., value]
    Ldc(PoolConstant),

    // ========================================================================
    // Locals & Fields
    // ========================================================================
    /// Load local variable slot
    /// Stack: [...] -> [..., value]
    Load(Category, u16),

    /// Stack: [..., object] -> [..., value]
    GetField(FieldAccess),

    /// Stack: [...] -> [..., value]
    GetStatic(FieldAccess),

    // ========================================================================
    // Objects & Stack Manipulation
    // ========================================================================
    /// Allocate an uninitialized object of the named type
    /// Stack: [...] -> [..., object]
    New(String),

    /// Stack: [..., a] -> [..., a, a]
    Dup,

    /// Stack: [..., a] -> [...]
    Pop,

    /// Check that the top reference is an instance of the named type
    /// Stack: [..., object] -> [..., object]
    CheckCast(String),

    // ========================================================================
    // Calls
    // ========================================================================
    /// Stack: [..., receiver?, arg1, ..., argN] -> [..., result?]
    Invoke(MethodCall),

    // ========================================================================
    // Control Flow
    // ========================================================================
    /// Pop one or two operands and jump if `condition` holds.
    Branch(Condition, Label),

    /// Unconditional jump
    Goto(Label),

    // ========================================================================
    // Arithmetic & Comparison
    // ========================================================================
    /// Stack: [..., a, b] -> [..., a op b]
    Arithmetic(ArithmeticOp, Numeric),

    /// Compare two longs: -1, 0 or 1
    /// Stack: [..., a: long, b: long] -> [..., int]
    LCmp,

    /// Compare two floats, NaN yields -1
    /// Stack: [..., a: float, b: float] -> [..., int]
    FCmpL,

    /// Compare two doubles, NaN yields -1
    /// Stack: [..., a: double, b: double] -> [..., int]
    DCmpL,

    /// Numeric conversion `from` -> `to`
    /// Stack: [..., a] -> [..., a']
    Convert(Numeric, Numeric),

    // ========================================================================
    // Arrays
    // ========================================================================
    /// Allocate a primitive array
    /// Stack: [..., count: int] -> [..., array]
    NewArray(ArrayType),

    /// Allocate an array of the named reference type
    /// Stack: [..., count: int] -> [..., array]
    ANewArray(String),

    /// Stack: [..., array, index: int, value] -> [...]
    ArrayStore(ArrayType),
}

/// Values consumed and produced by one instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StackEffect {
    pub pops: usize,
    pub pushes: usize,
}

impl StackEffect {
    const fn new(pops: usize, pushes: usize) -> Self {
        Self { pops, pushes }
    }

    pub const fn net(self) -> isize {
        self.pushes as isize - self.pops as isize
    }
}

impl Instruction {
    pub fn stack_effect(&self) -> StackEffect {
        match self {
            Self::AConstNull
            | Self::IConst(_)
            | Self::BiPush(_)
            | Self::SiPush(_)
            | Self::Ldc(_)
            | Self::Load(..)
            | Self::GetStatic(_)
            | Self::New(_) => StackEffect::new(0, 1),
            Self::GetField(_)
            | Self::CheckCast(_)
            | Self::Convert(..)
            | Self::NewArray(_)
            | Self::ANewArray(_) => StackEffect::new(1, 1),
            Self::Dup => StackEffect::new(1, 2),
            Self::Pop => StackEffect::new(1, 0),
            Self::Invoke(call) => {
                let receiver = usize::from(call.kind.has_receiver());
                StackEffect::new(
                    receiver + call.arguments,
                    usize::from(call.returns_value),
                )
            }
            Self::Branch(condition, _) => StackEffect::new(condition.operands(), 0),
            Self::Goto(_) => StackEffect::new(0, 0),
            Self::Arithmetic(..) | Self::LCmp | Self::FCmpL | Self::DCmpL => {
                StackEffect::new(2, 1)
            }
            Self::ArrayStore(_) => StackEffect::new(3, 0),
        }
    }

    /// Jump target, if this instruction may transfer control.
    pub fn branch_target(&self) -> Option<Label> {
        match self {
            Self::Branch(_, label) | Self::Goto(label) => Some(*label),
            _ => None,
        }
    }

    /// Whether execution never falls through to the next instruction.
    pub fn is_unconditional_jump(&self) -> bool {
        matches!(self, Self::Goto(_))
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AConstNull => write!(f, "aconst_null"),
            Self::IConst(value) => write!(f, "iconst_{}", value),
            Self::BiPush(value) => write!(f, "{:14} {}", "bipush", value),
            Self::SiPush(value) => write!(f, "{:14} {}", "sipush", value),
            Self::Ldc(constant) => write!(f, "{:14} {:?}", "ldc", constant),
            Self::Load(category, index) => write!(f, "{}load {}", category.prefix(), index),
            Self::GetField(field) => write!(f, "{:14} {:?}", "getfield", field),
            Self::GetStatic(field) => write!(f, "{:14} {:?}", "getstatic", field),
            Self::New(owner) => write!(f, "{:14} {}", "new", owner),
            Self::Dup => write!(f, "dup"),
            Self::Pop => write!(f, "pop"),
            Self::CheckCast(owner) => write!(f, "{:14} {}", "checkcast", owner),
            Self::Invoke(call) => write!(f, "{:14} {:?}", call.kind.mnemonic(), call),
            Self::Branch(condition, label) => write!(f, "{:14} {}", condition.mnemonic(), label),
            Self::Goto(label) => write!(f, "{:14} {}", "goto", label),
            Self::Arithmetic(op, numeric) => write!(f, "{}{}", numeric.prefix(), op.mnemonic()),
            Self::LCmp => write!(f, "lcmp"),
            Self::FCmpL => write!(f, "fcmpl"),
            Self::DCmpL => write!(f, "dcmpl"),
            Self::Convert(from, to) => write!(f, "{}2{}", from.prefix(), to.prefix()),
            Self::NewArray(array) => write!(f, "{:14} {}", "newarray", array.element_name()),
            Self::ANewArray(owner) => write!(f, "{:14} {}", "anewarray", owner),
            Self::ArrayStore(array) => write!(f, "{}astore", array.store_prefix()),
        }
    }
}

/// Operand of `getfield`/`getstatic`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldAccess {
    pub owner: String,
    pub name: String,
    pub descriptor: String,
}

impl fmt::Debug for FieldAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} : {}", self.owner, self.name, self.descriptor)
    }
}

/// Operand of the invoke family.
///
/// `arguments` and `returns_value` restate what `descriptor` encodes so that
/// stack accounting (and the `count` operand of interface calls) need not
/// parse descriptors.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MethodCall {
    pub kind: DispatchKind,
    pub owner: String,
    pub name: String,
    pub descriptor: String,
    pub arguments: usize,
    pub returns_value: bool,
}

impl fmt::Debug for MethodCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{}", self.owner, self.name, self.descriptor)
    }
}

/// Branch condition. The unary forms compare the top int against zero (or
/// the top reference against null); the `ICmp`/`ACmp` forms compare the top
/// two operands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    Eq,
    Ne,
    Lt,
    Ge,
    Gt,
    Le,
    ICmpEq,
    ICmpNe,
    ICmpLt,
    ICmpGe,
    ICmpGt,
    ICmpLe,
    ACmpEq,
    ACmpNe,
    Null,
    NonNull,
}

impl Condition {
    /// Number of operands the branch pops.
    pub const fn operands(self) -> usize {
        match self {
            Condition::Eq
            | Condition::Ne
            | Condition::Lt
            | Condition::Ge
            | Condition::Gt
            | Condition::Le
            | Condition::Null
            | Condition::NonNull => 1,
            _ => 2,
        }
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Condition::Eq => "ifeq",
            Condition::Ne => "ifne",
            Condition::Lt => "iflt",
            Condition::Ge => "ifge",
            Condition::Gt => "ifgt",
            Condition::Le => "ifle",
            Condition::ICmpEq => "if_icmpeq",
            Condition::ICmpNe => "if_icmpne",
            Condition::ICmpLt => "if_icmplt",
            Condition::ICmpGe => "if_icmpge",
            Condition::ICmpGt => "if_icmpgt",
            Condition::ICmpLe => "if_icmple",
            Condition::ACmpEq => "if_acmpeq",
            Condition::ACmpNe => "if_acmpne",
            Condition::Null => "ifnull",
            Condition::NonNull => "ifnonnull",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
}

impl ArithmeticOp {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Subtract => "sub",
            ArithmeticOp::Multiply => "mul",
        }
    }
}

/// Element kind of an array, as far as allocation and stores care.
///
/// Unlike [`Category`], this keeps the narrow primitive widths apart: a
/// `byte[]` and an `int[]` are different arrays even though their elements
/// load as the same category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArrayType {
    Boolean,
    Char,
    Float,
    Double,
    Byte,
    Short,
    Int,
    Long,
    Reference,
}

impl ArrayType {
    /// Array kind for a primitive element, `None` for `void`.
    pub const fn for_primitive(primitive: Primitive) -> Option<Self> {
        match primitive {
            Primitive::Boolean => Some(ArrayType::Boolean),
            Primitive::Byte => Some(ArrayType::Byte),
            Primitive::Short => Some(ArrayType::Short),
            Primitive::Char => Some(ArrayType::Char),
            Primitive::Int => Some(ArrayType::Int),
            Primitive::Long => Some(ArrayType::Long),
            Primitive::Float => Some(ArrayType::Float),
            Primitive::Double => Some(ArrayType::Double),
            Primitive::Void => None,
        }
    }

    /// `atype` operand of `newarray`; `None` for reference arrays.
    pub const fn type_code(self) -> Option<u8> {
        match self {
            ArrayType::Boolean => Some(4),
            ArrayType::Char => Some(5),
            ArrayType::Float => Some(6),
            ArrayType::Double => Some(7),
            ArrayType::Byte => Some(8),
            ArrayType::Short => Some(9),
            ArrayType::Int => Some(10),
            ArrayType::Long => Some(11),
            ArrayType::Reference => None,
        }
    }

    const fn element_name(self) -> &'static str {
        match self {
            ArrayType::Boolean => "boolean",
            ArrayType::Char => "char",
            ArrayType::Float => "float",
            ArrayType::Double => "double",
            ArrayType::Byte => "byte",
            ArrayType::Short => "short",
            ArrayType::Int => "int",
            ArrayType::Long => "long",
            ArrayType::Reference => "reference",
        }
    }

    /// `boolean[]` and `byte[]` share `bastore`.
    const fn store_prefix(self) -> char {
        match self {
            ArrayType::Boolean | ArrayType::Byte => 'b',
            ArrayType::Char => 'c',
            ArrayType::Short => 's',
            ArrayType::Int => 'i',
            ArrayType::Long => 'l',
            ArrayType::Float => 'f',
            ArrayType::Double => 'd',
            ArrayType::Reference => 'a',
        }
    }
}

/// A constant loaded through the constant pool.
///
/// Floating-point constants compare and hash by bit pattern, so `-0.0` and
/// `0.0` are distinct entries and a NaN equals itself.
#[derive(Clone)]
pub enum PoolConstant {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// A class literal, by internal name.
    Class(String),
}

impl PartialEq for PoolConstant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Class(a), Self::Class(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PoolConstant {}

impl Hash for PoolConstant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Int(value) => value.hash(state),
            Self::Long(value) => value.hash(state),
            Self::Float(value) => value.to_bits().hash(state),
            Self::Double(value) => value.to_bits().hash(state),
            Self::String(value) | Self::Class(value) => value.hash(state),
        }
    }
}

impl fmt::Debug for PoolConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}", value),
            Self::Long(value) => write!(f, "{}L", value),
            Self::Float(value) => write!(f, "{:?}F", value),
            Self::Double(value) => write!(f, "{:?}D", value),
            Self::String(value) => write!(f, "{:?}", value),
            Self::Class(value) => write!(f, "class {}", value),
        }
    }
}
