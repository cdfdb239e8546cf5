//! Primitive types and the coarse categories used for instruction selection.

use core::fmt;

/// The primitive types of the target machine, plus `void`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl Primitive {
    /// Source-level name, e.g. `"int"`.
    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Char => "char",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Void => "void",
        }
    }

    /// Single-character field descriptor.
    pub const fn descriptor(self) -> char {
        match self {
            Primitive::Boolean => 'Z',
            Primitive::Byte => 'B',
            Primitive::Short => 'S',
            Primitive::Char => 'C',
            Primitive::Int => 'I',
            Primitive::Long => 'J',
            Primitive::Float => 'F',
            Primitive::Double => 'D',
            Primitive::Void => 'V',
        }
    }

    /// Category of a value of this type, `None` for `void`.
    ///
    /// `boolean`, `byte`, `short` and `char` collapse into [`Category::Int`]:
    /// once code generation starts there is no distinction between them.
    pub const fn category(self) -> Option<Category> {
        match self {
            Primitive::Boolean
            | Primitive::Byte
            | Primitive::Short
            | Primitive::Char
            | Primitive::Int => Some(Category::Int),
            Primitive::Long => Some(Category::Long),
            Primitive::Float => Some(Category::Float),
            Primitive::Double => Some(Category::Double),
            Primitive::Void => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Instruction-selection category of a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// `int` and everything narrower (`boolean`, `byte`, `short`, `char`).
    Int,
    Long,
    Float,
    Double,
    /// Objects and arrays.
    Reference,
}

impl Category {
    /// Numeric family of this category, `None` for references.
    pub const fn numeric(self) -> Option<Numeric> {
        match self {
            Category::Int => Some(Numeric::Int),
            Category::Long => Some(Numeric::Long),
            Category::Float => Some(Numeric::Float),
            Category::Double => Some(Numeric::Double),
            Category::Reference => None,
        }
    }

    /// Instruction mnemonic prefix (`i`, `l`, `f`, `d`, `a`).
    pub const fn prefix(self) -> char {
        match self {
            Category::Int => 'i',
            Category::Long => 'l',
            Category::Float => 'f',
            Category::Double => 'd',
            Category::Reference => 'a',
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Int => "int",
            Category::Long => "long",
            Category::Float => "float",
            Category::Double => "double",
            Category::Reference => "reference",
        })
    }
}

/// The four numeric categories, the only ones arithmetic is defined on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Numeric {
    Int,
    Long,
    Float,
    Double,
}

impl Numeric {
    pub const fn category(self) -> Category {
        match self {
            Numeric::Int => Category::Int,
            Numeric::Long => Category::Long,
            Numeric::Float => Category::Float,
            Numeric::Double => Category::Double,
        }
    }

    pub const fn prefix(self) -> char {
        self.category().prefix()
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.category().fmt(f)
    }
}
