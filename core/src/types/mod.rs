//! Semantic types, reduced to what instruction selection needs.

mod primitive;
mod reference;

#[cfg(test)]
mod types_test;

pub use primitive::{Category, Numeric, Primitive};
pub use reference::{Modifiers, TypeReference};

pub static BOOLEAN: TypeReference = TypeReference::primitive(Primitive::Boolean);
pub static BYTE: TypeReference = TypeReference::primitive(Primitive::Byte);
pub static SHORT: TypeReference = TypeReference::primitive(Primitive::Short);
pub static CHAR: TypeReference = TypeReference::primitive(Primitive::Char);
pub static INT: TypeReference = TypeReference::primitive(Primitive::Int);
pub static LONG: TypeReference = TypeReference::primitive(Primitive::Long);
pub static FLOAT: TypeReference = TypeReference::primitive(Primitive::Float);
pub static DOUBLE: TypeReference = TypeReference::primitive(Primitive::Double);
pub static VOID: TypeReference = TypeReference::primitive(Primitive::Void);
