//! Semantic type references.

use core::fmt;

use bitflags::bitflags;

use super::{Category, Primitive};
use crate::{Box, String, Vec};

bitflags! {
    /// Access and structural modifiers of a type or member.
    ///
    /// Bit values follow the class file access flags.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct Modifiers: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
    }
}

/// A reference to a type: a primitive, a class/interface, or an array.
///
/// The instruction-selection [`Category`] is computed once, when the reference
/// is built, so selection sites never look at names.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeReference {
    kind: Kind,
    modifiers: Modifiers,
    category: Option<Category>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Kind {
    Primitive(Primitive),
    /// `names` runs from the outermost to the innermost enclosing type.
    Class {
        package: String,
        names: Vec<String>,
    },
    Array(Box<TypeReference>),
}

impl TypeReference {
    pub const fn primitive(primitive: Primitive) -> Self {
        Self {
            kind: Kind::Primitive(primitive),
            modifiers: Modifiers::PUBLIC,
            category: primitive.category(),
        }
    }

    /// A public class `package.name`. An empty package is the default package.
    pub fn class(package: impl Into<String>, name: impl Into<String>) -> Self {
        let mut names = Vec::new();
        names.push(name.into());
        Self {
            kind: Kind::Class {
                package: package.into(),
                names,
            },
            modifiers: Modifiers::PUBLIC,
            category: Some(Category::Reference),
        }
    }

    /// A public interface `package.name`.
    pub fn interface(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::class(package, name)
            .with_modifiers(Modifiers::PUBLIC | Modifiers::INTERFACE | Modifiers::ABSTRACT)
    }

    /// An array whose elements are `component`.
    pub fn array_of(component: TypeReference) -> Self {
        Self {
            kind: Kind::Array(Box::new(component)),
            modifiers: Modifiers::PUBLIC | Modifiers::FINAL,
            category: Some(Category::Reference),
        }
    }

    /// A type nested inside this one. Has no effect on primitives and arrays.
    pub fn nested(mut self, name: impl Into<String>) -> Self {
        if let Kind::Class { names, .. } = &mut self.kind {
            names.push(name.into());
        }
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Instruction-selection category, `None` only for `void`.
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn primitive_kind(&self) -> Option<Primitive> {
        match self.kind {
            Kind::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    pub fn component(&self) -> Option<&TypeReference> {
        match &self.kind {
            Kind::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Package of a class or interface; `None` for primitives and arrays.
    pub fn package(&self) -> Option<&str> {
        match &self.kind {
            Kind::Class { package, .. } => Some(package),
            _ => None,
        }
    }

    /// Enclosing type names of a class, outermost first, ending with its own name.
    pub fn class_names(&self) -> Option<&[String]> {
        match &self.kind {
            Kind::Class { names, .. } => Some(names),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, Kind::Primitive(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self.kind, Kind::Primitive(Primitive::Void))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, Kind::Array(_))
    }

    pub fn is_interface(&self) -> bool {
        self.modifiers.contains(Modifiers::INTERFACE)
    }

    /// Unqualified name: `int`, `Entry`, `String[]`.
    pub fn simple_name(&self) -> String {
        match &self.kind {
            Kind::Primitive(primitive) => String::from(primitive.name()),
            Kind::Class { names, .. } => names.last().cloned().unwrap_or_default(),
            Kind::Array(component) => {
                let mut name = component.simple_name();
                name.push_str("[]");
                name
            }
        }
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Primitive(primitive) => write!(f, "{}", primitive),
            Kind::Class { package, names } => {
                if !package.is_empty() {
                    write!(f, "{}.", package)?;
                }
                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                Ok(())
            }
            Kind::Array(component) => write!(f, "{}[]", component),
        }
    }
}
