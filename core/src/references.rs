//! References to members and locals in an already-resolved environment.

use core::fmt;

use crate::types::{Modifiers, TypeReference};
use crate::{String, Vec};

/// Name the target machine gives to instance initializers.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// The call mechanism a method reference resolves to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DispatchKind {
    /// Owner is an interface.
    Interface,
    /// Instance initializer, dispatched directly.
    Constructor,
    Static,
    Virtual,
}

impl DispatchKind {
    /// Whether a receiver is evaluated before the arguments.
    pub const fn has_receiver(self) -> bool {
        !matches!(self, DispatchKind::Static)
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            DispatchKind::Interface => "invokeinterface",
            DispatchKind::Constructor => "invokespecial",
            DispatchKind::Static => "invokestatic",
            DispatchKind::Virtual => "invokevirtual",
        }
    }
}

impl fmt::Display for DispatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DispatchKind::Interface => "interface",
            DispatchKind::Constructor => "constructor",
            DispatchKind::Static => "static",
            DispatchKind::Virtual => "virtual",
        })
    }
}

/// A method (or constructor) of some owner type.
///
/// The [`DispatchKind`] is derived from the owner and the method itself when
/// the reference is built; callers never choose it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodReference {
    owner: TypeReference,
    name: String,
    returns: TypeReference,
    parameters: Vec<TypeReference>,
    modifiers: Modifiers,
    dispatch: DispatchKind,
}

impl MethodReference {
    pub fn new(
        owner: TypeReference,
        returns: TypeReference,
        name: impl Into<String>,
        modifiers: Modifiers,
        parameters: impl IntoIterator<Item = TypeReference>,
    ) -> Self {
        let name = name.into();
        let dispatch = if owner.is_interface() {
            DispatchKind::Interface
        } else if name == CONSTRUCTOR_NAME {
            DispatchKind::Constructor
        } else if modifiers.contains(Modifiers::STATIC) {
            DispatchKind::Static
        } else {
            DispatchKind::Virtual
        };
        Self {
            owner,
            name,
            returns,
            parameters: parameters.into_iter().collect(),
            modifiers,
            dispatch,
        }
    }

    /// A public instance method.
    pub fn method(
        owner: TypeReference,
        returns: TypeReference,
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = TypeReference>,
    ) -> Self {
        Self::new(owner, returns, name, Modifiers::PUBLIC, parameters)
    }

    /// A public static method.
    pub fn static_method(
        owner: TypeReference,
        returns: TypeReference,
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = TypeReference>,
    ) -> Self {
        Self::new(
            owner,
            returns,
            name,
            Modifiers::PUBLIC | Modifiers::STATIC,
            parameters,
        )
    }

    /// A public constructor of `owner`.
    pub fn constructor(
        owner: TypeReference,
        parameters: impl IntoIterator<Item = TypeReference>,
    ) -> Self {
        let void = crate::types::VOID.clone();
        Self::new(owner, void, CONSTRUCTOR_NAME, Modifiers::PUBLIC, parameters)
    }

    pub fn owner(&self) -> &TypeReference {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn returns(&self) -> &TypeReference {
        &self.returns
    }

    pub fn parameters(&self) -> &[TypeReference] {
        &self.parameters
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn dispatch(&self) -> DispatchKind {
        self.dispatch
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }
}

impl fmt::Display for MethodReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.owner, self.name)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", parameter)?;
        }
        f.write_str(")")
    }
}

/// A field of some owner type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldReference {
    owner: TypeReference,
    name: String,
    ty: TypeReference,
    modifiers: Modifiers,
}

impl FieldReference {
    pub fn new(
        owner: TypeReference,
        ty: TypeReference,
        name: impl Into<String>,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            owner,
            name: name.into(),
            ty,
            modifiers,
        }
    }

    /// A public instance field.
    pub fn field(owner: TypeReference, ty: TypeReference, name: impl Into<String>) -> Self {
        Self::new(owner, ty, name, Modifiers::PUBLIC)
    }

    /// A public static field.
    pub fn static_field(owner: TypeReference, ty: TypeReference, name: impl Into<String>) -> Self {
        Self::new(owner, ty, name, Modifiers::PUBLIC | Modifiers::STATIC)
    }

    pub fn owner(&self) -> &TypeReference {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeReference {
        &self.ty
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }
}

impl fmt::Display for FieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.name)
    }
}

/// A local variable slot allocated by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocalVariable {
    index: u16,
    ty: TypeReference,
}

impl LocalVariable {
    pub fn new(index: u16, ty: TypeReference) -> Self {
        Self { index, ty }
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn ty(&self) -> &TypeReference {
        &self.ty
    }
}
