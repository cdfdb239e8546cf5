//! Name and descriptor resolution.
//!
//! Instructions carry names in the external class-file format. The compiler
//! asks a [`DescriptorResolver`] for them and treats it as a pure function.

use crate::references::{FieldReference, MethodReference};
use crate::types::TypeReference;
use crate::String;

pub trait DescriptorResolver {
    /// Internal name as used by `new`, `checkcast`, `anewarray` and member
    /// owners: `java/util/Map$Entry`, or a descriptor for array types.
    fn internal_name(&self, ty: &TypeReference) -> String;

    /// Field descriptor: `I`, `Ljava/lang/String;`, `[J`.
    fn type_descriptor(&self, ty: &TypeReference) -> String;

    /// Method descriptor: `(IJ)Ljava/lang/String;`.
    fn method_descriptor(&self, method: &MethodReference) -> String {
        let mut descriptor = String::from("(");
        for parameter in method.parameters() {
            descriptor.push_str(&self.type_descriptor(parameter));
        }
        descriptor.push(')');
        descriptor.push_str(&self.type_descriptor(method.returns()));
        descriptor
    }

    fn field_descriptor(&self, field: &FieldReference) -> String {
        self.type_descriptor(field.ty())
    }
}

impl<R: DescriptorResolver + ?Sized> DescriptorResolver for &R {
    fn internal_name(&self, ty: &TypeReference) -> String {
        (**self).internal_name(ty)
    }

    fn type_descriptor(&self, ty: &TypeReference) -> String {
        (**self).type_descriptor(ty)
    }

    fn method_descriptor(&self, method: &MethodReference) -> String {
        (**self).method_descriptor(method)
    }

    fn field_descriptor(&self, field: &FieldReference) -> String {
        (**self).field_descriptor(field)
    }
}

/// Standard JVM naming.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct JvmDescriptors;

impl DescriptorResolver for JvmDescriptors {
    fn internal_name(&self, ty: &TypeReference) -> String {
        if let (Some(package), Some(names)) = (ty.package(), ty.class_names()) {
            let mut name = package.replace('.', "/");
            if !name.is_empty() {
                name.push('/');
            }
            name.push_str(&names.join("$"));
            return name;
        }
        match ty.primitive_kind() {
            Some(primitive) => String::from(primitive.name()),
            None => self.type_descriptor(ty),
        }
    }

    fn type_descriptor(&self, ty: &TypeReference) -> String {
        if let Some(primitive) = ty.primitive_kind() {
            let mut descriptor = String::new();
            descriptor.push(primitive.descriptor());
            return descriptor;
        }
        if let Some(component) = ty.component() {
            let mut descriptor = String::from("[");
            descriptor.push_str(&self.type_descriptor(component));
            return descriptor;
        }
        let mut descriptor = String::from("L");
        descriptor.push_str(&self.internal_name(ty));
        descriptor.push(';');
        descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{self, TypeReference};

    #[test]
    fn test_internal_names() {
        let string = TypeReference::class("java.lang", "String");
        let entry = TypeReference::interface("java.util", "Map").nested("Entry");
        let local = TypeReference::class("", "Local");

        assert_eq!(JvmDescriptors.internal_name(&string), "java/lang/String");
        assert_eq!(JvmDescriptors.internal_name(&entry), "java/util/Map$Entry");
        assert_eq!(JvmDescriptors.internal_name(&local), "Local");
        assert_eq!(
            JvmDescriptors.internal_name(&TypeReference::array_of(string)),
            "[Ljava/lang/String;"
        );
    }

    #[test]
    fn test_type_descriptors() {
        assert_eq!(JvmDescriptors.type_descriptor(&types::BOOLEAN), "Z");
        assert_eq!(JvmDescriptors.type_descriptor(&types::LONG), "J");
        assert_eq!(JvmDescriptors.type_descriptor(&types::VOID), "V");
        assert_eq!(
            JvmDescriptors.type_descriptor(&TypeReference::array_of(TypeReference::array_of(
                types::INT.clone()
            ))),
            "[[I"
        );
    }

    #[test]
    fn test_method_descriptor() {
        let method = MethodReference::static_method(
            TypeReference::class("java.lang", "Long"),
            TypeReference::class("java.lang", "String"),
            "toString",
            [types::LONG.clone(), types::INT.clone()],
        );
        assert_eq!(
            JvmDescriptors.method_descriptor(&method),
            "(JI)Ljava/lang/String;"
        );

        let constructor = MethodReference::constructor(TypeReference::class("java.lang", "Object"), []);
        assert_eq!(JvmDescriptors.method_descriptor(&constructor), "()V");
    }
}
