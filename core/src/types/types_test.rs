use super::*;

#[test]
fn test_categories() {
    assert_eq!(BOOLEAN.category(), Some(Category::Int));
    assert_eq!(CHAR.category(), Some(Category::Int));
    assert_eq!(SHORT.category(), Some(Category::Int));
    assert_eq!(LONG.category(), Some(Category::Long));
    assert_eq!(FLOAT.category(), Some(Category::Float));
    assert_eq!(DOUBLE.category(), Some(Category::Double));
    assert_eq!(VOID.category(), None);

    let string = TypeReference::class("java.lang", "String");
    assert_eq!(string.category(), Some(Category::Reference));
    assert_eq!(
        TypeReference::array_of(INT.clone()).category(),
        Some(Category::Reference)
    );
}

#[test]
fn test_numeric_view() {
    assert_eq!(Category::Int.numeric(), Some(Numeric::Int));
    assert_eq!(Category::Double.numeric(), Some(Numeric::Double));
    assert_eq!(Category::Reference.numeric(), None);
    assert_eq!(Numeric::Long.category(), Category::Long);

    let prefixes: Vec<char> = [
        Category::Int,
        Category::Long,
        Category::Float,
        Category::Double,
        Category::Reference,
    ]
    .iter()
    .map(|category| category.prefix())
    .collect();
    assert_eq!(prefixes, vec!['i', 'l', 'f', 'd', 'a']);
}

#[test]
fn test_display_and_names() {
    let entry = TypeReference::interface("java.util", "Map").nested("Entry");
    assert_eq!(entry.to_string(), "java.util.Map.Entry");
    assert_eq!(entry.simple_name(), "Entry");
    assert!(entry.is_interface());

    let matrix = TypeReference::array_of(TypeReference::array_of(DOUBLE.clone()));
    assert_eq!(matrix.to_string(), "double[][]");
    assert_eq!(matrix.simple_name(), "double[][]");
    assert!(matrix.is_array());
    assert_eq!(matrix.component().and_then(|c| c.component()), Some(&DOUBLE));

    let local = TypeReference::class("", "Local");
    assert_eq!(local.to_string(), "Local");
    assert_eq!(local.package(), Some(""));
}

#[test]
fn test_primitive_queries() {
    assert!(INT.is_primitive());
    assert!(!INT.is_void());
    assert!(VOID.is_void());
    assert_eq!(LONG.primitive_kind(), Some(Primitive::Long));
    assert_eq!(Primitive::Long.descriptor(), 'J');
    assert_eq!(
        TypeReference::class("java.lang", "Object").primitive_kind(),
        None
    );
}

#[test]
fn test_modifiers() {
    let interface = TypeReference::interface("java.lang", "Runnable");
    assert!(interface.modifiers().contains(Modifiers::INTERFACE | Modifiers::ABSTRACT));

    let class = TypeReference::class("java.lang", "Thread");
    assert_eq!(class.modifiers(), Modifiers::PUBLIC);
    assert!(!class.is_interface());

    // `nested` leaves primitives alone.
    assert_eq!(INT.clone().nested("X"), INT);
}
