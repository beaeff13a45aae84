//! Types of `java.lang`, which every Java compilation unit sees without an import.
//!
//! ## Notes
//! - The list covers the commonly referenced public types; it is a seed for scope reservations, not a
//!   complete mirror of the JDK.

use crate::QualifiedName;

/// The package every compilation unit imports implicitly.
pub const JAVA_LANG_PACKAGE: &str = "java.lang";

/// Simple names of implicitly visible `java.lang` types.
pub const JAVA_LANG_TYPES: &[&str] = &[
    "AutoCloseable", "Boolean", "Byte", "CharSequence", "Character", "Class", "ClassCastException", "Cloneable",
    "Comparable", "Deprecated", "Double", "Enum", "Error", "Exception", "Float", "FunctionalInterface",
    "IllegalArgumentException", "IllegalStateException", "IndexOutOfBoundsException", "Integer", "Iterable", "Long",
    "Math", "NullPointerException", "Number", "Object", "Override", "Record", "Runnable", "RuntimeException",
    "SafeVarargs", "Short", "String", "StringBuilder", "SuppressWarnings", "System", "Thread", "Throwable",
    "UnsupportedOperationException", "Void",
];

/// Check whether `simple_name` names an implicitly visible `java.lang` type.
pub fn is_java_lang_type(simple_name: &str) -> bool {
    JAVA_LANG_TYPES.contains(&simple_name)
}

/// Every implicitly visible `java.lang` type, in registry order.
pub fn types() -> impl Iterator<Item = QualifiedName> {
    JAVA_LANG_TYPES.iter().map(|name| java_lang(name))
}

/// Build the qualified name of a `java.lang` type.
///
/// ## Examples
/// ```rust
/// use unitgen_core::lang::java_lang;
///
/// assert_eq!(java_lang::java_lang("String").to_string(), "java.lang.String");
/// ```
pub fn java_lang(simple_name: &str) -> QualifiedName {
    QualifiedName::from_parts(
        JAVA_LANG_PACKAGE.split('.').map(str::to_string).collect(),
        vec![simple_name.to_string()],
    )
}
