//! Java keyword vocabulary (for name validation and type-declaration tracking).

/// Reserved keywords and literals in Java. None of them may be used as an identifier segment.
pub const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const", "continue",
    "default", "do", "double", "else", "enum", "extends", "final", "finally", "float", "for", "goto", "if",
    "implements", "import", "instanceof", "int", "interface", "long", "native", "new", "package", "private",
    "protected", "public", "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "try", "void", "volatile", "while", "true", "false", "null", "_",
];

/// Words that introduce a type body: `<keyword> Name ... {`.
///
/// `record` is contextual in Java (it is a legal identifier elsewhere), so it is listed here but not in
/// [`JAVA_KEYWORDS`].
pub const TYPE_DECLARATION_KEYWORDS: &[&str] = &["class", "interface", "enum", "record"];

/// Check whether a word is a reserved Java keyword.
pub fn is_keyword(word: &str) -> bool {
    JAVA_KEYWORDS.contains(&word)
}

/// Check whether a word starts a type declaration.
pub fn is_type_declaration(word: &str) -> bool {
    TYPE_DECLARATION_KEYWORDS.contains(&word)
}

/// Check whether a character may start a Java identifier.
pub fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// Check whether a character may continue a Java identifier.
pub fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Check whether `segment` is a legal, non-reserved Java identifier.
pub fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part) && !is_keyword(segment),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("Widget"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("$Proxy1"));
        assert!(is_identifier("record"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("class"));
        assert!(!is_identifier("has-dash"));
    }

    #[test]
    fn test_type_declarations() {
        for word in ["class", "interface", "enum", "record"] {
            assert!(is_type_declaration(word), "{word}");
        }
        assert!(!is_type_declaration("new"));
    }
}
