//! Type placeholders in the character stream.
//!
//! A placeholder carries exactly one [`QualifiedName`] through the character stream so the block handler
//! can replace it with the shortest unambiguous spelling at the point it is reached. The wire shape is
//!
//! ```text
//! U+E000 <explicit form, e.g. `com.example:Outer.Inner`> U+E001
//! ```
//!
//! ## Notes
//! - Both sentinels are private-use code points; generated Java text never contains them, so they are
//!   recognized in every lexical context (including comments and literals).
//! - A placeholder is always replaced, never emitted raw.

use unitgen_core::QualifiedName;

use super::errors::{EmitError, EmitResult};

/// Opens a placeholder.
pub const PLACEHOLDER_START: char = '\u{E000}';

/// Closes a placeholder.
pub const PLACEHOLDER_END: char = '\u{E001}';

/// Encode `name` as a placeholder token.
pub fn encode(name: &QualifiedName) -> String {
    let mut token = String::new();
    token.push(PLACEHOLDER_START);
    token.push_str(&name.explicit_form());
    token.push(PLACEHOLDER_END);
    token
}

/// Decode the payload collected between the sentinels.
pub fn decode(payload: &str) -> EmitResult<QualifiedName> {
    payload.parse().map_err(|cause| EmitError::MalformedPlaceholder {
        raw: payload.to_string(),
        cause,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_shape() {
        let name: QualifiedName = "com.example.Widget".parse().unwrap();
        assert_eq!(encode(&name), "\u{E000}com.example:Widget\u{E001}");
    }

    #[test]
    fn test_decode_keeps_nesting() {
        let name = QualifiedName::new(["com", "example"], ["Outer", "Inner"]).unwrap();
        let token = encode(&name);
        let payload = token.trim_start_matches(PLACEHOLDER_START).trim_end_matches(PLACEHOLDER_END);
        assert_eq!(decode(payload).unwrap(), name);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode("not a name"), Err(EmitError::MalformedPlaceholder { .. })));
    }
}
