//! Decide how a type reference is spelled.
//!
//! The policy is greedy and first-come-first-served: the first reference to a type claims its simple name
//! for the rest of the unit; a later reference to a *different* type with the same simple name pays the
//! fully qualified spelling. Decisions are never revisited.

use std::borrow::Cow;

use unitgen_core::QualifiedName;

use super::scope::{NameStatus, Scope};

/// Rewrites qualified names into the shortest unambiguous spelling for the current [`Scope`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeShortener;

impl TypeShortener {
    pub fn new() -> Self {
        Self
    }

    /// Spell `name`, claiming its simple name in `scope` when it is free.
    ///
    /// Deciding and claiming happen in this one call; callers must not split them.
    pub fn shorten<'n>(&self, name: &'n QualifiedName, scope: &mut Scope) -> Cow<'n, str> {
        let spelling = match scope.lookup(name) {
            NameStatus::Owned => Cow::Borrowed(name.simple_name()),
            NameStatus::Free => {
                scope.declare(name);
                Cow::Borrowed(name.simple_name())
            }
            NameStatus::Taken => Cow::Owned(name.to_string()),
        };
        tracing::trace!(name = %name, spelling = %spelling, "shortened type reference");
        spelling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> QualifiedName {
        s.parse().unwrap()
    }

    #[test]
    fn test_first_reference_claims() {
        let mut scope = Scope::new();
        let shortener = TypeShortener::new();
        let list = q("java.util.List");
        assert_eq!(shortener.shorten(&list, &mut scope), "List");
        assert_eq!(shortener.shorten(&list, &mut scope), "List");
        assert!(scope.is_claimed("List"));
    }

    #[test]
    fn test_collision_falls_back_to_qualified() {
        let mut scope = Scope::new();
        let shortener = TypeShortener::new();
        assert_eq!(shortener.shorten(&q("java.util.List"), &mut scope), "List");
        assert_eq!(shortener.shorten(&q("java.awt.List"), &mut scope), "java.awt.List");
        assert_eq!(shortener.shorten(&q("java.awt.List"), &mut scope), "java.awt.List");
    }

    #[test]
    fn test_reserved_name_forces_qualified() {
        let mut scope = Scope::new();
        scope.reserve(&q("com.example.Widget")).unwrap();
        let shortener = TypeShortener::new();
        assert_eq!(shortener.shorten(&q("com.other.Widget"), &mut scope), "com.other.Widget");
        assert_eq!(shortener.shorten(&q("com.example.Widget"), &mut scope), "Widget");
    }

    #[test]
    fn test_nested_types_use_only_simple_name() {
        let mut scope = Scope::new();
        let shortener = TypeShortener::new();
        let builder = q("com.example.Widget.Builder");
        assert_eq!(shortener.shorten(&builder, &mut scope), "Builder");
        // Another `Builder` never gets a partially qualified `Other.Builder`.
        assert_eq!(
            shortener.shorten(&q("com.example.Other.Builder"), &mut scope),
            "com.example.Other.Builder"
        );
    }
}
