//! Seed a [`Scope`] before any character is emitted.
//!
//! Two kinds of seeding happen at construction:
//! - **reservations** for types known in advance (the generated type and its implicit companions); a
//!   conflict between two reservations is fatal, and
//! - **implicitly visible names** reported by a [`NameResolver`] (e.g. `java.lang.String`); these only claim
//!   names that are still free, so a generated type always wins over them.

use unitgen_core::QualifiedName;
use unitgen_core::lang::java_lang;

use super::errors::EmitResult;
use super::scope::Scope;

/// Name-resolution capability consulted once, during construction.
pub trait NameResolver {
    /// Types whose simple names are visible in `target`'s compilation unit without an import.
    fn implicitly_visible(&self, target: &QualifiedName) -> Vec<QualifiedName>;
}

/// Resolver that knows of no implicitly visible types.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoImplicitNames;

impl NameResolver for NoImplicitNames {
    fn implicitly_visible(&self, _target: &QualifiedName) -> Vec<QualifiedName> {
        Vec::new()
    }
}

/// Resolver for the types every Java unit sees from `java.lang`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaLangNames;

impl NameResolver for JavaLangNames {
    fn implicitly_visible(&self, _target: &QualifiedName) -> Vec<QualifiedName> {
        java_lang::types().collect()
    }
}

impl<F> NameResolver for F
where
    F: Fn(&QualifiedName) -> Vec<QualifiedName>,
{
    fn implicitly_visible(&self, target: &QualifiedName) -> Vec<QualifiedName> {
        self(target)
    }
}

/// Pre-declares names in a [`Scope`].
pub struct ScopeHandler<'s> {
    scope: &'s mut Scope,
}

impl<'s> ScopeHandler<'s> {
    pub fn new(scope: &'s mut Scope) -> Self {
        Self { scope }
    }

    /// Reserve `name`'s simple name so it always renders short.
    pub fn predeclare_generated_type(&mut self, name: &QualifiedName) -> EmitResult<()> {
        self.scope.reserve(name)?;
        tracing::debug!(name = %name, "reserved generated type");
        Ok(())
    }

    /// Claim every still-free simple name `resolver` reports as visible in `target`'s unit.
    ///
    /// Must run after all reservations.
    pub fn seed_visible(&mut self, resolver: &dyn NameResolver, target: &QualifiedName) {
        for name in resolver.implicitly_visible(target) {
            if !self.scope.declare(&name) {
                tracing::debug!(name = %name, "implicitly visible name shadowed by a generated type");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::errors::EmitError;
    use crate::emit::scope::BindingStatus;

    fn q(s: &str) -> QualifiedName {
        s.parse().unwrap()
    }

    #[test]
    fn test_predeclare_reserves() {
        let mut scope = Scope::new();
        ScopeHandler::new(&mut scope)
            .predeclare_generated_type(&q("com.example.Widget"))
            .unwrap();
        assert_eq!(scope.binding("Widget").unwrap().status, BindingStatus::Reserved);
    }

    #[test]
    fn test_companion_conflict_is_fatal() {
        let mut scope = Scope::new();
        let mut handler = ScopeHandler::new(&mut scope);
        handler.predeclare_generated_type(&q("com.example.Widget")).unwrap();
        let err = handler.predeclare_generated_type(&q("com.example.gen.Widget")).unwrap_err();
        assert!(matches!(err, EmitError::ReservedNameConflict { .. }));
    }

    #[test]
    fn test_seed_visible_yields_to_reservations() {
        let mut scope = Scope::new();
        let mut handler = ScopeHandler::new(&mut scope);
        handler.predeclare_generated_type(&q("com.example.Override")).unwrap();
        handler.seed_visible(&JavaLangNames, &q("com.example.Override"));
        assert_eq!(scope.binding("Override").unwrap().owner, q("com.example.Override"));
        assert_eq!(scope.binding("String").unwrap().owner, q("java.lang.String"));
        assert_eq!(scope.binding("String").unwrap().status, BindingStatus::Bound);
    }

    #[test]
    fn test_closure_resolver() {
        let mut scope = Scope::new();
        let same_package = |target: &QualifiedName| {
            vec![QualifiedName::top_level(&target.package(), "Sibling").unwrap()]
        };
        ScopeHandler::new(&mut scope).seed_visible(&same_package, &q("com.example.Widget"));
        assert_eq!(scope.binding("Sibling").unwrap().owner, q("com.example.Sibling"));
        assert!(NoImplicitNames.implicitly_visible(&q("com.example.Widget")).is_empty());
    }
}
