//! The simple-name registry of one compilation unit.
//!
//! [`Scope`] is the source of truth for "is this simple name already taken in this compilation unit, and
//! by which type". Bindings are monotonic: once a simple name is claimed it is never released or
//! reassigned for the lifetime of the unit.
//!
//! ## Notes
//! - `Reserved` bindings are made before any text is emitted (the generated type and its companions).
//! - `Bound` bindings are claimed on first use while streaming, first writer wins.
//! - Bindings live in a `BTreeMap` so every listing is in a deterministic order.

use std::collections::BTreeMap;

use unitgen_core::QualifiedName;

use super::errors::{EmitError, EmitResult};

/// How a simple name came to be claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingStatus {
    /// Pre-declared before emission; can never move to another owner.
    Reserved,
    /// Claimed by the first reference (or declaration) seen in the stream.
    Bound,
}

/// The owner of a simple name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub owner: QualifiedName,
    pub status: BindingStatus,
}

/// Answer to "may `name` be spelled by its simple name?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStatus {
    /// Nobody claims the simple name yet.
    Free,
    /// The simple name already resolves to this type.
    Owned,
    /// The simple name resolves to a different type.
    Taken,
}

/// Simple name -> binding, for one compilation unit.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: BTreeMap<String, Binding>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `name`'s simple name for it.
    ///
    /// Reserving the same type twice is a no-op (and upgrades an earlier `Bound` claim). Reserving a simple
    /// name that another type already claims is a [`EmitError::ReservedNameConflict`].
    pub fn reserve(&mut self, name: &QualifiedName) -> EmitResult<()> {
        let simple = name.simple_name();
        match self.bindings.get_mut(simple) {
            Some(binding) if binding.owner == *name => {
                binding.status = BindingStatus::Reserved;
                Ok(())
            }
            Some(binding) => Err(EmitError::ReservedNameConflict {
                simple_name: simple.to_string(),
                reserved: binding.owner.clone(),
                requested: name.clone(),
            }),
            None => {
                self.insert(name, BindingStatus::Reserved);
                Ok(())
            }
        }
    }

    /// Claim `name`'s simple name if it is free.
    ///
    /// Returns whether the simple name now resolves to `name` (true if it already did).
    pub fn declare(&mut self, name: &QualifiedName) -> bool {
        match self.lookup(name) {
            NameStatus::Free => {
                self.insert(name, BindingStatus::Bound);
                true
            }
            NameStatus::Owned => true,
            NameStatus::Taken => false,
        }
    }

    /// Check what `name`'s simple name currently resolves to.
    pub fn lookup(&self, name: &QualifiedName) -> NameStatus {
        match self.bindings.get(name.simple_name()) {
            None => NameStatus::Free,
            Some(binding) if binding.owner == *name => NameStatus::Owned,
            Some(_) => NameStatus::Taken,
        }
    }

    pub fn binding(&self, simple_name: &str) -> Option<&Binding> {
        self.bindings.get(simple_name)
    }

    /// Whether anything claims `simple_name`.
    pub fn is_claimed(&self, simple_name: &str) -> bool {
        self.bindings.contains_key(simple_name)
    }

    /// All bindings, ordered by simple name.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(simple, binding)| (simple.as_str(), binding))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn insert(&mut self, name: &QualifiedName, status: BindingStatus) {
        self.bindings.insert(
            name.simple_name().to_string(),
            Binding {
                owner: name.clone(),
                status,
            },
        );
    }
}
