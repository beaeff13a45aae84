//! Feature configuration passed through a compilation unit.
//!
//! The emitter never interprets features; it stores them so the code that decides *what* to generate can
//! ask the unit it is writing into (e.g. "which source level", "is Guava available").

use std::collections::BTreeMap;

/// An ordered set of named features with string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    features: BTreeMap<String, String>,
}

impl FeatureSet {
    /// Create an empty feature set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a feature (last value wins)
    pub fn with_feature(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.features.insert(name.into(), value.into());
        self
    }

    /// Enable a boolean feature
    pub fn enable(self, name: impl Into<String>) -> Self {
        self.with_feature(name, "true")
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.features.get(name).map(String::as_str)
    }

    /// Whether a feature is set to `true`
    pub fn is_enabled(&self, name: &str) -> bool {
        self.get(name) == Some("true")
    }

    /// All features, ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.features.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
