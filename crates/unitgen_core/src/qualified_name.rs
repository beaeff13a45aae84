//! Qualified type names.
//!
//! A [`QualifiedName`] identifies a type by its package path plus its nested name path, e.g.
//! `com.example` + `Outer.Inner`. Keeping the two paths apart is what lets the emitter tell a nested type
//! (`Outer.Inner`) from a package segment, and what lets placeholders round-trip without guesswork.
//!
//! ## Notes
//! - Values are immutable; equality, hashing and ordering are structural.
//! - Two textual forms are accepted by [`FromStr`]:
//!   - explicit: `com.example:Outer.Inner` (the part after `:` is the nested path),
//!   - conventional: `com.example.Outer.Inner` (the first segment starting with an uppercase letter begins
//!     the nested path).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::lang::java_keywords;

/// Separator between the package path and the nested path in the explicit form.
pub const EXPLICIT_SEPARATOR: char = ':';

/// Errors produced when building or parsing a [`QualifiedName`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseNameError {
    #[error("qualified name is empty")]
    Empty,

    #[error("`{segment}` is not a valid identifier in `{input}`")]
    InvalidSegment { input: String, segment: String },

    #[error("`{0}` names no type; expected a segment starting with an uppercase letter or `package:Type`")]
    NoTypeSegment(String),
}

/// The identity of a type: package path plus nested name path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    package: Vec<String>,
    nested: Vec<String>,
}

impl QualifiedName {
    /// Build a qualified name from identifier segments.
    ///
    /// The nested path must be non-empty; every segment must be a non-reserved Java identifier. An empty
    /// package path denotes the default package.
    pub fn new<P, N, S, T>(package: P, nested: N) -> Result<Self, ParseNameError>
    where
        P: IntoIterator<Item = S>,
        N: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let package: Vec<String> = package.into_iter().map(Into::into).collect();
        let nested: Vec<String> = nested.into_iter().map(Into::into).collect();
        let name = Self { package, nested };
        name.validate()?;
        Ok(name)
    }

    /// Build a top-level type name from a dotted package (may be empty) and a simple name.
    pub fn top_level(package: &str, simple_name: &str) -> Result<Self, ParseNameError> {
        Self::new(split_dotted(package), [simple_name])
    }

    /// Assemble a name from segments that are already known to be valid.
    pub(crate) fn from_parts(package: Vec<String>, nested: Vec<String>) -> Self {
        Self { package, nested }
    }

    /// The name of a type nested directly inside this one.
    pub fn nested_type(&self, simple_name: &str) -> Result<Self, ParseNameError> {
        let mut nested = self.nested.clone();
        nested.push(simple_name.to_string());
        Self::new(self.package.clone(), nested)
    }

    /// The directly enclosing type, if this is a nested type.
    pub fn enclosing_type(&self) -> Option<Self> {
        if self.is_top_level() {
            return None;
        }
        Some(Self::from_parts(self.package.clone(), self.nested[..self.nested.len() - 1].to_vec()))
    }

    /// Whether this type is declared directly in its package.
    pub fn is_top_level(&self) -> bool {
        self.nested.len() == 1
    }

    /// The dotted package path (empty for the default package).
    pub fn package(&self) -> String {
        self.package.join(".")
    }

    pub fn package_segments(&self) -> &[String] {
        &self.package
    }

    /// The nested name path, outermost first.
    pub fn simple_names(&self) -> &[String] {
        &self.nested
    }

    /// The short display form: the last nested segment, or the last package segment if no nesting.
    ///
    /// The nested path is never empty for validated names; the package fallback only covers names
    /// assembled from unchecked parts.
    pub fn simple_name(&self) -> &str {
        self.nested
            .last()
            .or_else(|| self.package.last())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The explicit textual form, `package:Outer.Inner`, which [`FromStr`] parses back losslessly.
    pub fn explicit_form(&self) -> String {
        format!("{}{}{}", self.package(), EXPLICIT_SEPARATOR, self.nested.join("."))
    }

    fn validate(&self) -> Result<(), ParseNameError> {
        if self.nested.is_empty() {
            return Err(ParseNameError::NoTypeSegment(self.to_string()));
        }
        for segment in self.package.iter().chain(&self.nested) {
            if !java_keywords::is_identifier(segment) {
                return Err(ParseNameError::InvalidSegment {
                    input: self.to_string(),
                    segment: segment.clone(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for QualifiedName {
    /// Fully qualified dotted form, e.g. `com.example.Outer.Inner`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in self.package.iter().chain(&self.nested) {
            if !first {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for QualifiedName {
    type Err = ParseNameError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseNameError::Empty);
        }

        if let Some((package, nested)) = input.split_once(EXPLICIT_SEPARATOR) {
            return Self::new(split_dotted(package), split_dotted(nested)).map_err(|e| match e {
                ParseNameError::NoTypeSegment(_) => ParseNameError::NoTypeSegment(input.to_string()),
                other => other,
            });
        }

        let segments: Vec<&str> = input.split('.').collect();
        let Some(split) = segments
            .iter()
            .position(|s| s.chars().next().is_some_and(char::is_uppercase))
        else {
            return Err(ParseNameError::NoTypeSegment(input.to_string()));
        };
        Self::new(segments[..split].iter().copied(), segments[split..].iter().copied())
    }
}

fn split_dotted(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('.').collect()
    }
}
