//! Provide the pure value types and vocabulary shared by the unitgen emitter and its tooling.
//!
//! This crate is intentionally small and dependency-light. It contains:
//! - [`QualifiedName`], the identity of a type (package path plus nested name path), and
//! - canonical Java vocabulary (`lang::java_keywords`, `lang::java_lang`) used to validate names and to seed
//!   implicitly visible types.
//!
//! ## Notes
//!
//! - This is a “semantic core” crate: **no IO**, no global state, no logging, and no emitter-specific types.
//!
//! ## Examples
//! ```rust
//! use unitgen_core::QualifiedName;
//!
//! let widget: QualifiedName = "com.example.Widget".parse().unwrap();
//! assert_eq!(widget.simple_name(), "Widget");
//! assert_eq!(widget.package(), "com.example");
//! ```

pub mod lang;
pub mod qualified_name;

pub use qualified_name::{ParseNameError, QualifiedName};
