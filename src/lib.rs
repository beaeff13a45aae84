#![forbid(unsafe_code)]
//! unitgen: incremental emission of Java compilation units.
//!
//! A code generator streams text into a [`emit::CompilationUnitBuilder`] character by character. The
//! builder guarantees that what comes out:
//! - starts with a generated-code marker and the package declaration,
//! - spells every streamed type reference by its simple name when that is unambiguous (first reference
//!   wins), and fully qualified otherwise,
//! - has balanced brace blocks outside literals and comments, checked as the text arrives.
//!
//! ## Modules
//!
//! - `emit` - the emission pipeline (parser, block handler, scope, shortener, facade)
//! - `template` - `${...}` body templates for the CLI
//! - `cli` - command-line interface

pub mod cli;
pub mod emit;
pub mod template;

pub use emit::{CompilationUnitBuilder, EmitError, FeatureSet};
pub use unitgen_core::QualifiedName;
