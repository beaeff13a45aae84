//! Java vocabulary registries.
//!
//! The design goal is to avoid stringly-typed checks scattered across the emitter. Keyword tests and the
//! list of implicitly visible `java.lang` types live here, once.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no IO, no side effects.
//!
//! ## Examples
//! ```rust
//! use unitgen_core::lang::java_keywords;
//!
//! assert!(java_keywords::is_keyword("class"));
//! assert!(java_keywords::is_type_declaration("interface"));
//! assert!(!java_keywords::is_keyword("Widget"));
//! ```

pub mod java_keywords;
pub mod java_lang;
