//! Define error types for compilation-unit emission.
//!
//! These errors represent *caller* mistakes (unbalanced structure, conflicting reservations, malformed
//! templates), never transient conditions: the emitter does no IO, so nothing here is worth retrying.
//!
//! ## Notes
//!
//! - A later reference to a type whose simple name is taken is **not** an error; it renders fully qualified.
//! - Prefer actionable messages: callers should know which type or which character broke the unit.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;
use unitgen_core::{ParseNameError, QualifiedName};

/// Error during compilation-unit emission.
#[derive(Debug, Error, Diagnostic)]
pub enum EmitError {
    #[error("unbalanced `}}`: no open block to close")]
    #[diagnostic(
        code(unitgen::unbalanced_close),
        help("the generator closed more blocks than it opened; braces inside literals and comments are not counted")
    )]
    UnbalancedClose {
        #[source_code]
        unit: String,
        #[label("this closes nothing")]
        at: SourceSpan,
    },

    #[error("`{simple_name}` is reserved for `{reserved}` and cannot also be reserved for `{requested}`")]
    #[diagnostic(
        code(unitgen::reserved_name_conflict),
        help("the generated type and its implicit companions must have distinct simple names")
    )]
    ReservedNameConflict {
        simple_name: String,
        reserved: QualifiedName,
        requested: QualifiedName,
    },

    #[error("`{0}` is in the default package; a compilation unit needs a package declaration")]
    #[diagnostic(code(unitgen::default_package))]
    DefaultPackage(QualifiedName),

    #[error("malformed type placeholder `{raw}`")]
    #[diagnostic(
        code(unitgen::malformed_placeholder),
        help("placeholders are written by `append_type`; do not stream the sentinel characters by hand")
    )]
    MalformedPlaceholder {
        raw: String,
        #[source]
        cause: ParseNameError,
    },

    #[error("placeholder end sentinel at offset {offset} without a matching start")]
    #[diagnostic(
        code(unitgen::stray_placeholder_end),
        help("placeholders are written by `append_type`; do not stream the sentinel characters by hand")
    )]
    StrayPlaceholderEnd { offset: usize },

    #[error("the builder already failed at offset {offset}; discard it")]
    #[diagnostic(code(unitgen::poisoned))]
    Poisoned { offset: usize },

    #[error("template expects {expected} argument(s) but {given} were given")]
    #[diagnostic(code(unitgen::template_arity))]
    TemplateArity { expected: usize, given: usize },

    #[error("unknown template directive `{0}`")]
    #[diagnostic(code(unitgen::unknown_directive), help("supported directives are `%s`, `%n` and `%%`"))]
    UnknownDirective(String),

    #[error(transparent)]
    #[diagnostic(code(unitgen::invalid_name))]
    InvalidName(#[from] ParseNameError),
}

/// Result alias for emission operations.
pub type EmitResult<T> = Result<T, EmitError>;
