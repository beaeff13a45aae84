//! Body templates: plain text with `${...}` type references.
//!
//! Used by the `emit` command to stream a hand-written body through a [`CompilationUnitBuilder`]:
//!
//! ```text
//! class Widget {
//!   private final ${java.util.List}<${com.example.Item}> items;
//! }
//! ```
//!
//! - `${name}` streams a type reference; `name` is a qualified name in explicit (`pkg:Outer.Inner`) or
//!   conventional (`pkg.Outer.Inner`) form.
//! - `$$` is a literal `$`. Any other `$` is copied as-is.
//! - A `${` without a closing `}` on the same line is an error.

use thiserror::Error;
use unitgen_core::{ParseNameError, QualifiedName};

use crate::emit::{CompilationUnitBuilder, EmitError};

/// Errors raised while rendering a body template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("line {line}: unterminated type reference `${{{text}`")]
    Unterminated { line: usize, text: String },

    #[error("line {line}: {source}")]
    InvalidName {
        line: usize,
        #[source]
        source: ParseNameError,
    },

    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Stream `template` into `code`.
#[tracing::instrument(skip_all, fields(template_len = template.len()))]
pub fn render(code: &mut CompilationUnitBuilder, template: &str) -> Result<(), TemplateError> {
    for (index, line) in template.split_inclusive('\n').enumerate() {
        render_line(code, line, index + 1)?;
    }
    Ok(())
}

fn render_line(code: &mut CompilationUnitBuilder, line: &str, line_no: usize) -> Result<(), TemplateError> {
    let mut rest = line;
    while let Some(pos) = rest.find('$') {
        code.append_str(&rest[..pos])?;
        let after = &rest[pos + 1..];
        if let Some(tail) = after.strip_prefix('$') {
            code.append('$')?;
            rest = tail;
        } else if let Some(reference) = after.strip_prefix('{') {
            let Some(end) = reference.find('}') else {
                return Err(TemplateError::Unterminated {
                    line: line_no,
                    text: reference.trim_end().to_string(),
                });
            };
            let name: QualifiedName = reference[..end]
                .parse()
                .map_err(|source| TemplateError::InvalidName { line: line_no, source })?;
            code.append_type(&name)?;
            rest = &reference[end + 1..];
        } else {
            code.append('$')?;
            rest = after;
        }
    }
    code.append_str(rest)?;
    Ok(())
}
