//! Percent-style templates and the values that can fill them.
//!
//! `add("private final %s %s;%n", &[&list_type, &"items"])` expands each `%s` with the next argument.
//! Arguments implement [`Excerpt`]; a [`QualifiedName`] argument is streamed as a type placeholder, so it is
//! shortened exactly like any other type reference.
//!
//! Directives: `%s` (next argument), `%n` (newline), `%%` (literal `%`). The template is validated and the
//! argument count checked before anything is appended.

use unitgen_core::QualifiedName;

use super::CompilationUnitBuilder;
use super::errors::{EmitError, EmitResult};

/// A value that knows how to write itself into a compilation unit.
pub trait Excerpt {
    fn add_to(&self, code: &mut CompilationUnitBuilder) -> EmitResult<()>;
}

impl Excerpt for str {
    fn add_to(&self, code: &mut CompilationUnitBuilder) -> EmitResult<()> {
        code.append_str(self).map(|_| ())
    }
}

impl Excerpt for String {
    fn add_to(&self, code: &mut CompilationUnitBuilder) -> EmitResult<()> {
        self.as_str().add_to(code)
    }
}

impl Excerpt for char {
    fn add_to(&self, code: &mut CompilationUnitBuilder) -> EmitResult<()> {
        code.append(*self).map(|_| ())
    }
}

impl Excerpt for QualifiedName {
    fn add_to(&self, code: &mut CompilationUnitBuilder) -> EmitResult<()> {
        code.append_type(self).map(|_| ())
    }
}

impl<T: Excerpt + ?Sized> Excerpt for &T {
    fn add_to(&self, code: &mut CompilationUnitBuilder) -> EmitResult<()> {
        (**self).add_to(code)
    }
}

macro_rules! display_excerpt {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Excerpt for $ty {
                fn add_to(&self, code: &mut CompilationUnitBuilder) -> EmitResult<()> {
                    code.append_str(&self.to_string()).map(|_| ())
                }
            }
        )*
    };
}

display_excerpt!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// One parsed piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'t> {
    Text(&'t str),
    Arg,
    Newline,
    Percent,
}

fn parse(template: &str) -> EmitResult<Vec<Piece<'_>>> {
    let mut pieces = Vec::new();
    let mut rest = template;
    while let Some(pos) = rest.find('%') {
        if pos > 0 {
            pieces.push(Piece::Text(&rest[..pos]));
        }
        let mut after = rest[pos + 1..].chars();
        let piece = match after.next() {
            Some('s') => Piece::Arg,
            Some('n') => Piece::Newline,
            Some('%') => Piece::Percent,
            Some(other) => return Err(EmitError::UnknownDirective(format!("%{other}"))),
            None => return Err(EmitError::UnknownDirective("%".to_string())),
        };
        pieces.push(piece);
        rest = after.as_str();
    }
    if !rest.is_empty() {
        pieces.push(Piece::Text(rest));
    }
    Ok(pieces)
}

/// Expand `template` into `code`.
pub(crate) fn expand(code: &mut CompilationUnitBuilder, template: &str, args: &[&dyn Excerpt]) -> EmitResult<()> {
    let pieces = parse(template)?;
    let expected = pieces.iter().filter(|p| **p == Piece::Arg).count();
    if expected != args.len() {
        return Err(EmitError::TemplateArity {
            expected,
            given: args.len(),
        });
    }

    let mut args = args.iter();
    for piece in pieces {
        match piece {
            Piece::Text(text) => {
                code.append_str(text)?;
            }
            Piece::Newline => {
                code.append('\n')?;
            }
            Piece::Percent => {
                code.append('%')?;
            }
            Piece::Arg => {
                if let Some(arg) = args.next() {
                    arg.add_to(code)?;
                }
            }
        }
    }
    Ok(())
}
