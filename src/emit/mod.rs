//! Emit a Java compilation unit incrementally, one character at a time.
//!
//! This module defines [`CompilationUnitBuilder`] and wires together the focused submodules that implement
//! the emission pipeline. `mod.rs` is intentionally thin.
//!
//! ```text
//! caller ─▶ CompilationUnitBuilder::append(c)
//!             ─▶ SourceParser::classify(c)        (lexical context: code / literal / comment)
//!             ─▶ BlockHandler::handle(event)      (buffer, block stack, placeholder shortening)
//!                  ─▶ TypeShortener::shorten(q, &mut Scope)
//! ```
//!
//! ## Notes
//! - Control never flows backward: nothing already emitted is re-scanned or rewritten.
//! - Output is deterministic: the same construction inputs and the same appends give byte-identical text.
//! - There is no finish step; [`CompilationUnitBuilder::as_str`] may be read at any point, including with
//!   blocks still open.
//!
//! ## See also
//! - [`parser`]: character classification
//! - [`blocks`]: block stack, buffer, placeholder replacement
//! - [`shortener`] / [`scope`]: shortening policy and the simple-name registry
//! - [`scope_handler`]: reservations made at construction
//! - [`excerpt`]: percent-style templates

pub mod blocks;
mod errors;
pub mod excerpt;
mod features;
pub mod parser;
pub mod placeholder;
pub mod scope;
pub mod scope_handler;
pub mod shortener;

pub use blocks::{BlockFrame, BlockHandler, BlockKind};
pub use errors::{EmitError, EmitResult};
pub use excerpt::Excerpt;
pub use features::FeatureSet;
pub use parser::{Context, LexicalEvent, ParserState, SourceParser};
pub use scope::{Binding, BindingStatus, NameStatus, Scope};
pub use scope_handler::{JavaLangNames, NameResolver, NoImplicitNames, ScopeHandler};
pub use shortener::TypeShortener;

use std::fmt;

use unitgen_core::QualifiedName;
use unitgen_core::lang::java_lang::JAVA_LANG_PACKAGE;

/// First line of every generated unit.
pub const GENERATED_MARKER: &str = "// Autogenerated code. Do not modify.";

/// Source builder for one compilation unit: package declaration, shortened type names, checked nesting.
///
/// Construction reserves the generated type's and its companions' simple names, then writes the
/// preamble (marker comment, `package ...;`, blank line) straight into the buffer. Every later character
/// goes through [`append`](Self::append).
///
/// ## Examples
/// ```rust
/// use unitgen::emit::{CompilationUnitBuilder, FeatureSet};
/// use unitgen_core::QualifiedName;
///
/// let widget: QualifiedName = "com.example.Widget".parse().unwrap();
/// let other: QualifiedName = "com.other.Widget".parse().unwrap();
/// let mut code = CompilationUnitBuilder::new(widget.clone(), [], FeatureSet::default()).unwrap();
/// code.add_line("class %s {", &[&widget]).unwrap()
///     .add_line("  %s delegate;", &[&other]).unwrap()
///     .add_line("}", &[]).unwrap();
/// assert!(code.as_str().ends_with("class Widget {\n  com.other.Widget delegate;\n}\n"));
/// ```
#[derive(Debug)]
pub struct CompilationUnitBuilder {
    target: QualifiedName,
    features: FeatureSet,
    preamble_len: usize,
    blocks: BlockHandler,
    parser: SourceParser,
}

impl CompilationUnitBuilder {
    /// Start a unit for `target` with no implicitly visible names beyond the reservations.
    pub fn new(
        target: QualifiedName,
        companions: impl IntoIterator<Item = QualifiedName>,
        features: FeatureSet,
    ) -> EmitResult<Self> {
        Self::with_resolver(&NoImplicitNames, target, companions, features)
    }

    /// Start a unit for `target`, consulting `resolver` (once) for implicitly visible names.
    #[tracing::instrument(skip_all, fields(target = %target))]
    pub fn with_resolver(
        resolver: &dyn NameResolver,
        target: QualifiedName,
        companions: impl IntoIterator<Item = QualifiedName>,
        features: FeatureSet,
    ) -> EmitResult<Self> {
        if target.package_segments().is_empty() {
            return Err(EmitError::DefaultPackage(target));
        }

        let mut scope = Scope::new();
        let mut handler = ScopeHandler::new(&mut scope);
        handler.predeclare_generated_type(&target)?;
        for companion in companions {
            handler.predeclare_generated_type(&companion)?;
        }
        handler.seed_visible(resolver, &target);

        let mut blocks = BlockHandler::new(scope, target.package_segments());
        let preamble = format!("{GENERATED_MARKER}\npackage {};\n\n", target.package());
        blocks.push_unparsed(&preamble);

        Ok(Self {
            target,
            features,
            preamble_len: preamble.len(),
            blocks,
            parser: SourceParser::new(),
        })
    }

    /// Classify and accumulate one character.
    pub fn append(&mut self, c: char) -> EmitResult<&mut Self> {
        let event = self.parser.classify(c);
        self.blocks.handle(event)?;
        Ok(self)
    }

    pub fn append_str(&mut self, text: &str) -> EmitResult<&mut Self> {
        for c in text.chars() {
            self.append(c)?;
        }
        Ok(self)
    }

    /// Stream a reference to `name`; it is rendered short or fully qualified when reached.
    pub fn append_type(&mut self, name: &QualifiedName) -> EmitResult<&mut Self> {
        self.append_str(&placeholder::encode(name))
    }

    /// Expand a percent-style template (`%s`, `%n`, `%%`) into the unit.
    pub fn add(&mut self, template: &str, args: &[&dyn Excerpt]) -> EmitResult<&mut Self> {
        excerpt::expand(self, template, args)?;
        Ok(self)
    }

    /// [`add`](Self::add) followed by a newline.
    pub fn add_line(&mut self, template: &str, args: &[&dyn Excerpt]) -> EmitResult<&mut Self> {
        self.add(template, args)?.append('\n')
    }

    /// Spell `name` with the live scope, ahead of streaming it (claims the simple name when free).
    pub fn shorten(&mut self, name: &QualifiedName) -> String {
        self.blocks.shorten(name)
    }

    pub fn scope(&self) -> &Scope {
        self.blocks.scope()
    }

    pub fn type_shortener(&self) -> &TypeShortener {
        self.blocks.type_shortener()
    }

    pub fn blocks(&self) -> &BlockHandler {
        &self.blocks
    }

    pub fn parser_state(&self) -> ParserState {
        self.parser.state()
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    /// The type this unit is generated for.
    pub fn target(&self) -> &QualifiedName {
        &self.target
    }

    /// The unit as produced so far.
    pub fn as_str(&self) -> &str {
        self.blocks.as_str()
    }

    /// Types spelled by their simple name that a finished file would have to import, sorted.
    ///
    /// Reserved names, `java.lang` types and types of the unit's own package (or nested in the unit's own
    /// top-level type) need no import.
    pub fn imports(&self) -> Vec<QualifiedName> {
        let package = self.target.package_segments();
        let unit_type = self.target.simple_names().first();
        let mut imports: Vec<QualifiedName> = self
            .scope()
            .bindings()
            .filter(|(_, binding)| binding.status == BindingStatus::Bound)
            .map(|(_, binding)| &binding.owner)
            .filter(|owner| {
                let same_package = owner.package_segments() == package;
                let implicit = (same_package || owner.package() == JAVA_LANG_PACKAGE) && owner.is_top_level();
                let own_member = same_package && owner.simple_names().first() == unit_type;
                !implicit && !own_member
            })
            .cloned()
            .collect();
        imports.sort_by_key(|name| name.to_string());
        imports
    }

    /// The unit so far with `import` declarations for [`imports`](Self::imports) spliced after the package
    /// line. The builder's own text is left untouched.
    pub fn render_with_imports(&self) -> String {
        let imports = self.imports();
        let text = self.as_str();
        if imports.is_empty() {
            return text.to_string();
        }
        let (preamble, body) = text.split_at(self.preamble_len);
        let mut rendered = String::with_capacity(text.len() + imports.len() * 32);
        rendered.push_str(preamble);
        for import in &imports {
            rendered.push_str(&format!("import {import};\n"));
        }
        rendered.push('\n');
        rendered.push_str(body);
        rendered
    }
}

impl fmt::Display for CompilationUnitBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> QualifiedName {
        s.parse().unwrap()
    }

    fn builder(target: &str) -> CompilationUnitBuilder {
        CompilationUnitBuilder::new(q(target), [], FeatureSet::default()).unwrap()
    }

    #[test]
    fn test_preamble() {
        let code = builder("com.example.Widget");
        assert_eq!(
            code.as_str(),
            "// Autogenerated code. Do not modify.\npackage com.example;\n\n"
        );
        assert_eq!(code.blocks().depth(), 0);
    }

    #[test]
    fn test_default_package_rejected() {
        let err = CompilationUnitBuilder::new(q("Widget"), [], FeatureSet::default()).unwrap_err();
        assert!(matches!(err, EmitError::DefaultPackage(_)));
    }

    #[test]
    fn test_first_claim_and_collision() {
        let mut code = builder("com.example.Widget");
        code.add_line("%s a; %s b; %s c;", &[&q("com.example.Widget"), &q("com.other.Widget"), &q("com.example.Widget")])
            .unwrap();
        assert!(code.as_str().ends_with("Widget a; com.other.Widget b; Widget c;\n"));
    }

    #[test]
    fn test_companion_conflict_fails_construction() {
        let err = CompilationUnitBuilder::new(
            q("com.example.Widget"),
            [q("com.example.gen.Widget")],
            FeatureSet::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EmitError::ReservedNameConflict { .. }));
    }

    #[test]
    fn test_template_arity_checked_before_append() {
        let mut code = builder("com.example.Widget");
        let before = code.as_str().to_string();
        let err = code.add("%s %s", &[&"only one"]).unwrap_err();
        assert!(matches!(err, EmitError::TemplateArity { expected: 2, given: 1 }));
        assert_eq!(code.as_str(), before);
    }

    #[test]
    fn test_shorten_ahead_of_stream() {
        let mut code = builder("com.example.Widget");
        assert_eq!(code.shorten(&q("java.util.List")), "List");
        code.append_type(&q("java.awt.List")).unwrap();
        assert!(code.as_str().ends_with("java.awt.List"));
    }

    #[test]
    fn test_imports() {
        let mut code = CompilationUnitBuilder::with_resolver(
            &JavaLangNames,
            q("com.example.Widget"),
            [q("com.example.Widget_Builder")],
            FeatureSet::default(),
        )
        .unwrap();
        code.add_line(
            "class Widget { %s a; %s b; %s c; %s d; %s e; %s f; }",
            &[
                &q("java.util.Map"),
                &q("java.lang.String"),
                &q("com.example.Sibling"),
                &q("com.example.Widget.Builder"),
                &q("com.example.Other.Inner"),
                &q("java.util.List"),
            ],
        )
        .unwrap();
        let imports: Vec<String> = code.imports().iter().map(ToString::to_string).collect();
        assert_eq!(imports, vec!["com.example.Other.Inner", "java.util.List", "java.util.Map"]);

        let rendered = code.render_with_imports();
        assert!(rendered.starts_with(
            "// Autogenerated code. Do not modify.\npackage com.example;\n\n\
             import com.example.Other.Inner;\nimport java.util.List;\nimport java.util.Map;\n\nclass Widget {"
        ));
    }

    #[test]
    fn test_features_pass_through() {
        let features = FeatureSet::new().with_feature("source_level", "17");
        let code = CompilationUnitBuilder::new(q("com.example.Widget"), [], features.clone()).unwrap();
        assert_eq!(code.features(), &features);
        assert_eq!(code.target(), &q("com.example.Widget"));
    }
}
