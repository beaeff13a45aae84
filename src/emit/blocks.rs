//! Block tracking and text accumulation.
//!
//! [`BlockHandler`] owns the output buffer, the open-block stack and the unit's [`Scope`]. It reacts to the
//! [`LexicalEvent`]s produced by the source parser:
//! - `{` in code pushes a [`BlockFrame`], `}` in code pops one (an empty stack is a fatal error),
//! - type placeholders are replaced by their shortened spelling,
//! - everything else is appended verbatim.
//!
//! ## Notes
//! - The buffer is append-only. Placeholder payloads are collected aside and never enter the buffer.
//! - A brace block opened right after `class Name` (or `interface`/`enum`/`record`) is a type body; the
//!   declared member type claims its simple name in the scope, first writer wins.
//! - A declared type shadows same-named types inside its own body and the body of its enclosing type.
//!   While such a body is open, references to any other type with that simple name are spelled fully
//!   qualified, even when the scope handed the simple name to that other type earlier.
//! - After the first error the handler is poisoned and refuses further events.

use unitgen_core::QualifiedName;
use unitgen_core::lang::java_keywords;

use super::errors::{EmitError, EmitResult};
use super::parser::{Context, LexicalEvent};
use super::placeholder;
use super::scope::Scope;
use super::shortener::TypeShortener;

/// What an open brace block belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// The body of a declared type.
    Type(QualifiedName),
    /// Any other brace block (method bodies, initializers, anonymous classes, array initializers, ...).
    Code,
}

/// One level of open structural nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFrame {
    pub kind: BlockKind,
    /// Nesting depth of this frame, 1 for a top-level block.
    pub indent_depth: usize,
}

/// Owns the buffer and the open-block stack of one compilation unit.
#[derive(Debug)]
pub struct BlockHandler {
    buffer: String,
    frames: Vec<BlockFrame>,
    scope: Scope,
    shortener: TypeShortener,
    package: Vec<String>,
    declarations: DeclarationTracker,
    /// Declared types with the frame depth down to which they stay visible.
    shadows: Vec<(usize, QualifiedName)>,
    /// Payload of the placeholder being collected, with the region it sits in.
    placeholder: Option<(String, Context)>,
    poisoned_at: Option<usize>,
}

impl BlockHandler {
    /// Create a handler over a pre-seeded scope for a unit in `package`.
    pub fn new(scope: Scope, package: &[String]) -> Self {
        Self {
            buffer: String::new(),
            frames: Vec::new(),
            scope,
            shortener: TypeShortener::new(),
            package: package.to_vec(),
            declarations: DeclarationTracker::default(),
            shadows: Vec::new(),
            placeholder: None,
            poisoned_at: None,
        }
    }

    /// Append known-safe text without classification (the file preamble).
    pub(crate) fn push_unparsed(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// React to one classified character.
    pub fn handle(&mut self, event: LexicalEvent) -> EmitResult<()> {
        if let Some(offset) = self.poisoned_at {
            return Err(EmitError::Poisoned { offset });
        }
        let result = self.dispatch(event);
        if result.is_err() {
            self.poisoned_at = Some(self.buffer.len());
        }
        result
    }

    fn dispatch(&mut self, event: LexicalEvent) -> EmitResult<()> {
        match event {
            LexicalEvent::BlockOpen => {
                self.buffer.push('{');
                self.open_block();
            }
            LexicalEvent::BlockClose => {
                let at = self.buffer.len();
                self.buffer.push('}');
                self.declarations.close();
                if self.frames.pop().is_none() {
                    return Err(EmitError::UnbalancedClose {
                        unit: self.buffer.clone(),
                        at: (at, 1).into(),
                    });
                }
                let depth = self.frames.len();
                self.shadows.retain(|(visible_to, _)| *visible_to <= depth);
            }
            LexicalEvent::Text { ch, context } => {
                match context {
                    Context::Code => self.declarations.feed(ch),
                    Context::Literal | Context::Comment => self.declarations.interrupt(),
                }
                self.buffer.push(ch);
            }
            LexicalEvent::PlaceholderStart { context } => {
                self.declarations.interrupt();
                self.placeholder = Some((String::new(), context));
            }
            LexicalEvent::PlaceholderChar(c) => match &mut self.placeholder {
                Some((payload, _)) => payload.push(c),
                None => self.buffer.push(c),
            },
            LexicalEvent::PlaceholderEnd => {
                let Some((payload, context)) = self.placeholder.take() else {
                    return Err(EmitError::StrayPlaceholderEnd {
                        offset: self.buffer.len(),
                    });
                };
                let name = placeholder::decode(&payload)?;
                let spelling = self.shorten(&name);
                if context == Context::Code {
                    self.declarations.word(&spelling);
                }
                self.buffer.push_str(&spelling);
            }
        }
        Ok(())
    }

    fn open_block(&mut self) {
        let indent_depth = self.frames.len() + 1;
        let kind = match self.declarations.open() {
            Some(simple_name) => self.declare_type(&simple_name),
            None => BlockKind::Code,
        };
        self.frames.push(BlockFrame { kind, indent_depth });
    }

    fn declare_type(&mut self, simple_name: &str) -> BlockKind {
        let declared = match self.enclosing_type() {
            Some(outer) => outer.nested_type(simple_name),
            None => QualifiedName::new(self.package.clone(), [simple_name]),
        };
        let Ok(declared) = declared else {
            return BlockKind::Code;
        };
        // Only member types are visible unit-wide; local classes stay out of the scope.
        let is_member = self.frames.iter().all(|f| matches!(f.kind, BlockKind::Type(_)));
        if is_member && !self.scope.declare(&declared) {
            tracing::debug!(name = %declared, "declared type's simple name already taken");
        }
        self.shadows.push((self.frames.len(), declared.clone()));
        BlockKind::Type(declared)
    }

    /// Spell `name` with the live scope, claiming its simple name when free.
    pub fn shorten(&mut self, name: &QualifiedName) -> String {
        if let Some(shadow) = self.shadowing(name) {
            tracing::debug!(name = %name, shadow = %shadow, "simple name shadowed by a declared type");
            return name.to_string();
        }
        self.shortener.shorten(name, &mut self.scope).into_owned()
    }

    /// A visible declared type other than `name` that owns `name`'s simple name.
    fn shadowing(&self, name: &QualifiedName) -> Option<&QualifiedName> {
        self.shadows
            .iter()
            .map(|(_, declared)| declared)
            .find(|declared| declared.simple_name() == name.simple_name() && *declared != name)
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn type_shortener(&self) -> &TypeShortener {
        &self.shortener
    }

    /// Open blocks, innermost last.
    pub fn frames(&self) -> &[BlockFrame] {
        &self.frames
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The innermost type whose body is open.
    pub fn enclosing_type(&self) -> Option<&QualifiedName> {
        self.frames.iter().rev().find_map(|frame| match &frame.kind {
            BlockKind::Type(name) => Some(name),
            BlockKind::Code => None,
        })
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned_at.is_some()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl std::fmt::Display for BlockHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.buffer)
    }
}

/// Where a type declaration stands in the current statement.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
enum PendingDecl {
    #[default]
    None,
    /// Saw `class`/`interface`/`enum`/`record`.
    Keyword,
    /// Saw the keyword and the declared name; waiting for `{`.
    Named(String),
}

/// Watches identifier words in code to name the next brace block.
#[derive(Debug, Default)]
struct DeclarationTracker {
    word: String,
    word_after_dot: bool,
    last_code: Option<char>,
    pending: PendingDecl,
}

impl DeclarationTracker {
    fn feed(&mut self, c: char) {
        let continues_word = if self.word.is_empty() {
            java_keywords::is_identifier_start(c)
        } else {
            java_keywords::is_identifier_part(c)
        };
        if continues_word {
            if self.word.is_empty() {
                self.word_after_dot = self.last_code == Some('.');
            }
            self.word.push(c);
        } else {
            self.end_word();
            // A declared name follows its keyword directly; `record(`, `record =` are plain identifiers.
            // `/` may open a comment between the keyword and the name.
            let after_keyword = self.pending == PendingDecl::Keyword && !c.is_whitespace() && c != '/';
            if c == ';' || after_keyword {
                self.pending = PendingDecl::None;
            }
        }
        if !c.is_whitespace() {
            self.last_code = Some(c);
        }
    }

    /// A whole word arriving at once (a shortened placeholder).
    fn word(&mut self, spelling: &str) {
        self.end_word();
        if java_keywords::is_identifier(spelling) {
            self.word_after_dot = self.last_code == Some('.');
            self.word.push_str(spelling);
            self.end_word();
        }
        self.last_code = spelling.chars().last().or(self.last_code);
    }

    fn interrupt(&mut self) {
        self.end_word();
    }

    fn open(&mut self) -> Option<String> {
        self.end_word();
        self.last_code = Some('{');
        match std::mem::take(&mut self.pending) {
            PendingDecl::Named(name) => Some(name),
            _ => None,
        }
    }

    fn close(&mut self) {
        self.end_word();
        self.last_code = Some('}');
        self.pending = PendingDecl::None;
    }

    fn end_word(&mut self) {
        if self.word.is_empty() {
            return;
        }
        let word = std::mem::take(&mut self.word);
        // `Foo.class` is a class literal, not a declaration.
        if self.word_after_dot {
            return;
        }
        if java_keywords::is_type_declaration(&word) {
            self.pending = PendingDecl::Keyword;
        } else if self.pending == PendingDecl::Keyword {
            self.pending = if java_keywords::is_identifier(&word) {
                PendingDecl::Named(word)
            } else {
                PendingDecl::None
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::parser::SourceParser;

    fn q(s: &str) -> QualifiedName {
        s.parse().unwrap()
    }

    fn handler() -> BlockHandler {
        BlockHandler::new(Scope::new(), &["com".to_string(), "example".to_string()])
    }

    fn feed(handler: &mut BlockHandler, text: &str) -> EmitResult<()> {
        let mut parser = SourceParser::new();
        for c in text.chars() {
            handler.handle(parser.classify(c))?;
        }
        Ok(())
    }

    #[test]
    fn test_frames_track_nesting() {
        let mut blocks = handler();
        feed(&mut blocks, "class Widget { void f() { if (x) {").unwrap();
        assert_eq!(blocks.depth(), 3);
        let depths: Vec<usize> = blocks.frames().iter().map(|f| f.indent_depth).collect();
        assert_eq!(depths, vec![1, 2, 3]);
        feed(&mut blocks, "} } }").unwrap();
        assert_eq!(blocks.depth(), 0);
        assert_eq!(blocks.as_str(), "class Widget { void f() { if (x) {} } }");
    }

    #[test]
    fn test_unbalanced_close_poisons() {
        let mut blocks = handler();
        feed(&mut blocks, "{ }").unwrap();
        let err = feed(&mut blocks, "}").unwrap_err();
        assert!(matches!(err, EmitError::UnbalancedClose { .. }));
        assert!(blocks.is_poisoned());
        assert!(matches!(feed(&mut blocks, "x"), Err(EmitError::Poisoned { .. })));
    }

    #[test]
    fn test_type_bodies_are_named() {
        let mut blocks = handler();
        feed(&mut blocks, "public final class Widget<T> extends Base implements Api {\n").unwrap();
        feed(&mut blocks, "  static class Builder {").unwrap();
        assert_eq!(blocks.enclosing_type(), Some(&q("com.example.Widget.Builder")));
        assert_eq!(blocks.scope().binding("Builder").unwrap().owner, q("com.example.Widget.Builder"));
        feed(&mut blocks, " void build() {").unwrap();
        assert_eq!(blocks.frames().last().unwrap().kind, BlockKind::Code);
        assert_eq!(blocks.enclosing_type(), Some(&q("com.example.Widget.Builder")));
    }

    #[test]
    fn test_class_literal_is_not_a_declaration() {
        let mut blocks = handler();
        feed(&mut blocks, "if (type == Widget.class) {").unwrap();
        assert_eq!(blocks.frames()[0].kind, BlockKind::Code);
    }

    #[test]
    fn test_keywords_in_comments_are_ignored() {
        let mut blocks = handler();
        feed(&mut blocks, "/* class Fake */ void f() {").unwrap();
        assert_eq!(blocks.frames()[0].kind, BlockKind::Code);
        assert!(!blocks.scope().is_claimed("Fake"));
    }

    #[test]
    fn test_local_class_is_not_claimed() {
        let mut blocks = handler();
        feed(&mut blocks, "class Widget { void f() { class Local {").unwrap();
        assert_eq!(blocks.enclosing_type(), Some(&q("com.example.Widget.Local")));
        assert!(!blocks.scope().is_claimed("Local"));
    }

    #[test]
    fn test_placeholder_is_replaced() {
        let mut blocks = handler();
        let list = placeholder::encode(&q("java.util.List"));
        let awt = placeholder::encode(&q("java.awt.List"));
        feed(&mut blocks, &format!("{list} a; {awt} b; {list} c;")).unwrap();
        assert_eq!(blocks.as_str(), "List a; java.awt.List b; List c;");
    }

    #[test]
    fn test_placeholder_names_type_body() {
        let mut blocks = handler();
        let widget = placeholder::encode(&q("com.example.Widget"));
        feed(&mut blocks, &format!("class {widget} {{")).unwrap();
        assert_eq!(blocks.enclosing_type(), Some(&q("com.example.Widget")));
    }

    #[test]
    fn test_record_as_method_name_is_not_a_declaration() {
        let mut blocks = handler();
        let item = placeholder::encode(&q("com.example.Item"));
        feed(&mut blocks, &format!("class Widget {{\n  void record({item} item) {{")).unwrap();
        assert_eq!(blocks.frames()[1].kind, BlockKind::Code);
        assert_eq!(blocks.scope().binding("Item").unwrap().owner, q("com.example.Item"));
        assert!(!blocks.scope().is_claimed("item"));
    }

    #[test]
    fn test_record_as_variable_name_is_not_a_declaration() {
        let mut blocks = handler();
        feed(&mut blocks, "class Widget {\n  void f() {\n    Item record = next(); if (record.ok()) {").unwrap();
        assert_eq!(blocks.frames()[2].kind, BlockKind::Code);
        feed(&mut blocks, " log(record); }\n    record(x); if (y) {").unwrap();
        assert_eq!(blocks.frames()[2].kind, BlockKind::Code);
        assert_eq!(blocks.scope().len(), 1);
    }

    #[test]
    fn test_record_declaration_is_named() {
        let mut blocks = handler();
        feed(&mut blocks, "class Widget {\n  record Point(int x, int y) implements Shape {").unwrap();
        assert_eq!(blocks.enclosing_type(), Some(&q("com.example.Widget.Point")));
        assert!(blocks.scope().is_claimed("Point"));
    }

    #[test]
    fn test_comment_between_keyword_and_name() {
        let mut blocks = handler();
        feed(&mut blocks, "class /* generated */ Widget {").unwrap();
        assert_eq!(blocks.enclosing_type(), Some(&q("com.example.Widget")));
    }

    #[test]
    fn test_member_type_shadows_earlier_claim() {
        let mut blocks = handler();
        let list = placeholder::encode(&q("java.util.List"));
        feed(&mut blocks, &format!("class Widget {{ {list} a;\n  static class List {{ {list} b; }}\n")).unwrap();
        assert!(blocks.as_str().ends_with("static class List { java.util.List b; }\n"));
        feed(&mut blocks, &format!("}}\nclass Other {{ {list} c; }}")).unwrap();
        assert!(blocks.as_str().ends_with("class Other { List c; }"));
    }

    #[test]
    fn test_shadow_is_scoped_to_enclosing_body() {
        let mut blocks = handler();
        let entry = placeholder::encode(&q("java.util.Map.Entry"));
        feed(&mut blocks, &format!("class Widget {{ class Entry {{}} {entry} a; }}\n{entry} b;")).unwrap();
        assert_eq!(
            blocks.as_str(),
            "class Widget { class Entry {} java.util.Map.Entry a; }\njava.util.Map.Entry b;"
        );
    }

    #[test]
    fn test_stray_placeholder_end() {
        let mut blocks = handler();
        let err = feed(&mut blocks, "int x;\u{E001}").unwrap_err();
        assert!(matches!(err, EmitError::StrayPlaceholderEnd { offset: 6 }));
        assert!(!blocks.as_str().contains('\u{E001}'));
        assert!(blocks.is_poisoned());
    }

    #[test]
    fn test_malformed_placeholder() {
        let mut blocks = handler();
        let err = feed(&mut blocks, "\u{E000}lower.case\u{E001}").unwrap_err();
        assert!(matches!(err, EmitError::MalformedPlaceholder { .. }));
    }
}
