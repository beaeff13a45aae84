//! Character classifier for streamed source text.
//!
//! [`SourceParser`] is a pure state machine over [`ParserState`]. It consumes exactly one character per
//! call and reports what that character *is* lexically, so that structural characters inside string or
//! char literals and comments are never mistaken for block boundaries.
//!
//! ## Parser state diagram (simplified)
//!
//! ```text
//! Normal ──'/'──▶ Slash ──'/'──▶ LineComment ──'\n'──▶ Normal
//!                   └────'*'──▶ BlockComment ──'*'──▶ BlockCommentStar ──'/'──▶ Normal
//! Normal ──'"'──▶ StringLiteral ──'\\'──▶ Escaped(String) ──any──▶ StringLiteral ──'"'──▶ Normal
//! Normal ──'\''─▶ CharLiteral   ──'\\'──▶ Escaped(Char)   ──any──▶ CharLiteral   ──'\''─▶ Normal
//! ```
//!
//! ## Notes
//! - Any character is legal; unterminated literals and comments are tolerated until end of input.
//! - Placeholder sentinels are recognized in every state and leave the lexical state untouched.
//! - A closing sentinel with no open placeholder is still reported as `PlaceholderEnd`; the block handler
//!   rejects it.

use super::placeholder::{PLACEHOLDER_END, PLACEHOLDER_START};

/// Which kind of literal an escape sequence returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    String,
    Char,
}

/// Lexical state carried between characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    #[default]
    Normal,
    /// Saw `/` in code; the next character decides whether a comment starts.
    Slash,
    LineComment,
    BlockComment,
    /// Saw `*` inside a block comment; `/` would close it.
    BlockCommentStar,
    StringLiteral,
    CharLiteral,
    /// Saw `\` inside a literal; exactly one character is consumed before resuming.
    Escaped(Literal),
}

/// The lexical region a plain character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Code,
    Literal,
    Comment,
}

/// One classified character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalEvent {
    Text { ch: char, context: Context },
    BlockOpen,
    BlockClose,
    /// Opens a type placeholder; `context` is the region the placeholder sits in.
    PlaceholderStart { context: Context },
    PlaceholderChar(char),
    PlaceholderEnd,
}

/// Classify streamed characters into [`LexicalEvent`]s.
#[derive(Debug, Default)]
pub struct SourceParser {
    state: ParserState,
    in_placeholder: bool,
}

impl SourceParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Classify the next character and advance the state machine.
    pub fn classify(&mut self, c: char) -> LexicalEvent {
        if self.in_placeholder {
            if c == PLACEHOLDER_END {
                self.in_placeholder = false;
                return LexicalEvent::PlaceholderEnd;
            }
            return LexicalEvent::PlaceholderChar(c);
        }
        if c == PLACEHOLDER_START {
            self.in_placeholder = true;
            self.settle();
            return LexicalEvent::PlaceholderStart { context: self.context() };
        }
        if c == PLACEHOLDER_END {
            return LexicalEvent::PlaceholderEnd;
        }

        match self.state {
            ParserState::Normal => self.code(c),
            ParserState::Slash => match c {
                '/' => self.enter(ParserState::LineComment, c, Context::Comment),
                '*' => self.enter(ParserState::BlockComment, c, Context::Comment),
                _ => {
                    self.state = ParserState::Normal;
                    self.code(c)
                }
            },
            ParserState::LineComment => {
                if c == '\n' {
                    self.enter(ParserState::Normal, c, Context::Code)
                } else {
                    comment(c)
                }
            }
            ParserState::BlockComment => {
                if c == '*' {
                    self.state = ParserState::BlockCommentStar;
                }
                comment(c)
            }
            ParserState::BlockCommentStar => {
                self.state = match c {
                    '/' => ParserState::Normal,
                    '*' => ParserState::BlockCommentStar,
                    _ => ParserState::BlockComment,
                };
                comment(c)
            }
            ParserState::StringLiteral => self.literal(c, Literal::String),
            ParserState::CharLiteral => self.literal(c, Literal::Char),
            ParserState::Escaped(resume) => {
                self.state = match resume {
                    Literal::String => ParserState::StringLiteral,
                    Literal::Char => ParserState::CharLiteral,
                };
                literal(c)
            }
        }
    }

    /// The region the current state belongs to.
    pub fn context(&self) -> Context {
        match self.state {
            ParserState::Normal | ParserState::Slash => Context::Code,
            ParserState::LineComment | ParserState::BlockComment | ParserState::BlockCommentStar => Context::Comment,
            ParserState::StringLiteral | ParserState::CharLiteral | ParserState::Escaped(_) => Context::Literal,
        }
    }

    fn code(&mut self, c: char) -> LexicalEvent {
        match c {
            '{' => LexicalEvent::BlockOpen,
            '}' => LexicalEvent::BlockClose,
            '/' => self.enter(ParserState::Slash, c, Context::Code),
            '"' => self.enter(ParserState::StringLiteral, c, Context::Literal),
            '\'' => self.enter(ParserState::CharLiteral, c, Context::Literal),
            _ => LexicalEvent::Text { ch: c, context: Context::Code },
        }
    }

    fn literal(&mut self, c: char, kind: Literal) -> LexicalEvent {
        let close = match kind {
            Literal::String => '"',
            Literal::Char => '\'',
        };
        if c == '\\' {
            self.state = ParserState::Escaped(kind);
        } else if c == close {
            self.state = ParserState::Normal;
        }
        literal(c)
    }

    fn enter(&mut self, state: ParserState, c: char, context: Context) -> LexicalEvent {
        self.state = state;
        LexicalEvent::Text { ch: c, context }
    }

    /// Resolve transient lookahead states before a placeholder interrupts them.
    fn settle(&mut self) {
        self.state = match self.state {
            ParserState::Slash => ParserState::Normal,
            ParserState::BlockCommentStar => ParserState::BlockComment,
            other => other,
        };
    }
}

fn comment(c: char) -> LexicalEvent {
    LexicalEvent::Text { ch: c, context: Context::Comment }
}

fn literal(c: char) -> LexicalEvent {
    LexicalEvent::Text { ch: c, context: Context::Literal }
}
