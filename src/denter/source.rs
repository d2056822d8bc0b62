//! Source lexer
//!
//!     The upstream side of the tokenizer: turns source text into positioned raw tokens using
//!     the logos lexer. Trivia (whitespace, line breaks, `#` comments) is consumed here and never
//!     reaches the indentation tokenizer, which means blank lines and comment-only lines cannot
//!     cause spurious block changes.
//!
//! Column Convention
//!
//!     Lines are 1-based, columns are 0-based display columns. A tab advances to the next
//!     multiple of `tab_width`; every other character counts as one column. The tokenizer only
//!     ever compares columns, so as long as one convention is used for the whole stream, mixed
//!     tabs and spaces line up the way they render.

use crate::denter::error::DenterError;
use crate::denter::token::RawToken;
use logos::Logos;
use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_TAB_WIDTH: usize = 4;

/// Kinds of structurally significant tokens the source lexer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Word,
    Integer,
    Symbol,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Word => "word",
            SourceKind::Integer => "integer",
            SourceKind::Symbol => "symbol",
        };
        f.write_str(name)
    }
}

/// Everything logos recognizes, trivia included.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum SourceToken {
    #[token("\n")]
    Newline,

    #[regex(r"[ \t\r\f]+")]
    Whitespace,

    #[regex(r"#[^\n]*")]
    Comment,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    // Any other single visible character
    #[regex(r"[^\sA-Za-z0-9_#]")]
    Symbol,
}

impl SourceToken {
    fn significant_kind(self) -> Option<SourceKind> {
        match self {
            SourceToken::Newline | SourceToken::Whitespace | SourceToken::Comment => None,
            SourceToken::Integer => Some(SourceKind::Integer),
            SourceToken::Word => Some(SourceKind::Word),
            SourceToken::Symbol => Some(SourceKind::Symbol),
        }
    }
}

/// Options for the source lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// Tab stops are placed every `tab_width` columns. Zero is treated as one.
    pub tab_width: usize,
}

impl Default for SourceOptions {
    fn default() -> Self {
        SourceOptions {
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl SourceOptions {
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }
}

/// Lazy lexer yielding only significant tokens.
///
/// Stops after the first unrecognized input, which is reported as [`DenterError::Lex`].
pub struct SourceLexer<'s> {
    inner: logos::Lexer<'s, SourceToken>,
    tab_width: usize,
    line: usize,
    column: usize,
    failed: bool,
}

impl<'s> SourceLexer<'s> {
    pub fn new(source: &'s str, options: &SourceOptions) -> Self {
        SourceLexer {
            inner: SourceToken::lexer(source),
            tab_width: options.tab_width.max(1),
            line: 1,
            column: 0,
            failed: false,
        }
    }

    /// Move the cursor over `text`, which starts at the current position.
    fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\n' => {
                    self.line += 1;
                    self.column = 0;
                }
                '\t' => self.column = (self.column / self.tab_width + 1) * self.tab_width,
                _ => self.column += 1,
            }
        }
    }
}

impl<'s> Iterator for SourceLexer<'s> {
    type Item = Result<RawToken<SourceKind>, DenterError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while let Some(result) = self.inner.next() {
            let text = self.inner.slice();
            let (line, column) = (self.line, self.column);

            let token = match result {
                Ok(token) => token,
                Err(()) => {
                    self.failed = true;
                    return Some(Err(DenterError::Lex {
                        text: text.to_string(),
                        line,
                        column,
                    }));
                }
            };

            self.advance(text);
            if let Some(kind) = token.significant_kind() {
                return Some(Ok(RawToken::new(kind, text, line, column)));
            }
        }

        None
    }
}

/// Tokenize a whole source string, dropping trivia.
pub fn tokenize(
    source: &str,
    options: &SourceOptions,
) -> Result<Vec<RawToken<SourceKind>>, DenterError> {
    SourceLexer::new(source, options).collect()
}
