//! Token types shared by the source lexer, the indentation tokenizer and its consumers.
//!
//! Token Layers
//!
//!     Raw Tokens:
//!         Produced by an upstream lexer. They carry the upstream kind, the source text and the
//!         position of the first character. The tokenizer never modifies them, it only decides
//!         which synthetic tokens go in front of them.
//!
//!     Synthetic Tokens:
//!         Tokens that are not in the source at all. BlockStart and BlockEnd play the role of
//!         open/close braces, StatementBreak the role of a separator between siblings. They
//!         carry the position of the raw token that triggered them (or of the last token seen,
//!         for end-of-stream unwinding) so diagnostics can still point somewhere useful.

use serde::Serialize;
use std::fmt;

/// A token as delivered by the upstream lexer.
///
/// `line` is 1-based. `column` is whatever convention the upstream lexer uses, as long as it is
/// consistent within one stream; the bundled [source](crate::denter::source) lexer uses 0-based
/// display columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RawToken<K> {
    pub kind: K,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl<K> RawToken<K> {
    pub fn new(kind: K, text: impl Into<String>, line: usize, column: usize) -> Self {
        RawToken {
            kind,
            text: text.into(),
            line,
            column,
        }
    }
}

/// The three structural markers the tokenizer can insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyntheticKind {
    BlockStart,
    BlockEnd,
    StatementBreak,
}

impl SyntheticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyntheticKind::BlockStart => "block-start",
            SyntheticKind::BlockEnd => "block-end",
            SyntheticKind::StatementBreak => "statement-break",
        }
    }
}

impl fmt::Display for SyntheticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token in the block-structured output stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutputToken<K> {
    /// A raw token passed through unchanged
    Raw(RawToken<K>),
    /// A marker inserted by the tokenizer
    Synthetic {
        kind: SyntheticKind,
        line: usize,
        column: usize,
    },
}

impl<K> OutputToken<K> {
    pub fn synthetic(kind: SyntheticKind, line: usize, column: usize) -> Self {
        OutputToken::Synthetic { kind, line, column }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, OutputToken::Synthetic { .. })
    }

    pub fn is_kind(&self, kind: SyntheticKind) -> bool {
        self.synthetic_kind() == Some(kind)
    }

    /// The raw token, if this is a pass-through
    pub fn raw(&self) -> Option<&RawToken<K>> {
        match self {
            OutputToken::Raw(token) => Some(token),
            OutputToken::Synthetic { .. } => None,
        }
    }

    pub fn into_raw(self) -> Option<RawToken<K>> {
        match self {
            OutputToken::Raw(token) => Some(token),
            OutputToken::Synthetic { .. } => None,
        }
    }

    pub fn synthetic_kind(&self) -> Option<SyntheticKind> {
        match self {
            OutputToken::Raw(_) => None,
            OutputToken::Synthetic { kind, .. } => Some(*kind),
        }
    }

    pub fn line(&self) -> usize {
        match self {
            OutputToken::Raw(token) => token.line,
            OutputToken::Synthetic { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            OutputToken::Raw(token) => token.column,
            OutputToken::Synthetic { column, .. } => *column,
        }
    }
}

impl<K> From<RawToken<K>> for OutputToken<K> {
    fn from(token: RawToken<K>) -> Self {
        OutputToken::Raw(token)
    }
}

/// Simple tag format: `<kind:text>` for raw tokens, `<block-start>` etc. for synthetic ones.
impl<K: fmt::Display> fmt::Display for RawToken<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}:{}>", self.kind, self.text)
    }
}

impl<K: fmt::Display> fmt::Display for OutputToken<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputToken::Raw(token) => write!(f, "{}", token),
            OutputToken::Synthetic { kind, .. } => write!(f, "<{}>", kind),
        }
    }
}
