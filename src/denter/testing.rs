//! Factories for building raw token streams in unit tests
//!
//! Most tokenizer tests care about lines and columns, not about source text, so instead of
//! running the source lexer they describe each line as `(column, "space separated tokens")`.

use crate::denter::error::DenterError;
use crate::denter::source::SourceKind;
use crate::denter::token::{OutputToken, RawToken};
use crate::denter::tokenizer::{IndentTokenizer, TokenizerOptions};

/// Build raw tokens, one input entry per line (lines are numbered from 1).
///
/// Words on a line are separated by a single space; integers get [`SourceKind::Integer`],
/// everything else [`SourceKind::Word`].
pub fn lines(spec: &[(usize, &str)]) -> Vec<RawToken<SourceKind>> {
    let mut tokens = Vec::new();
    for (idx, (indent, text)) in spec.iter().enumerate() {
        let mut column = *indent;
        for word in text.split(' ') {
            let kind = if word.parse::<i64>().is_ok() {
                SourceKind::Integer
            } else {
                SourceKind::Word
            };
            tokens.push(RawToken::new(kind, word, idx + 1, column));
            column += word.len() + 1;
        }
    }
    tokens
}

/// Drain a tokenizer over the given tokens.
pub fn run(
    tokens: Vec<RawToken<SourceKind>>,
    options: TokenizerOptions,
) -> Result<Vec<OutputToken<SourceKind>>, DenterError> {
    IndentTokenizer::new(tokens, options).collect()
}

/// Render tokens in the simple tag format, one string per token.
pub fn simple(tokens: &[OutputToken<SourceKind>]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
