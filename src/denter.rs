//! Main module for denter library functionality
//!
//! Indentation Handling
//!
//!     Indentation-sensitive syntaxes are awkward for regular parsers: the structure lives in
//!     leading whitespace, which a conventional lexer throws away. The approach here is to keep
//!     the lexer vanilla and recover the structure in a separate pass. The upstream lexer
//!     records where each token starts (line and column) and drops whitespace, blank lines and
//!     comments. The [tokenizer] then walks that stream with a stack of open indentation
//!     frames and emits synthetic tokens:
//!
//!         - BlockStart when a line starts right of the innermost open frame,
//!         - StatementBreak when a line starts exactly on the innermost frame,
//!         - BlockEnd for every frame closed by a line starting further left,
//!           followed by a StatementBreak separating the closed block from its sibling.
//!
//!     At the end of the stream every open frame is unwound with a BlockEnd, unless the
//!     tokenizer was told to ignore EOF (useful when feeding it line fragments).
//!
//! Pipeline
//!
//!     1. Source lexing using logos. See [source].
//!     2. Indentation post-processing. See [tokenizer].
//!     3. Consumers: the [calc] reference grammar and the [processor] output formats.

pub mod calc;
pub mod config;
pub mod error;
pub mod logging;
pub mod processor;
pub mod source;
pub mod token;
pub mod tokenizer;

#[cfg(test)]
pub mod testing;

pub use error::DenterError;
pub use source::{SourceKind, SourceOptions};
pub use token::{OutputToken, RawToken, SyntheticKind};
pub use tokenizer::{IndentTokenizer, TokenizerOptions};

/// Main lexer function: source lexing followed by the indentation transform.
///
/// Collects the whole output stream, stopping at the first error.
pub fn lex(
    source: &str,
    source_options: &SourceOptions,
    options: TokenizerOptions,
) -> Result<Vec<OutputToken<SourceKind>>, DenterError> {
    let raw_tokens = source::tokenize(source, source_options)?;
    IndentTokenizer::new(raw_tokens, options).collect()
}
