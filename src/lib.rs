//! # denter
//!
//! Indentation-aware token post-processing.
//!
//! An upstream lexer produces a flat stream of tokens that know their line and column.
//! [`IndentTokenizer`](denter::tokenizer::IndentTokenizer) turns that stream into one where
//! block structure is explicit, inserting block-start, block-end and statement-break markers
//! that a downstream parser can treat like braces and semicolons.
//!
//! The [calc](denter::calc) module is a small prefix calculator whose grammar is driven
//! entirely by those markers; it doubles as the end-to-end check for the tokenizer.

pub mod denter;

pub use denter::{
    lex, DenterError, IndentTokenizer, OutputToken, RawToken, SyntheticKind, TokenizerOptions,
};
