//! Errors raised while lexing, restructuring or evaluating a token stream

use thiserror::Error;

/// Errors that can occur in the denter pipeline.
///
/// Only [`DenterError::InconsistentDedent`] comes from the indentation tokenizer itself; the
/// other variants belong to the source lexer and the calc consumer built on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenterError {
    /// A line dedented to a column that matches no open indentation frame.
    #[error(
        "inconsistent dedent at line {line}, column {column}: \
         no open block starts at column {column} (nearest enclosing block is at column {frame_column})"
    )]
    InconsistentDedent {
        line: usize,
        column: usize,
        frame_column: usize,
    },

    #[error("unexpected input {text:?} at line {line}, column {column}")]
    Lex {
        text: String,
        line: usize,
        column: usize,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unknown operator {operator:?} at line {line}, column {column}")]
    UnknownOperator {
        operator: String,
        line: usize,
        column: usize,
    },

    #[error("integer overflow evaluating {operator:?} at line {line}, column {column}")]
    Overflow {
        operator: String,
        line: usize,
        column: usize,
    },
}

impl DenterError {
    /// Source position (line, column) the error points at, when it has one.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            DenterError::InconsistentDedent { line, column, .. }
            | DenterError::Lex { line, column, .. }
            | DenterError::UnknownOperator { line, column, .. }
            | DenterError::Overflow { line, column, .. } => Some((*line, *column)),
            DenterError::Parse(_) => None,
        }
    }
}
