//! Indentation-driven prefix calculator
//!
//!     A tiny language whose only structure is indentation. An operator names a block holding
//!     exactly two operands; an operand is an integer or another operator block:
//!
//!         ADD
//!             SUB
//!                 10
//!                 MULTIPLY
//!                     2
//!                     2
//!             1
//!
//!     After the source lexer and the indentation tokenizer have run, the grammar is a plain
//!     context-free one over block-start, statement-break and block-end tokens, which is the
//!     point: it exercises the whole pipeline end to end with a parser that knows nothing about
//!     whitespace.
//!
//!     Operators are `ADD`, `SUB` and `MULTIPLY`, matched case-insensitively. Unknown operator
//!     names parse fine and are rejected during evaluation.

pub mod eval;
pub mod parser;

use crate::denter::error::DenterError;
use crate::denter::source::SourceOptions;
use crate::denter::tokenizer::TokenizerOptions;
use std::fmt;

pub use parser::parse;

/// Calculator expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Int {
        value: i64,
        line: usize,
        column: usize,
    },
    Operation {
        operator: String,
        line: usize,
        column: usize,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Multiply,
}

impl Operator {
    /// Look up an operator by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Operator> {
        match name.to_ascii_lowercase().as_str() {
            "add" => Some(Operator::Add),
            "sub" => Some(Operator::Sub),
            "multiply" => Some(Operator::Multiply),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Add => "ADD",
            Operator::Sub => "SUB",
            Operator::Multiply => "MULTIPLY",
        };
        f.write_str(name)
    }
}

/// Lex, restructure, parse and evaluate a calculator program.
#[tracing::instrument(level = "debug", skip(source))]
pub fn evaluate(
    source: &str,
    source_options: &SourceOptions,
    options: TokenizerOptions,
) -> Result<i64, DenterError> {
    let tokens = crate::denter::lex(source, source_options, options)?;
    let expr = parse(tokens)?;
    expr.eval()
}
