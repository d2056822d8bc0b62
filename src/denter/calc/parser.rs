//! Calculator grammar over the block-structured token stream.
//!
//! ```text
//! program   := expr STATEMENT_BREAK? EOF
//! expr      := INTEGER | operation
//! operation := WORD BLOCK_START expr STATEMENT_BREAK expr STATEMENT_BREAK? BLOCK_END
//! ```
//!
//! The optional statement breaks accept streams produced with `eof_statement_break`.

use chumsky::error::SimpleReason;
use chumsky::prelude::*;

use crate::denter::calc::Expr;
use crate::denter::error::DenterError;
use crate::denter::source::SourceKind;
use crate::denter::token::{OutputToken, RawToken, SyntheticKind};

type CalcToken = OutputToken<SourceKind>;

type ParserError = Simple<CalcToken>;

/// Helper: match a synthetic token of the given kind, ignoring its position
fn synthetic(kind: SyntheticKind) -> impl Parser<CalcToken, (), Error = ParserError> + Clone {
    filter(move |token: &CalcToken| token.is_kind(kind)).ignored()
}

/// Helper: match a raw token of the given source kind
fn raw(
    kind: SourceKind,
) -> impl Parser<CalcToken, RawToken<SourceKind>, Error = ParserError> + Clone {
    filter_map(move |span, token: CalcToken| match token {
        OutputToken::Raw(raw) if raw.kind == kind => Ok(raw),
        other => Err(Simple::expected_input_found(span, Vec::new(), Some(other))),
    })
}

fn integer() -> impl Parser<CalcToken, Expr, Error = ParserError> + Clone {
    raw(SourceKind::Integer).try_map(|token, span| {
        token
            .text
            .parse::<i64>()
            .map(|value| Expr::Int {
                value,
                line: token.line,
                column: token.column,
            })
            .map_err(|_| {
                let msg = format!("integer literal {} is out of range", token.text);
                Simple::custom(span, msg)
            })
    })
}

/// Parse a single expression
pub fn expr() -> impl Parser<CalcToken, Expr, Error = ParserError> + Clone {
    recursive(|expr| {
        let operation = raw(SourceKind::Word)
            .then_ignore(synthetic(SyntheticKind::BlockStart))
            .then(expr.clone())
            .then_ignore(synthetic(SyntheticKind::StatementBreak))
            .then(expr)
            .then_ignore(synthetic(SyntheticKind::StatementBreak).or_not())
            .then_ignore(synthetic(SyntheticKind::BlockEnd))
            .map(|((operator, lhs), rhs)| Expr::Operation {
                operator: operator.text,
                line: operator.line,
                column: operator.column,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            });

        integer().or(operation)
    })
}

/// Parse a whole program: one expression and nothing after it
pub fn program() -> impl Parser<CalcToken, Expr, Error = ParserError> + Clone {
    expr()
        .then_ignore(synthetic(SyntheticKind::StatementBreak).or_not())
        .then_ignore(end())
}

/// Parse a tokenized calculator program.
pub fn parse(tokens: Vec<CalcToken>) -> Result<Expr, DenterError> {
    program().parse(tokens.clone()).map_err(|errs| {
        let details = errs
            .iter()
            .map(|e| describe(e, &tokens))
            .collect::<Vec<_>>()
            .join("; ");
        DenterError::Parse(details)
    })
}

fn describe(err: &ParserError, tokens: &[CalcToken]) -> String {
    let location = match tokens.get(err.span().start) {
        Some(token) => format!("line {}, column {}", token.line(), token.column()),
        None => "end of input".to_string(),
    };
    if let SimpleReason::Custom(msg) = err.reason() {
        return format!("{} at {}", msg, location);
    }
    match err.found() {
        Some(token) => format!("unexpected {} at {}", token, location),
        None => format!("unexpected end of input after {}", describe_last(tokens)),
    }
}

fn describe_last(tokens: &[CalcToken]) -> String {
    match tokens.last() {
        Some(token) => format!("{} at line {}", token, token.line()),
        None => "empty input".to_string(),
    }
}
