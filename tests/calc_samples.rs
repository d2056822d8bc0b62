//! Integration tests for the calculator over the sample documents in `docs/samples`
//!
//! Every sample is read through `CalcSources` so that the tests and the CLI agree on inputs.

use denter::denter::calc;
use denter::denter::processor::calc_sources::CalcSources;
use denter::denter::processor::ProcessingError;
use denter::denter::SourceOptions;
use denter::{DenterError, TokenizerOptions};
use rstest::rstest;

#[rstest]
#[case("010-add.calc", 5)]
#[case("020-sub.calc", 4)]
#[case("030-multiply.calc", 10)]
#[case("040-nested-multiply.calc", 14)]
#[case("050-nested-subtraction.calc", 7)]
#[case("060-comments-and-blank-lines.calc", 21)]
#[case("070-tabs.calc", 7)]
fn sample_evaluates(#[case] sample: &str, #[case] expected: i64) {
    let source = CalcSources::get_string(sample).unwrap();
    let value = calc::evaluate(&source, &SourceOptions::default(), TokenizerOptions::default())
        .unwrap();
    assert_eq!(value, expected);

    let processed = CalcSources::get_processed(sample, "calc-value").unwrap();
    assert_eq!(processed, format!("{}\n", expected));
}

#[test]
fn inconsistent_dedent_sample_reports_location() {
    let err = CalcSources::get_processed("080-inconsistent-dedent.calc", "calc-value").unwrap_err();
    assert_eq!(
        err,
        ProcessingError::Denter(DenterError::InconsistentDedent {
            line: 3,
            column: 2,
            frame_column: 0,
        })
    );
}

#[test]
fn unknown_operator_sample_is_rejected() {
    let err = CalcSources::get_processed("090-unknown-operator.calc", "calc-value").unwrap_err();
    assert!(matches!(
        err,
        ProcessingError::Denter(DenterError::UnknownOperator { ref operator, line: 1, column: 0 })
            if operator == "DIVIDE"
    ));
}

#[test]
fn ignore_eof_leaves_calc_blocks_unclosed() {
    let source = CalcSources::get_string("010-add.calc").unwrap();
    let options = TokenizerOptions::new().with_ignore_eof(true);
    let err = calc::evaluate(&source, &SourceOptions::default(), options).unwrap_err();
    assert!(matches!(err, DenterError::Parse(_)));
}

#[test]
fn eof_statement_break_is_accepted_by_the_grammar() {
    let source = CalcSources::get_string("050-nested-subtraction.calc").unwrap();
    let options = TokenizerOptions::new().with_eof_statement_break(true);
    let value = calc::evaluate(&source, &SourceOptions::default(), options).unwrap();
    assert_eq!(value, 7);
}

#[test]
fn nested_multiply_token_stream() {
    let processed = CalcSources::get_processed("040-nested-multiply.calc", "token-simple").unwrap();

    insta::assert_snapshot!(processed, @r"
    <word:ADD><block-start>
    <integer:2><statement-break>
    <word:MULTIPLY><block-start>
    <integer:3><statement-break>
    <integer:4><block-end>
    <block-end>
    ");
}

#[test]
fn tabs_sample_raw_tokens_use_expanded_columns() {
    let processed = CalcSources::get_processed("070-tabs.calc", "token-raw-json").unwrap();
    let tokens: serde_json::Value = serde_json::from_str(&processed).unwrap();

    let columns: Vec<u64> = tokens
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["column"].as_u64().unwrap())
        .collect();
    assert_eq!(columns, vec![0, 4, 4, 8, 8]);
}

#[test]
fn unknown_sample_is_not_found() {
    let err = CalcSources::get_string("999-missing.calc").unwrap_err();
    assert!(matches!(err, ProcessingError::FileNotFound(_)));
}
