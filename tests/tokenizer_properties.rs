//! Property-based tests for the indentation tokenizer
//!
//! Inputs are generated as well-formed indentation outlines: every line is at most one level
//! deeper than the previous one and dedents always land on an open level.

use denter::denter::SourceKind;
use denter::{DenterError, IndentTokenizer, OutputToken, RawToken, SyntheticKind, TokenizerOptions};
use proptest::prelude::*;

/// One generated line: its depth and the number of tokens on it
type Outline = Vec<(usize, usize)>;

fn outline_strategy() -> impl Strategy<Value = Outline> {
    prop::collection::vec((-3i32..=1, 1usize..=3), 1..40).prop_map(|steps| {
        let mut depth = 0i32;
        steps
            .into_iter()
            .enumerate()
            .map(|(idx, (delta, width))| {
                if idx > 0 {
                    depth = (depth + delta).max(0);
                }
                (depth as usize, width)
            })
            .collect()
    })
}

fn render(outline: &Outline, indent: usize) -> Vec<RawToken<SourceKind>> {
    let mut tokens = Vec::new();
    for (idx, (depth, width)) in outline.iter().enumerate() {
        let mut column = depth * indent;
        for n in 0..*width {
            let text = format!("w{}x{}", idx, n);
            let len = text.len();
            tokens.push(RawToken::new(SourceKind::Word, text, idx + 1, column));
            column += len + 1;
        }
    }
    tokens
}

fn run(
    tokens: Vec<RawToken<SourceKind>>,
    options: TokenizerOptions,
) -> Result<Vec<OutputToken<SourceKind>>, DenterError> {
    IndentTokenizer::new(tokens, options).collect()
}

fn count(tokens: &[OutputToken<SourceKind>], kind: SyntheticKind) -> usize {
    tokens.iter().filter(|t| t.is_kind(kind)).count()
}

fn increases(outline: &Outline) -> usize {
    outline
        .windows(2)
        .filter(|pair| pair[1].0 > pair[0].0)
        .count()
}

proptest! {
    #[test]
    fn block_starts_and_ends_balance(outline in outline_strategy(), indent in 1usize..=8) {
        let output = run(render(&outline, indent), TokenizerOptions::default()).unwrap();

        prop_assert_eq!(count(&output, SyntheticKind::BlockStart), increases(&outline));
        prop_assert_eq!(
            count(&output, SyntheticKind::BlockStart),
            count(&output, SyntheticKind::BlockEnd)
        );
    }

    #[test]
    fn pass_through_text_is_preserved(
        outline in outline_strategy(),
        indent in 1usize..=8,
        ignore_eof in any::<bool>(),
    ) {
        let input = render(&outline, indent);
        let expected: Vec<String> = input.iter().map(|t| t.text.clone()).collect();

        let options = TokenizerOptions::new().with_ignore_eof(ignore_eof);
        let output = run(input, options).unwrap();
        let texts: Vec<String> = output
            .into_iter()
            .filter_map(OutputToken::into_raw)
            .map(|t| t.text)
            .collect();

        prop_assert_eq!(texts, expected);
    }

    #[test]
    fn fresh_instances_agree(
        outline in outline_strategy(),
        indent in 1usize..=8,
        ignore_eof in any::<bool>(),
    ) {
        let options = TokenizerOptions::new().with_ignore_eof(ignore_eof);
        let first = run(render(&outline, indent), options);
        let second = run(render(&outline, indent), options);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn synthetic_tokens_precede_their_line(outline in outline_strategy(), indent in 1usize..=8) {
        let output = run(render(&outline, indent), TokenizerOptions::default()).unwrap();

        // Every synthetic token before the final unwind is followed by a raw token on its line
        let last_raw = output.iter().rposition(|t| !t.is_synthetic()).unwrap();
        for (idx, token) in output[..last_raw].iter().enumerate() {
            if token.is_synthetic() {
                let next_raw = output[idx..].iter().find(|t| !t.is_synthetic()).unwrap();
                prop_assert_eq!(token.line(), next_raw.line());
            }
        }
        prop_assert!(output[last_raw + 1..].iter().all(|t| t.is_kind(SyntheticKind::BlockEnd)));
    }

    #[test]
    fn ignore_eof_never_unwinds(outline in outline_strategy(), indent in 1usize..=8) {
        let options = TokenizerOptions::new().with_ignore_eof(true);
        let output = run(render(&outline, indent), options).unwrap();

        prop_assert!(!output.last().unwrap().is_synthetic());
    }

    #[test]
    fn single_line_with_ignore_eof_is_untouched(width in 1usize..=10, indent in 0usize..=12) {
        let outline = vec![(0, width)];
        let mut input = render(&outline, 1);
        for token in &mut input {
            token.column += indent;
        }
        let options = TokenizerOptions::new().with_ignore_eof(true);
        let output = run(input, options).unwrap();

        prop_assert_eq!(output.len(), width);
        prop_assert!(output.iter().all(|t| !t.is_synthetic()));
    }

    #[test]
    fn dedent_between_levels_is_rejected(outline in outline_strategy(), indent in 2usize..=8) {
        let depth = outline.last().unwrap().0;
        prop_assume!(depth > 0);

        // One column left of the innermost block: strictly between two open levels
        let column = depth * indent - 1;
        let line = outline.len() + 1;
        let mut input = render(&outline, indent);
        input.push(RawToken::new(SourceKind::Word, "bad", line, column));

        let err = run(input, TokenizerOptions::default()).unwrap_err();
        prop_assert_eq!(
            err,
            DenterError::InconsistentDedent {
                line,
                column,
                frame_column: (depth - 1) * indent,
            }
        );
    }
}

#[test]
fn instances_run_independently_across_threads() {
    // Each outline climbs from depth 0 to a different peak and back, so every stream is valid
    let outlines: Vec<Outline> = (0..8)
        .map(|n| {
            let peak = 1 + n % 4;
            (0..20)
                .map(|i| {
                    let phase = i % (2 * peak);
                    let depth = if phase <= peak { phase } else { 2 * peak - phase };
                    (depth, 1 + n % 3)
                })
                .collect()
        })
        .collect();

    let expected: Vec<_> = outlines
        .iter()
        .map(|o| run(render(o, 4), TokenizerOptions::default()))
        .collect();
    assert!(expected.iter().all(Result::is_ok));

    let actual: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = outlines
            .iter()
            .map(|o| scope.spawn(move || run(render(o, 4), TokenizerOptions::default())))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("tokenizer thread panicked"))
            .collect()
    });

    assert_eq!(actual, expected);
}
