//! Indentation tokenizer
//!
//!     This transformation turns a flat stream of positioned tokens into a block-structured
//!     stream. Only the position of the first token on each line matters: it is compared with
//!     the innermost open indentation frame and the difference becomes synthetic tokens.
//!
//!     The tokenizer is pull based. Every call to [`IndentTokenizer::next_token`] either drains
//!     the pending buffer or pulls exactly one raw token from upstream, works out which
//!     synthetic tokens must precede it, queues them and the raw token, and returns the front of
//!     the queue. No lookahead is needed, so the output is produced lazily.
//!
//! Algorithm
//!
//!     1. The first raw token fixes the base frame at its column and is emitted as is.
//!     2. For the first token of every later line, compare its column with the top frame:
//!        - greater: push a frame, emit BlockStart
//!        - equal: emit StatementBreak
//!        - less: pop frames while the column is left of the top, one BlockEnd per pop.
//!          The column must then land exactly on the new top (else InconsistentDedent),
//!          and a StatementBreak separates the closed block from what follows.
//!     3. Tokens continuing a line pass through untouched.
//!     4. At end of stream, unless ignoring EOF, emit one BlockEnd per frame above the base.

use crate::denter::error::DenterError;
use crate::denter::token::{OutputToken, RawToken, SyntheticKind};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::iter::FusedIterator;
use tracing::{debug, trace, warn};

/// Construction-time options for an [`IndentTokenizer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenizerOptions {
    /// Don't do any special handling at end of stream: open blocks are not unwound and no
    /// trailing statement break is added.
    ///
    /// Useful when the tokenizer is fed line fragments, such as a single expression in a unit
    /// test, that were never meant to close their indentation.
    pub ignore_eof: bool,

    /// Emit a StatementBreak at end of stream, before the unwinding BlockEnds.
    ///
    /// Has no effect when `ignore_eof` is set or when the stream was empty.
    pub eof_statement_break: bool,
}

impl TokenizerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore_eof(mut self, ignore_eof: bool) -> Self {
        self.ignore_eof = ignore_eof;
        self
    }

    pub fn with_eof_statement_break(mut self, eof_statement_break: bool) -> Self {
        self.eof_statement_break = eof_statement_break;
        self
    }
}

/// An open indentation level: the column at which its block began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentFrame {
    pub column: usize,
}

/// Converts a stream of [`RawToken`]s into a block-structured stream of [`OutputToken`]s.
///
/// One instance handles one parse. It owns its upstream iterator, its indentation stack and
/// its pending buffer, so separate instances can run on separate threads, but a single
/// instance must not be shared between parses.
pub struct IndentTokenizer<I, K>
where
    I: Iterator<Item = RawToken<K>>,
{
    upstream: I,
    options: TokenizerOptions,
    // Empty until the first raw token establishes the base frame
    frames: Vec<IndentFrame>,
    pending: VecDeque<OutputToken<K>>,
    last_position: Option<(usize, usize)>,
    finished: bool,
}

impl<I, K> IndentTokenizer<I, K>
where
    I: Iterator<Item = RawToken<K>>,
{
    pub fn new<T>(upstream: T, options: TokenizerOptions) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        IndentTokenizer {
            upstream: upstream.into_iter(),
            options,
            frames: Vec::new(),
            pending: VecDeque::new(),
            last_position: None,
            finished: false,
        }
    }

    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Open indentation frames, outermost first. The first entry is the base frame.
    pub fn frames(&self) -> &[IndentFrame] {
        &self.frames
    }

    /// Number of currently open blocks (frames above the base).
    pub fn depth(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Produce the next output token.
    ///
    /// Returns `Ok(None)` once the stream (including any end-of-stream unwinding) is drained.
    /// An inconsistent dedent is reported on the raw token that caused it; afterwards the
    /// tokenizer is finished and only returns `Ok(None)`.
    pub fn next_token(&mut self) -> Result<Option<OutputToken<K>>, DenterError> {
        if let Some(token) = self.pending.pop_front() {
            return Ok(Some(token));
        }
        if self.finished {
            return Ok(None);
        }

        match self.upstream.next() {
            Some(token) => {
                if let Err(err) = self.accept(token) {
                    self.finished = true;
                    self.pending.clear();
                    return Err(err);
                }
            }
            None => {
                self.finished = true;
                if !self.options.ignore_eof {
                    self.unwind();
                }
            }
        }

        Ok(self.pending.pop_front())
    }

    /// Queue a raw token along with the synthetic tokens that must precede it.
    fn accept(&mut self, token: RawToken<K>) -> Result<(), DenterError> {
        let starts_line = match self.last_position {
            Some((line, _)) if token.line < line => {
                // Upstream broke line ordering; measure the token as a fresh line
                warn!(
                    line = token.line,
                    previous_line = line,
                    "raw token moves back to an earlier line"
                );
                true
            }
            Some((line, _)) => line != token.line,
            None => true,
        };
        self.last_position = Some((token.line, token.column));

        if starts_line {
            self.measure(token.line, token.column)?;
        }
        self.pending.push_back(OutputToken::Raw(token));
        Ok(())
    }

    /// Compare the first column of a new line against the indentation stack.
    fn measure(&mut self, line: usize, column: usize) -> Result<(), DenterError> {
        let top = match self.frames.last() {
            Some(frame) => frame.column,
            None => {
                trace!(line, column, "base frame established");
                self.frames.push(IndentFrame { column });
                return Ok(());
            }
        };

        match column.cmp(&top) {
            Ordering::Greater => {
                self.frames.push(IndentFrame { column });
                self.emit(SyntheticKind::BlockStart, line, column);
            }
            Ordering::Equal => {
                self.emit(SyntheticKind::StatementBreak, line, column);
            }
            Ordering::Less => {
                // The base frame is never popped
                while let [_, .., innermost] = self.frames.as_slice() {
                    if column >= innermost.column {
                        break;
                    }
                    self.frames.pop();
                    self.emit(SyntheticKind::BlockEnd, line, column);
                }

                let frame_column = self.frames.last().map_or(column, |f| f.column);
                if frame_column != column {
                    warn!(line, column, frame_column, "inconsistent dedent");
                    return Err(DenterError::InconsistentDedent {
                        line,
                        column,
                        frame_column,
                    });
                }
                self.emit(SyntheticKind::StatementBreak, line, column);
            }
        }
        Ok(())
    }

    /// Close every frame above the base at end of stream.
    fn unwind(&mut self) {
        let Some((line, column)) = self.last_position else {
            return;
        };

        debug!(depth = self.depth(), line, "unwinding indentation at end of stream");
        if self.options.eof_statement_break {
            self.emit(SyntheticKind::StatementBreak, line, column);
        }
        while self.frames.len() > 1 {
            self.frames.pop();
            self.emit(SyntheticKind::BlockEnd, line, column);
        }
    }

    fn emit(&mut self, kind: SyntheticKind, line: usize, column: usize) {
        trace!(%kind, line, column, depth = self.depth(), "synthetic token");
        self.pending.push_back(OutputToken::synthetic(kind, line, column));
    }
}

impl<I, K> Iterator for IndentTokenizer<I, K>
where
    I: Iterator<Item = RawToken<K>>,
{
    type Item = Result<OutputToken<K>, DenterError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl<I, K> FusedIterator for IndentTokenizer<I, K> where I: Iterator<Item = RawToken<K>> {}
