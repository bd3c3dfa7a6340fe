//! Comment extraction.
//!
//! Turns raw source text into an ordered sequence of line and block comment
//! spans. The extractor knows nothing about the host language beyond its
//! comment marks.
//!
//! Extraction is a line-at-a-time state machine: [`ExtractorState::step`]
//! consumes one physical line and returns the comments completed on it plus
//! the next state. [`Comments`] drives it lazily over a whole source.

mod state;


use std::{collections::VecDeque, iter::Enumerate, str::Split};

use serde::{Deserialize, Serialize};

pub use state::{ExtractorState, OpenBlock};

use super::marks::CommentMarks;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    Line,
    Block,
}

/// A recognized comment with 1-based source coordinates.
///
/// For a line comment, `start_col..=end_col` brackets the text after the mark
/// and `content` holds exactly that text. For a block comment, `start_col` is
/// the column right after the opening mark, `end_col` the column right before
/// the closing mark, and `content` holds one entry per physical line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub kind: CommentKind,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
    pub content: Vec<String>,
}

/// Lazy comment iterator over one source text.
///
/// Single pass: re-run [`extract_comments`] to extract again.
pub struct Comments<'a> {
    lines: Enumerate<Split<'a, char>>,
    marks: &'a CommentMarks,
    state: ExtractorState,
    ready: VecDeque<Comment>,
}

impl<'a> Comments<'a> {
    /// Block comment still open at the current position.
    ///
    /// Once the iterator is exhausted this is the unterminated block, which
    /// is dropped rather than emitted.
    pub fn unterminated_block(&self) -> Option<&OpenBlock> {
        match &self.state {
            ExtractorState::InBlock(open) => Some(open),
            ExtractorState::Idle => None,
        }
    }
}

impl Iterator for Comments<'_> {
    type Item = Comment;

    fn next(&mut self) -> Option<Comment> {
        loop {
            if let Some(comment) = self.ready.pop_front() {
                return Some(comment);
            }
            let (idx, raw) = self.lines.next()?;
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let (comments, state) = std::mem::take(&mut self.state).step(idx + 1, line, self.marks);
            self.state = state;
            self.ready.extend(comments);
        }
    }
}

/// Extract comments from `source`, splitting lines on `\n` or `\r\n`.
pub fn extract_comments<'a>(source: &'a str, marks: &'a CommentMarks) -> Comments<'a> {
    Comments {
        lines: source.split('\n').enumerate(),
        marks,
        state: ExtractorState::Idle,
        ready: VecDeque::new(),
    }
}
