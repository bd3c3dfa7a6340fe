use serde::{Deserialize, Serialize};

use super::{Comment, CommentKind};
use crate::{
    core::marks::{CommentMarks, MarkMatch, MarkPattern},
    utils::{char_len, char_offset},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkKind {
    Line,
    BlockStart,
    BlockEnd,
}

/// A block comment whose end mark has not been seen yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenBlock {
    pub start_line: usize,
    /// 1-based column right after the opening mark.
    pub start_col: usize,
    /// Byte offset right after the opening mark, within the start line.
    pub start_offset: usize,
    pub content: Vec<String>,
}

impl OpenBlock {
    fn close(self, end_line: usize, end_col: usize) -> Comment {
        Comment {
            kind: CommentKind::Block,
            start_line: self.start_line,
            start_col: self.start_col,
            end_line,
            end_col,
            content: self.content,
        }
    }
}

/// Extractor state between two physical lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtractorState {
    #[default]
    Idle,
    InBlock(OpenBlock),
}

impl ExtractorState {
    /// Consume one physical line (`line_no` is 1-based, `line` has no line ending).
    ///
    /// Returns the comments completed on this line, in the order their
    /// closing event happened, and the state for the next line.
    pub fn step(
        self,
        line_no: usize,
        line: &str,
        marks: &CommentMarks,
    ) -> (Vec<Comment>, ExtractorState) {
        let mut state = self;
        let mut comments = Vec::new();
        // Set when a block start or end was applied on this line.
        let mut block_event = false;

        for (kind, mark) in find_line_marks(line, marks) {
            match kind {
                MarkKind::Line => {
                    // Block comments swallow line marks.
                    if matches!(state, ExtractorState::Idle) {
                        comments.push(Comment {
                            kind: CommentKind::Line,
                            start_line: line_no,
                            start_col: char_offset(line, mark.end) + 1,
                            end_line: line_no,
                            end_col: char_len(line),
                            content: vec![line[mark.end..].to_string()],
                        });
                    }
                }
                MarkKind::BlockStart => {
                    // No nesting: the first opening mark wins.
                    if matches!(state, ExtractorState::Idle) {
                        state = ExtractorState::InBlock(OpenBlock {
                            start_line: line_no,
                            start_col: char_offset(line, mark.end) + 1,
                            start_offset: mark.end,
                            content: vec![line[mark.end..].to_string()],
                        });
                        block_event = true;
                    }
                }
                MarkKind::BlockEnd => {
                    let ExtractorState::InBlock(open) = &mut state else {
                        continue;
                    };
                    if open.start_line == line_no {
                        // An end mark overlapping the opening mark is the opening
                        // mark itself (symmetric delimiters such as `"""`).
                        if mark.start < open.start_offset {
                            continue;
                        }
                        open.content[0] = line[open.start_offset..mark.start].to_string();
                    } else {
                        open.content.push(line[..mark.start].to_string());
                    }
                    if let ExtractorState::InBlock(open) = std::mem::take(&mut state) {
                        comments.push(open.close(line_no, char_offset(line, mark.start)));
                    }
                    block_event = true;
                }
            }
        }

        if !block_event && let ExtractorState::InBlock(open) = &mut state {
            open.content.push(line.to_string());
        }

        (comments, state)
    }
}

/// All marks on `line`, ordered by position. Ties keep line, start, end order.
fn find_line_marks(line: &str, marks: &CommentMarks) -> Vec<(MarkKind, MarkMatch)> {
    let patterns: [(MarkKind, Option<&dyn MarkPattern>); 3] = [
        (MarkKind::Line, marks.line()),
        (MarkKind::BlockStart, marks.block_start()),
        (MarkKind::BlockEnd, marks.block_end()),
    ];
    let mut found: Vec<(MarkKind, MarkMatch)> = patterns
        .into_iter()
        .filter_map(|(kind, pattern)| pattern.map(|p| (kind, p)))
        .flat_map(|(kind, pattern)| pattern.find_marks(line).into_iter().map(move |m| (kind, m)))
        .collect();

    found.sort_by_key(|(_, m)| m.start);
    found
}
