use serde::{Deserialize, Serialize};

use super::{Annotation, AnnotationKind, find_keyword};
use crate::{
    core::extract::Comment,
    utils::{char_len, char_offset, is_blank_comment_line},
};

/// An annotation inside a block comment that may still continue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAnnotation {
    pub kind: AnnotationKind,
    pub qualifier: Option<String>,
    pub start_line: usize,
    pub start_col: usize,
    /// Column where the last consumed line ends.
    pub end_col: usize,
    pub id_parts: Vec<String>,
}

impl OpenAnnotation {
    fn close(self, end_line: usize) -> Annotation {
        Annotation {
            kind: self.kind,
            qualifier: self.qualifier,
            id: self.id_parts.join(" ").trim().to_string(),
            start_line: self.start_line,
            start_col: self.start_col,
            end_line,
            end_col: self.end_col,
        }
    }
}

/// Block comment parser state between two content lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockParserState {
    #[default]
    Idle,
    Open(OpenAnnotation),
}

impl BlockParserState {
    /// Consume the content line `text` found on source line `line_no` of `comment`.
    ///
    /// Returns the annotation closed by this line, if any, and the next state.
    pub fn step(
        self,
        line_no: usize,
        text: &str,
        comment: &Comment,
        transform: &impl Fn(&str) -> String,
    ) -> (Option<Annotation>, BlockParserState) {
        if is_blank_comment_line(text) {
            return (self.close_before(line_no), BlockParserState::Idle);
        }

        if let Some(found) = find_keyword(text) {
            let closed = self.close_before(line_no);
            let mut start_col = char_offset(text, found.end) + 1;
            let mut end_col = char_len(text);
            // The first content line starts right after the opening mark.
            if line_no == comment.start_line {
                start_col += comment.start_col - 1;
                end_col += comment.start_col - 1;
            }
            let open = OpenAnnotation {
                kind: found.kind,
                qualifier: found.qualifier,
                start_line: line_no,
                start_col,
                end_col,
                id_parts: vec![transform(&text[found.end..])],
            };
            return (closed, BlockParserState::Open(open));
        }

        match self {
            BlockParserState::Idle => (None, BlockParserState::Idle),
            BlockParserState::Open(mut open) => {
                open.id_parts.push(transform(text));
                open.end_col = char_len(text);
                (None, BlockParserState::Open(open))
            }
        }
    }

    /// Close whatever is still open once the content is exhausted.
    ///
    /// `after_last` is the line following the last content line.
    pub fn finish(self, after_last: usize) -> Option<Annotation> {
        self.close_before(after_last)
    }

    fn close_before(self, line_no: usize) -> Option<Annotation> {
        match self {
            BlockParserState::Idle => None,
            BlockParserState::Open(open) => Some(open.close(line_no - 1)),
        }
    }
}
