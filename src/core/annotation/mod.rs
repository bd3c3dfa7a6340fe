//! `REQUIRE` / `SATISFIED` annotation parsing.
//!
//! Each [`Comment`] yields zero or more [`Annotation`]s:
//!
//! - Line comment: at most one, `REQUIRE` tried before `SATISFIED`.
//! - Block comment: any number. An annotation opened on one content line
//!   continues over following lines until a blank line, another annotation
//!   or the end of the comment.
//!
//! Syntax: `REQUIRE: id`, `SATISFIED: id`, optionally qualified as
//! `REQUIRE(extern): id`.

mod state;


use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use state::{BlockParserState, OpenAnnotation};

use super::extract::{Comment, CommentKind};
use crate::utils::char_offset;

static REQUIRE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bREQUIRE(?:\((?<qualifier>\w+)\))?:").unwrap());

static SATISFIED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bSATISFIED(?:\((?<qualifier>\w+)\))?:").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Require,
    Satisfied,
}

impl AnnotationKind {
    /// The keyword as written in source.
    pub fn keyword(&self) -> &'static str {
        match self {
            AnnotationKind::Require => "REQUIRE",
            AnnotationKind::Satisfied => "SATISFIED",
        }
    }

    /// The kind an annotation of this kind must be paired with.
    pub fn counterpart(&self) -> AnnotationKind {
        match self {
            AnnotationKind::Require => AnnotationKind::Satisfied,
            AnnotationKind::Satisfied => AnnotationKind::Require,
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationKind::Require => write!(f, "require"),
            AnnotationKind::Satisfied => write!(f, "satisfied"),
        }
    }
}

/// A parsed annotation with 1-based source coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub kind: AnnotationKind,
    /// Word between the parentheses, e.g. `extern` for `REQUIRE(extern):`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    pub id: String,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Annotation {
    /// Annotations with a qualifier belong to the cross-file scope.
    pub fn is_external(&self) -> bool {
        self.qualifier.is_some()
    }
}

/// Renders the annotation the way it is written, e.g. `REQUIRE(extern): x`.
impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.keyword())?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, "({})", qualifier)?;
        }
        write!(f, ": {}", self.id)
    }
}

/// A keyword match inside one line of comment text.
struct KeywordMatch {
    kind: AnnotationKind,
    qualifier: Option<String>,
    /// Byte offset right after the colon.
    end: usize,
}

/// Find the first `REQUIRE` match, else the first `SATISFIED` match.
fn find_keyword(text: &str) -> Option<KeywordMatch> {
    [
        (AnnotationKind::Require, &*REQUIRE_REGEX),
        (AnnotationKind::Satisfied, &*SATISFIED_REGEX),
    ]
    .into_iter()
    .find_map(|(kind, regex)| {
        let caps = regex.captures(text)?;
        Some(KeywordMatch {
            kind,
            qualifier: caps.name("qualifier").map(|m| m.as_str().to_string()),
            end: caps.get(0)?.end(),
        })
    })
}

/// Default cleanup for identifier text: trim, drop a leading run of `*`, trim again.
///
/// Strips the decoration of JSDoc-style block comment lines.
pub fn default_line_transform(line: &str) -> String {
    line.trim().trim_start_matches('*').trim().to_string()
}

/// Lazy annotation iterator over one comment.
pub struct Annotations<'a, F> {
    comment: &'a Comment,
    transform: F,
    // Index of the next content line to consume.
    next_line: usize,
    state: BlockParserState,
    done: bool,
}

impl<F> Iterator for Annotations<'_, F>
where
    F: Fn(&str) -> String,
{
    type Item = Annotation;

    fn next(&mut self) -> Option<Annotation> {
        if self.done {
            return None;
        }
        match self.comment.kind {
            CommentKind::Line => {
                self.done = true;
                parse_line_comment(self.comment, &self.transform)
            }
            CommentKind::Block => loop {
                let Some(text) = self.comment.content.get(self.next_line) else {
                    self.done = true;
                    let state = std::mem::take(&mut self.state);
                    let after_last = self.comment.start_line + self.next_line;
                    return state.finish(after_last);
                };
                let line_no = self.comment.start_line + self.next_line;
                self.next_line += 1;
                let (emitted, state) = std::mem::take(&mut self.state).step(
                    line_no,
                    text,
                    self.comment,
                    &self.transform,
                );
                self.state = state;
                if emitted.is_some() {
                    return emitted;
                }
            },
        }
    }
}

fn parse_line_comment(
    comment: &Comment,
    transform: &impl Fn(&str) -> String,
) -> Option<Annotation> {
    let text = comment.content.first()?;
    let found = find_keyword(text)?;
    Some(Annotation {
        kind: found.kind,
        qualifier: found.qualifier,
        id: transform(&text[found.end..]),
        start_line: comment.start_line,
        start_col: comment.start_col + char_offset(text, found.end),
        end_line: comment.end_line,
        end_col: comment.end_col,
    })
}

/// Parse annotations from `comment` with [`default_line_transform`].
pub fn parse_comment(comment: &Comment) -> Annotations<'_, fn(&str) -> String> {
    parse_comment_with(comment, default_line_transform as fn(&str) -> String)
}

/// Parse annotations from `comment`, cleaning identifier text with `transform`.
pub fn parse_comment_with<F>(comment: &Comment, transform: F) -> Annotations<'_, F>
where
    F: Fn(&str) -> String,
{
    Annotations {
        comment,
        transform,
        next_line: 0,
        state: BlockParserState::Idle,
        done: false,
    }
}
