//! Comment mark patterns.
//!
//! A mark is the literal delimiter that opens a line comment or opens/closes
//! a block comment. Languages spell marks very differently (symmetric `"""`
//! blocks, single-character `#`, anchored `^::`), so the extractor only ever
//! talks to the [`MarkPattern`] trait.

use std::{fmt, sync::Arc};

use anyhow::{Result, bail};
use regex::Regex;

/// A single mark occurrence within one physical line.
///
/// Offsets are byte offsets into the line; `end - start` is the consumed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkMatch {
    pub start: usize,
    pub end: usize,
}

/// Something that can locate comment marks in a line.
pub trait MarkPattern: fmt::Debug + Send + Sync {
    /// All non-overlapping matches in `line`, left to right.
    fn find_marks(&self, line: &str) -> Vec<MarkMatch>;
}

impl MarkPattern for Regex {
    fn find_marks(&self, line: &str) -> Vec<MarkMatch> {
        self.find_iter(line)
            .filter(|m| !m.is_empty())
            .map(|m| MarkMatch {
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }
}

/// A plain literal delimiter such as `//` or `*/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralMark(String);

impl LiteralMark {
    pub fn new(mark: impl Into<String>) -> Self {
        Self(mark.into())
    }
}

impl MarkPattern for LiteralMark {
    fn find_marks(&self, line: &str) -> Vec<MarkMatch> {
        if self.0.is_empty() {
            return Vec::new();
        }
        line.match_indices(self.0.as_str())
            .map(|(start, mark)| MarkMatch {
                start,
                end: start + mark.len(),
            })
            .collect()
    }
}

/// Shared handle to a mark pattern.
pub type SharedMark = Arc<dyn MarkPattern>;

/// Comment mark configuration for one language.
///
/// At least one of the line mark or the block mark pair is always present.
#[derive(Debug, Clone)]
pub struct CommentMarks {
    line: Option<SharedMark>,
    block: Option<(SharedMark, SharedMark)>,
}

impl CommentMarks {
    /// Build a mark configuration, rejecting one that could never match anything.
    pub fn new(line: Option<SharedMark>, block: Option<(SharedMark, SharedMark)>) -> Result<Self> {
        if line.is_none() && block.is_none() {
            bail!(
                "At least one of line comment mark pattern or block comment marks pattern should be provided"
            );
        }
        Ok(Self { line, block })
    }

    /// Line comments only.
    pub fn line_only(line: impl MarkPattern + 'static) -> Self {
        Self {
            line: Some(Arc::new(line)),
            block: None,
        }
    }

    /// Block comments only.
    pub fn block_only(start: impl MarkPattern + 'static, end: impl MarkPattern + 'static) -> Self {
        Self {
            line: None,
            block: Some((Arc::new(start), Arc::new(end))),
        }
    }

    /// Line and block comments.
    pub fn line_and_block(
        line: impl MarkPattern + 'static,
        start: impl MarkPattern + 'static,
        end: impl MarkPattern + 'static,
    ) -> Self {
        Self {
            line: Some(Arc::new(line)),
            block: Some((Arc::new(start), Arc::new(end))),
        }
    }

    /// `//` line comments and `/* */` block comments.
    pub fn c_style() -> Self {
        Self::line_and_block(
            LiteralMark::new("//"),
            LiteralMark::new("/*"),
            LiteralMark::new("*/"),
        )
    }

    pub fn line(&self) -> Option<&dyn MarkPattern> {
        self.line.as_deref()
    }

    pub fn block_start(&self) -> Option<&dyn MarkPattern> {
        self.block.as_ref().map(|(start, _)| start.as_ref())
    }

    pub fn block_end(&self) -> Option<&dyn MarkPattern> {
        self.block.as_ref().map(|(_, end)| end.as_ref())
    }
}
