//! Scope records built during reconciliation.
//!
//! - `LocalScope`: per-file, unqualified annotations, one entry per id.
//! - `ExternalScope`: per-file, qualified annotations, one map per kind.
//! - `GlobalScope`: all files' external scopes merged, one entry per id.

use std::{cmp::Ordering, collections::BTreeMap};

use serde::Serialize;

use super::annotation::{Annotation, AnnotationKind};

/// An annotation together with the file it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnnotation {
    pub file_path: String,
    pub annotation: Annotation,
    /// The source line the annotation starts on, for display.
    pub source_line: String,
}

impl FileAnnotation {
    pub fn new(
        file_path: impl Into<String>,
        annotation: Annotation,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            annotation,
            source_line: source_line.into(),
        }
    }

    // Convenience accessors
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn line(&self) -> usize {
        self.annotation.start_line
    }

    pub fn col(&self) -> usize {
        self.annotation.start_col
    }

    pub fn kind(&self) -> AnnotationKind {
        self.annotation.kind
    }

    pub fn id(&self) -> &str {
        &self.annotation.id
    }

    /// `file:line:col` of the annotation start.
    pub fn location(&self) -> String {
        format!("{}:{}:{}", self.file_path, self.line(), self.col())
    }

    /// Order by file path, then start line, then start column.
    pub fn cmp_position(&self, other: &Self) -> Ordering {
        self.file_path
            .cmp(&other.file_path)
            .then_with(|| self.line().cmp(&other.line()))
            .then_with(|| self.col().cmp(&other.col()))
    }
}

/// First-seen require and satisfied annotations for one id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScopeEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require: Option<FileAnnotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satisfied: Option<FileAnnotation>,
}

impl ScopeEntry {
    pub fn get(&self, kind: AnnotationKind) -> Option<&FileAnnotation> {
        match kind {
            AnnotationKind::Require => self.require.as_ref(),
            AnnotationKind::Satisfied => self.satisfied.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, kind: AnnotationKind) -> &mut Option<FileAnnotation> {
        match kind {
            AnnotationKind::Require => &mut self.require,
            AnnotationKind::Satisfied => &mut self.satisfied,
        }
    }

    pub fn is_paired(&self) -> bool {
        self.require.is_some() && self.satisfied.is_some()
    }

    /// The only annotation present, if exactly one kind is present.
    pub fn unpaired(&self) -> Option<&FileAnnotation> {
        match (&self.require, &self.satisfied) {
            (Some(require), None) => Some(require),
            (None, Some(satisfied)) => Some(satisfied),
            _ => None,
        }
    }
}

/// Unqualified annotations of one file, keyed by id.
pub type LocalScope = BTreeMap<String, ScopeEntry>;

/// Qualified annotations across all files, keyed by id.
pub type GlobalScope = BTreeMap<String, ScopeEntry>;

/// Qualified annotations of one file. Each kind is kept separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExternalScope {
    pub require: BTreeMap<String, FileAnnotation>,
    pub satisfied: BTreeMap<String, FileAnnotation>,
}

impl ExternalScope {
    pub fn get(&self, kind: AnnotationKind) -> &BTreeMap<String, FileAnnotation> {
        match kind {
            AnnotationKind::Require => &self.require,
            AnnotationKind::Satisfied => &self.satisfied,
        }
    }

    pub(crate) fn get_mut(
        &mut self,
        kind: AnnotationKind,
    ) -> &mut BTreeMap<String, FileAnnotation> {
        match kind {
            AnnotationKind::Require => &mut self.require,
            AnnotationKind::Satisfied => &mut self.satisfied,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.require.is_empty() && self.satisfied.is_empty()
    }
}

/// Annotation counts of one file, for verbose output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeStats {
    pub local_require: usize,
    pub local_satisfied: usize,
    pub external_require: usize,
    pub external_satisfied: usize,
}

impl ScopeStats {
    pub fn new(local: &LocalScope, external: &ExternalScope) -> Self {
        Self {
            local_require: local.values().filter(|e| e.require.is_some()).count(),
            local_satisfied: local.values().filter(|e| e.satisfied.is_some()).count(),
            external_require: external.require.len(),
            external_satisfied: external.satisfied.len(),
        }
    }

    pub fn has_local(&self) -> bool {
        self.local_require > 0 || self.local_satisfied > 0
    }

    pub fn has_external(&self) -> bool {
        self.external_require > 0 || self.external_satisfied > 0
    }
}
