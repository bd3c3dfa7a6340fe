//! Per-file and cross-file check entry points.
//!
//! [`check_file`] is independent per file and safe to run in parallel.
//! [`check_files`] must run once every file has been checked.

use std::path::Path;

use super::{
    annotation::parse_comment,
    extract::{OpenBlock, extract_comments},
    languages::{Language, LanguageSelection},
    reconcile::{GlobalReconciliation, reconcile_file, reconcile_global},
    scope::{ExternalScope, FileAnnotation, LocalScope, ScopeStats},
};
use crate::issues::Issue;

/// Result of checking one file.
#[derive(Debug, Clone)]
pub struct FileCheck {
    pub file_path: String,
    /// Language whose comment marks were used.
    pub language: Language,
    pub issues: Vec<Issue>,
    pub local_scope: LocalScope,
    pub external_scope: ExternalScope,
    /// Block comment still open at end of file. Its content was dropped.
    pub unterminated_block: Option<OpenBlock>,
}

impl FileCheck {
    pub fn stats(&self) -> ScopeStats {
        ScopeStats::new(&self.local_scope, &self.external_scope)
    }
}

/// Extract, parse and reconcile the annotations of one source file.
pub fn check_file(source: &str, file_path: &str, selection: LanguageSelection) -> FileCheck {
    let language = selection.resolve(Path::new(file_path));
    let source_lines: Vec<&str> = source.lines().collect();

    let mut comments = extract_comments(source, language.comment_marks());
    let annotations: Vec<FileAnnotation> = comments
        .by_ref()
        .flat_map(|comment| parse_comment(&comment).collect::<Vec<_>>())
        .map(|annotation| {
            let source_line = source_lines
                .get(annotation.start_line - 1)
                .copied()
                .unwrap_or_default();
            FileAnnotation::new(file_path, annotation, source_line)
        })
        .collect();
    let unterminated_block = comments.unterminated_block().cloned();

    let reconciliation = reconcile_file(annotations);

    FileCheck {
        file_path: file_path.to_string(),
        language,
        issues: reconciliation.issues,
        local_scope: reconciliation.local_scope,
        external_scope: reconciliation.external_scope,
        unterminated_block,
    }
}

/// Reconcile the external scopes of all checked files.
pub fn check_files(files: &[FileCheck]) -> GlobalReconciliation {
    reconcile_global(
        files
            .iter()
            .map(|file| (file.file_path.as_str(), &file.external_scope)),
    )
}
