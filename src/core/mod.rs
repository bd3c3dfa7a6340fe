//! Core traceability engine.
//!
//! ## Pipeline
//!
//! 1. **Extraction**: source text + comment marks -> [`Comment`] spans
//! 2. **Parsing**: each comment -> [`Annotation`]s
//! 3. **File reconciliation**: annotations -> file issues, local and external scopes
//! 4. **Global reconciliation**: all external scopes -> cross-file issues
//!
//! ## Module Structure
//!
//! - `marks`: mark pattern abstraction and `CommentMarks`
//! - `languages`: language table (extensions and comment marks)
//! - `extract`: comment extraction state machine
//! - `annotation`: `REQUIRE` / `SATISFIED` parsing
//! - `scope`: scope records
//! - `reconcile`: file and global reconciliation
//! - `check`: per-file and cross-file entry points
//! - `context`: a whole-project check run (config, scanning, parallel checks)
//! - `file_scanner`: file discovery

pub mod annotation;
pub mod check;
pub mod context;
pub mod extract;
pub mod file_scanner;
pub mod languages;
pub mod marks;
pub mod reconcile;
pub mod scope;

#[cfg(test)]
mod fixtures;

pub use annotation::{Annotation, AnnotationKind, parse_comment, parse_comment_with};
pub use check::{FileCheck, check_file, check_files};
pub use context::CheckContext;
pub use extract::{Comment, CommentKind, extract_comments};
pub use languages::{Language, LanguageSelection};
pub use marks::{CommentMarks, LiteralMark, MarkPattern};
pub use reconcile::{FileReconciliation, GlobalReconciliation, reconcile_file, reconcile_global};
pub use scope::{ExternalScope, FileAnnotation, GlobalScope, LocalScope, ScopeEntry, ScopeStats};
