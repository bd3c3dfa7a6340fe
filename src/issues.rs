//! Issue types for traceability check results.
//!
//! Every issue is self-contained: it carries the annotations it is anchored
//! at (with file path and source line), so reporters need nothing else.

use enum_dispatch::enum_dispatch;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::{AnnotationKind, FileAnnotation};

// ============================================================
// Severity and Kind
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What went wrong with an annotation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    #[serde(rename = "duplicated-require")]
    DuplicateRequire,
    #[serde(rename = "duplicated-satisfied")]
    DuplicateSatisfied,
    MissingSatisfied,
    MissingRequire,
}

impl IssueKind {
    pub fn all() -> &'static [IssueKind] {
        &[
            IssueKind::DuplicateRequire,
            IssueKind::DuplicateSatisfied,
            IssueKind::MissingSatisfied,
            IssueKind::MissingRequire,
        ]
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::DuplicateRequire => write!(f, "duplicated-require"),
            IssueKind::DuplicateSatisfied => write!(f, "duplicated-satisfied"),
            IssueKind::MissingSatisfied => write!(f, "missing-satisfied"),
            IssueKind::MissingRequire => write!(f, "missing-require"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A second annotation of the same kind and id within one scope.
///
/// The later occurrence is discarded from the scope; the first one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateIssue {
    /// The discarded occurrence, where the issue is reported.
    pub duplicate: FileAnnotation,
    /// The occurrence kept in the scope.
    pub first: FileAnnotation,
}

impl DuplicateIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn kind(&self) -> IssueKind {
        match self.duplicate.kind() {
            AnnotationKind::Require => IssueKind::DuplicateRequire,
            AnnotationKind::Satisfied => IssueKind::DuplicateSatisfied,
        }
    }
}

/// A `REQUIRE` without its `SATISFIED`, or the other way around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingIssue {
    /// The annotation that is present.
    pub annotation: FileAnnotation,
}

impl MissingIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn kind(&self) -> IssueKind {
        match self.annotation.kind() {
            AnnotationKind::Require => IssueKind::MissingSatisfied,
            AnnotationKind::Satisfied => IssueKind::MissingRequire,
        }
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A traceability issue found during a check.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    Duplicate(DuplicateIssue),
    Missing(MissingIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::Duplicate(_) => DuplicateIssue::severity(),
            Issue::Missing(_) => MissingIssue::severity(),
        }
    }

    pub fn kind(&self) -> IssueKind {
        match self {
            Issue::Duplicate(issue) => issue.kind(),
            Issue::Missing(issue) => issue.kind(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Annotations involved, the reported location first. Never empty.
    fn anchors(&self) -> Vec<&FileAnnotation>;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Issue kind.
    fn report_kind(&self) -> IssueKind;

    /// Optional lines for the "= note:" output.
    fn details(&self) -> Vec<String> {
        Vec::new()
    }

    /// Where the issue is reported.
    fn location(&self) -> &FileAnnotation {
        self.anchors()[0]
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for DuplicateIssue {
    fn anchors(&self) -> Vec<&FileAnnotation> {
        vec![&self.duplicate, &self.first]
    }

    fn location(&self) -> &FileAnnotation {
        &self.duplicate
    }

    fn message(&self) -> String {
        format!("Duplicated {}", self.duplicate.annotation)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_kind(&self) -> IssueKind {
        self.kind()
    }

    fn details(&self) -> Vec<String> {
        vec![format!("First defined at {}", self.first.location())]
    }
}

impl Report for MissingIssue {
    fn anchors(&self) -> Vec<&FileAnnotation> {
        vec![&self.annotation]
    }

    fn location(&self) -> &FileAnnotation {
        &self.annotation
    }

    fn message(&self) -> String {
        format!(
            "Missing corresponding {} for {}",
            self.annotation.kind().counterpart().keyword(),
            self.annotation.annotation
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_kind(&self) -> IssueKind {
        self.kind()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, message
        self.location()
            .cmp_position(other.location())
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
