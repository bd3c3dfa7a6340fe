use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    core::ScopeStats,
    issues::{Issue, IssueKind, Report, Severity},
};

// ============================================================
// Tool Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path to the project root
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanOverviewParams {
    /// Absolute path to the project root
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanIssuesParams {
    /// Absolute path to the project root
    pub project_root_path: String,
    /// Only return issues of this kind
    pub kind: Option<IssueKind>,
    /// Maximum number of items to return (default 20, max 100)
    pub limit: Option<u32>,
    /// Number of items to skip
    pub offset: Option<u32>,
}

// ============================================================
// Config Types (get_config)
// ============================================================

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub includes: Vec<String>,
    pub ignores: Vec<String>,
    pub lang: String,
}

impl From<Config> for ConfigValues {
    fn from(c: Config) -> Self {
        Self {
            includes: c.includes,
            ignores: c.ignores,
            lang: c.lang,
        }
    }
}

// ============================================================
// Overview Types (scan_overview)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanOverviewResult {
    pub files_checked: usize,
    pub unreadable_files: Vec<String>,
    pub annotations: AnnotationStats,
    pub issues: IssueStats,
}

/// Annotation counts summed over all files.
#[derive(Debug, Default, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationStats {
    pub local_require: usize,
    pub local_satisfied: usize,
    pub external_require: usize,
    pub external_satisfied: usize,
}

impl AnnotationStats {
    pub fn add(&mut self, stats: ScopeStats) {
        self.local_require += stats.local_require;
        self.local_satisfied += stats.local_satisfied;
        self.external_require += stats.external_require;
        self.external_satisfied += stats.external_satisfied;
    }
}

#[derive(Debug, Default, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueStats {
    pub total_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub duplicated_require: usize,
    pub duplicated_satisfied: usize,
    pub missing_satisfied: usize,
    pub missing_require: usize,
}

impl IssueStats {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut stats = Self {
            total_count: issues.len(),
            ..Default::default()
        };
        for issue in issues {
            match issue.severity() {
                Severity::Error => stats.error_count += 1,
                Severity::Warning => stats.warning_count += 1,
            }
            match issue.kind() {
                IssueKind::DuplicateRequire => stats.duplicated_require += 1,
                IssueKind::DuplicateSatisfied => stats.duplicated_satisfied += 1,
                IssueKind::MissingSatisfied => stats.missing_satisfied += 1,
                IssueKind::MissingRequire => stats.missing_require += 1,
            }
        }
        stats
    }
}

// ============================================================
// Issue Types (scan_issues)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueItem {
    pub kind: IssueKind,
    pub severity: String,
    pub message: String,
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    /// The annotation id
    pub id: String,
    /// `file:line:col` of the first occurrence, for duplicates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_defined_at: Option<String>,
}

impl From<&Issue> for IssueItem {
    fn from(issue: &Issue) -> Self {
        let loc = issue.location();
        let first_defined_at = match issue {
            Issue::Duplicate(dup) => Some(dup.first.location()),
            Issue::Missing(_) => None,
        };
        Self {
            kind: issue.kind(),
            severity: issue.severity().to_string(),
            message: issue.message(),
            file_path: loc.file_path().to_string(),
            line: loc.line(),
            col: loc.col(),
            id: loc.id().to_string(),
            first_defined_at,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueScanResult {
    pub total_count: usize,
    pub items: Vec<IssueItem>,
    pub pagination: Pagination,
}

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
