use std::path::{Path, PathBuf};

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{
    cli::args::CommonArgs,
    config::load_config,
    core::CheckContext,
    issues::Issue,
};

use super::types::{
    AnnotationStats, ConfigDto, ConfigValues, GetConfigParams, IssueItem, IssueScanResult,
    IssueStats, Pagination, ScanIssuesParams, ScanOverviewParams, ScanOverviewResult,
};

#[derive(Clone)]
pub struct ReqsatMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for ReqsatMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

fn check_project(path: &str) -> Result<CheckContext, McpError> {
    let args = CommonArgs {
        path: PathBuf::from(path),
        lang: None,
        includes: Vec::new(),
        excludes: Vec::new(),
        verbose: false,
    };
    CheckContext::new(&args)
        .map_err(|e| McpError::internal_error(format!("Failed to initialize: {}", e), None))
}

fn sorted_issues(ctx: &CheckContext) -> Vec<Issue> {
    let mut issues = ctx.issues();
    issues.sort();
    issues
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;

    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_router]
impl ReqsatMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the current reqsat configuration
    #[tool(description = "Get the current reqsat configuration.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        json_result(&ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        })
    }

    /// Get overview statistics of annotations and issues
    #[tool(
        description = "Get annotation counts and issue counts per kind without detailed items. Use this first to understand the overall traceability state."
    )]
    pub async fn scan_overview(
        &self,
        params: Parameters<ScanOverviewParams>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = check_project(&params.0.project_root_path)?;

        let mut annotations = AnnotationStats::default();
        for check in ctx.file_checks() {
            annotations.add(check.stats());
        }

        json_result(&ScanOverviewResult {
            files_checked: ctx.file_checks().len(),
            unreadable_files: ctx
                .unreadable_files()
                .iter()
                .map(|f| f.file_path.clone())
                .collect(),
            annotations,
            issues: IssueStats::from_issues(&ctx.issues()),
        })
    }

    #[tool(
        description = "List missing and duplicated REQUIRE / SATISFIED annotations, sorted by file and position. Optionally filtered by kind. Returns paginated list."
    )]
    pub async fn scan_issues(
        &self,
        params: Parameters<ScanIssuesParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params.0.limit.map(|v| v as usize).unwrap_or(20).min(100);
        let offset = params.0.offset.map(|v| v as usize).unwrap_or(0);
        let kind = params.0.kind;

        let ctx = check_project(&params.0.project_root_path)?;

        let all_items: Vec<IssueItem> = sorted_issues(&ctx)
            .iter()
            .filter(|issue| kind.is_none_or(|k| issue.kind() == k))
            .map(IssueItem::from)
            .collect();

        let total_count = all_items.len();

        // Apply pagination
        let paginated: Vec<IssueItem> = all_items.into_iter().skip(offset).take(limit).collect();

        let has_more = offset + paginated.len() < total_count;

        json_result(&IssueScanResult {
            total_count,
            items: paginated,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }
}

#[tool_handler]
impl ServerHandler for ReqsatMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Reqsat MCP helps AI agents keep REQUIRE / SATISFIED comment annotations in sync.\n\n\
                 A `REQUIRE: <id>` comment must be matched by a `SATISFIED: <id>` comment in the same file.\n\
                 Qualified annotations such as `REQUIRE(extern): <id>` are matched across all files.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. scan_overview - Get annotation counts and issue counts per kind\n\
                 3. scan_issues - Get detailed issue list (paginated, optional kind filter)\n\n\
                 Recommended Workflow:\n\
                 1. Use scan_overview to understand the overall state\n\
                 2. Fix missing-satisfied and missing-require errors first\n\
                 3. Then remove duplicated annotations (the first occurrence is the one kept)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = ReqsatMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
