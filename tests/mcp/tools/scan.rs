use reqsat::{
    issues::IssueKind,
    mcp::{
        ReqsatMcpServer,
        types::{ScanIssuesParams, ScanOverviewParams},
    },
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::{Value, json};

use crate::{McpTestFixture, extract_tool_result_json, fixture_with_all_issue_kinds};

fn issues_params(
    fixture: &McpTestFixture,
    kind: Option<IssueKind>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Parameters<ScanIssuesParams> {
    Parameters(ScanIssuesParams {
        project_root_path: fixture.root(),
        kind,
        limit,
        offset,
    })
}

fn locations(items: &Value) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| {
            format!(
                "{}:{}:{}",
                item["filePath"].as_str().unwrap(),
                item["line"],
                item["col"]
            )
        })
        .collect()
}

// ============================================================================
// scan_overview tests
// ============================================================================

#[tokio::test]
async fn test_scan_overview_counts() {
    let fixture = fixture_with_all_issue_kinds().unwrap();
    let server = ReqsatMcpServer::new();

    let result = server
        .scan_overview(Parameters(ScanOverviewParams {
            project_root_path: fixture.root(),
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["filesChecked"], 3);
    assert_eq!(json_result["unreadableFiles"], json!([]));
    assert_eq!(
        json_result["annotations"],
        json!({
            "localRequire": 2,
            "localSatisfied": 2,
            "externalRequire": 0,
            "externalSatisfied": 2
        })
    );
    assert_eq!(
        json_result["issues"],
        json!({
            "totalCount": 5,
            "errorCount": 3,
            "warningCount": 2,
            "duplicatedRequire": 1,
            "duplicatedSatisfied": 1,
            "missingSatisfied": 1,
            "missingRequire": 2
        })
    );
}

#[tokio::test]
async fn test_scan_overview_clean_project() {
    let fixture =
        McpTestFixture::with_files(&[("main.go", "// REQUIRE: x\nfunc main() {} // SATISFIED: x\n")])
            .unwrap();
    let server = ReqsatMcpServer::new();

    let result = server
        .scan_overview(Parameters(ScanOverviewParams {
            project_root_path: fixture.root(),
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["filesChecked"], 1);
    assert_eq!(json_result["issues"]["totalCount"], 0);
}

// ============================================================================
// scan_issues tests
// ============================================================================

#[tokio::test]
async fn test_scan_issues_sorted() {
    let fixture = fixture_with_all_issue_kinds().unwrap();
    let server = ReqsatMcpServer::new();

    let result = server
        .scan_issues(issues_params(&fixture, None, None, None))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 5);
    assert_eq!(
        locations(&json_result["items"]),
        vec![
            format!("{}:3:12", fixture.path_of("src/a.js")),
            format!("{}:4:12", fixture.path_of("src/a.js")),
            format!("{}:1:13", fixture.path_of("src/b.py")),
            format!("{}:2:21", fixture.path_of("src/b.py")),
            format!("{}:1:22", fixture.path_of("src/c.rs")),
        ]
    );
    assert_eq!(json_result["pagination"]["hasMore"], false);

    let duplicate = &json_result["items"][0];
    assert_eq!(duplicate["kind"], "duplicated-require");
    assert_eq!(duplicate["severity"], "warning");
    assert_eq!(duplicate["id"], "paired");
    assert_eq!(duplicate["message"], "Duplicated REQUIRE: paired");
    assert_eq!(
        duplicate["firstDefinedAt"],
        format!("{}:1:12", fixture.path_of("src/a.js"))
    );

    let missing = &json_result["items"][1];
    assert_eq!(missing["kind"], "missing-satisfied");
    assert_eq!(missing["severity"], "error");
    assert!(missing.get("firstDefinedAt").is_none());
}

#[tokio::test]
async fn test_scan_issues_kind_filter() {
    let fixture = fixture_with_all_issue_kinds().unwrap();
    let server = ReqsatMcpServer::new();

    let result = server
        .scan_issues(issues_params(&fixture, Some(IssueKind::MissingRequire), None, None))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 2);
    let ids: Vec<&str> = json_result["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["orphan", "shared"]);
    assert_eq!(
        json_result["items"][1]["message"],
        "Missing corresponding REQUIRE for SATISFIED(extern): shared"
    );
}

#[tokio::test]
async fn test_scan_issues_pagination() {
    let fixture = fixture_with_all_issue_kinds().unwrap();
    let server = ReqsatMcpServer::new();

    let result = server
        .scan_issues(issues_params(&fixture, None, Some(2), Some(2)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 5);
    assert_eq!(json_result["items"].as_array().unwrap().len(), 2);
    assert_eq!(json_result["items"][0]["id"], "orphan");
    assert_eq!(
        json_result["pagination"],
        json!({ "offset": 2, "limit": 2, "hasMore": true })
    );

    let result = server
        .scan_issues(issues_params(&fixture, None, Some(500), Some(4)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["items"].as_array().unwrap().len(), 1);
    assert_eq!(json_result["pagination"]["limit"], 100);
    assert_eq!(json_result["pagination"]["hasMore"], false);
}
