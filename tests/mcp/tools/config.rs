use paraglot::mcp::{
    ParaglotMcpServer,
    types::{GetConfigParams, GetLocalesParams},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json, fixture_app};

// ============================================================================
// get_config tests
// ============================================================================

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = ParaglotMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], false);
    assert_eq!(json_result["config"]["inlangProject"], "./project.inlang");
    assert_eq!(json_result["config"]["messageQualifier"], "m");
    assert_eq!(json_result["config"]["compileAfterExtract"], true);
}

#[tokio::test]
async fn test_get_config_from_file_in_parent() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "inlangProject": "./i18n/project.inlang",
            "messageQualifier": "msg"
        }))
        .unwrap();
    fixture.write_file("src/routes/.keep", "").unwrap();

    let server = ParaglotMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root_path().join("src/routes").to_string_lossy().to_string(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["projectRoot"], fixture.root());
    assert_eq!(json_result["config"]["inlangProject"], "./i18n/project.inlang");
    assert_eq!(json_result["config"]["messageQualifier"], "msg");
}

#[tokio::test]
async fn test_get_config_rejects_invalid_qualifier() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({"messageQualifier": "1m"}))
        .unwrap();

    let server = ParaglotMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    assert!(server.get_config(params).await.is_err());
}

// ============================================================================
// get_locales tests
// ============================================================================

#[tokio::test]
async fn test_get_locales() {
    let fixture = fixture_app().unwrap();
    let server = ParaglotMcpServer::new();

    let params = Parameters(GetLocalesParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_locales(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["baseLocale"], "en");
    assert_eq!(
        json_result["locales"],
        json!([
            {"locale": "en", "filePath": "messages/en.json", "keyCount": 3, "problems": []},
            {"locale": "de", "filePath": "messages/de.json", "keyCount": 2, "problems": []}
        ])
    );
}

#[tokio::test]
async fn test_get_locales_reports_unparseable_entries() {
    let fixture = McpTestFixture::with_messages(vec![(
        "en",
        json!({"greeting": "Hello", "broken": 42}),
    )])
    .unwrap();
    let server = ParaglotMcpServer::new();

    let params = Parameters(GetLocalesParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_locales(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let en = &json_result["locales"][0];
    assert_eq!(en["keyCount"], 1);
    assert_eq!(en["problems"].as_array().unwrap().len(), 1);
    assert!(en["problems"][0].as_str().unwrap().contains("broken"));
}

#[tokio::test]
async fn test_get_locales_without_settings_fails() {
    let fixture = McpTestFixture::new().unwrap();
    let server = ParaglotMcpServer::new();

    let params = Parameters(GetLocalesParams {
        project_root_path: fixture.root(),
    });

    assert!(server.get_locales(params).await.is_err());
}
