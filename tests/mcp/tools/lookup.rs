use std::collections::HashMap;

use paraglot::mcp::{
    ParaglotMcpServer,
    types::{
        FindUsagesParams, GenerateKeyParams, KeyAtParams, ListUnusedParams, RenderMessageParams,
    },
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{APP_TSX, assert_pagination, extract_tool_result_json, fixture_app};

// ============================================================================
// find_usages tests
// ============================================================================

#[tokio::test]
async fn test_find_usages() {
    let fixture = fixture_app().unwrap();
    let server = ParaglotMcpServer::new();

    let params = Parameters(FindUsagesParams {
        project_root_path: fixture.root(),
        key: "greeting".to_string(),
    });

    let result = server.find_usages(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 1);
    assert_eq!(
        json_result["usages"][0],
        json!({
            "filePath": "src/App.tsx",
            "line": 5,
            "col": 10,
            "sourceLine": "    <h1>{m.greeting({ name: 'Ada' })}</h1>",
            "preview": "Hello Ada"
        })
    );
    assert_eq!(
        json_result["definitions"],
        json!([
            {"locale": "en", "filePath": "messages/en.json", "line": 2},
            {"locale": "de", "filePath": "messages/de.json", "line": 2}
        ])
    );
}

#[tokio::test]
async fn test_find_usages_in_plain_ts_file() {
    let fixture = fixture_app().unwrap();
    let server = ParaglotMcpServer::new();

    fixture
        .write_file(
            "src/Footer.tsx",
            "import * as m from '$lib/paraglide/messages';\nexport const f = m.farewell();\n",
        )
        .unwrap();

    let params = Parameters(FindUsagesParams {
        project_root_path: fixture.root(),
        key: "farewell".to_string(),
    });
    let result = server.find_usages(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 1);
    assert_eq!(json_result["usages"][0]["filePath"], "src/Footer.tsx");
    assert_eq!(json_result["usages"][0]["line"], 2);
}

#[tokio::test]
async fn test_find_usages_ignores_other_qualifiers() {
    let fixture = fixture_app().unwrap();
    fixture
        .write_file(
            "src/Other.ts",
            "import * as m from './other';\nexport const x = m.thanks();\n",
        )
        .unwrap();
    let server = ParaglotMcpServer::new();

    let params = Parameters(FindUsagesParams {
        project_root_path: fixture.root(),
        key: "thanks".to_string(),
    });
    let result = server.find_usages(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 0);
    assert_eq!(json_result["definitions"][0]["locale"], "en");
}

// ============================================================================
// key_at tests
// ============================================================================

#[tokio::test]
async fn test_key_at() {
    let fixture = fixture_app().unwrap();
    let server = ParaglotMcpServer::new();

    let params = Parameters(KeyAtParams {
        project_root_path: fixture.root(),
        file_path: "src/App.tsx".to_string(),
        offset: APP_TSX.find("name:").unwrap(),
    });
    let result = server.key_at(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["key"], "greeting");
    assert_eq!(json_result["usage"]["line"], 5);
    assert_eq!(json_result["definitions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_key_at_plain_text() {
    let fixture = fixture_app().unwrap();
    let server = ParaglotMcpServer::new();

    let params = Parameters(KeyAtParams {
        project_root_path: fixture.root(),
        file_path: "src/App.tsx".to_string(),
        offset: APP_TSX.find("Pick a color").unwrap(),
    });
    let result = server.key_at(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert!(json_result["key"].is_null());
    assert!(json_result["usage"].is_null());
}

// ============================================================================
// list_unused tests
// ============================================================================

#[tokio::test]
async fn test_list_unused_paginates() {
    let fixture = fixture_app().unwrap();
    let server = ParaglotMcpServer::new();

    let params = Parameters(ListUnusedParams {
        project_root_path: fixture.root(),
        limit: Some(1),
        offset: None,
    });
    let result = server.list_unused(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 2);
    assert_eq!(
        json_result["items"],
        json!([{
            "key": "farewell",
            "text": "Goodbye",
            "filePath": "messages/en.json",
            "line": 3
        }])
    );
    assert_pagination(&json_result, 0, 1, true);

    let params = Parameters(ListUnusedParams {
        project_root_path: fixture.root(),
        limit: Some(1),
        offset: Some(1),
    });
    let result = server.list_unused(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["items"][0]["key"], "thanks");
    assert_pagination(&json_result, 1, 1, false);
}

// ============================================================================
// render_message tests
// ============================================================================

#[tokio::test]
async fn test_render_message() {
    let fixture = fixture_app().unwrap();
    let server = ParaglotMcpServer::new();

    let params = Parameters(RenderMessageParams {
        project_root_path: fixture.root(),
        key: "greeting".to_string(),
        locale: Some("de".to_string()),
        args: Some(HashMap::from([("name".to_string(), "Ada".to_string())])),
        count: None,
    });
    let result = server.render_message(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(
        json_result,
        json!({"key": "greeting", "locale": "de", "text": "Hallo Ada"})
    );
}

#[tokio::test]
async fn test_render_message_missing_in_locale() {
    let fixture = fixture_app().unwrap();
    let server = ParaglotMcpServer::new();

    let params = Parameters(RenderMessageParams {
        project_root_path: fixture.root(),
        key: "thanks".to_string(),
        locale: Some("de".to_string()),
        args: None,
        count: None,
    });

    assert!(server.render_message(params).await.is_err());
}

// ============================================================================
// generate_key tests
// ============================================================================

#[tokio::test]
async fn test_generate_key() {
    let fixture = fixture_app().unwrap();
    let server = ParaglotMcpServer::new();

    let params = Parameters(GenerateKeyParams {
        project_root_path: fixture.root(),
        count: Some(3),
    });
    let result = server.generate_key(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let keys = json_result["keys"].as_array().unwrap();
    assert_eq!(keys.len(), 3);
    for key in keys {
        let key = key.as_str().unwrap();
        assert_eq!(key.split('_').count(), 4);
        assert!(!["greeting", "farewell", "thanks"].contains(&key));
    }
}
