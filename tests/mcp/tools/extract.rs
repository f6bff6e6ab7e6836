use std::collections::HashMap;

use paraglot::mcp::{ParaglotMcpServer, types::ExtractMessageParams};
use pretty_assertions::assert_eq;
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{APP_TSX, McpTestFixture, extract_tool_result_json, fixture_app};

fn params(fixture: &McpTestFixture, key: &str, apply: bool) -> ExtractMessageParams {
    let start = APP_TSX.find("Pick a color").unwrap();
    ExtractMessageParams {
        project_root_path: fixture.root(),
        file_path: "src/App.tsx".to_string(),
        start,
        end: start + "Pick a color".len(),
        key: Some(key.to_string()),
        translations: Some(HashMap::from([(
            "de".to_string(),
            "Wähle eine Farbe".to_string(),
        )])),
        plurals: None,
        apply: Some(apply),
    }
}

#[tokio::test]
async fn test_extract_message_apply() {
    let fixture = fixture_app().unwrap();
    let server = ParaglotMcpServer::new();

    let result = server
        .extract_message(Parameters(params(&fixture, "pick_color", true)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["key"], "pick_color");
    assert_eq!(json_result["replacement"], "{m.pick_color()}");
    assert_eq!(json_result["original"], "Pick a color");
    assert_eq!(json_result["updatedLocales"], json!(["en", "de"]));
    assert_eq!(json_result["applied"], true);
    assert_eq!(json_result["compileTriggered"], false);

    assert_eq!(
        fixture.read_locale_file("en").unwrap()["pick_color"],
        "Pick a color"
    );
    assert_eq!(
        fixture.read_locale_file("de").unwrap()["pick_color"],
        "Wähle eine Farbe"
    );
    assert_eq!(
        fixture.read_file("src/App.tsx").unwrap(),
        APP_TSX.replace("Pick a color", "{m.pick_color()}")
    );
}

#[tokio::test]
async fn test_extract_message_without_apply_keeps_source() {
    let fixture = fixture_app().unwrap();
    let server = ParaglotMcpServer::new();

    let result = server
        .extract_message(Parameters(params(&fixture, "pick_color", false)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["applied"], false);
    assert_eq!(fixture.read_file("src/App.tsx").unwrap(), APP_TSX);
    assert!(
        fixture
            .read_locale_file("en")
            .unwrap()
            .get("pick_color")
            .is_some()
    );
}

#[tokio::test]
async fn test_extract_message_generates_key() {
    let fixture = fixture_app().unwrap();
    let server = ParaglotMcpServer::new();

    let mut request = params(&fixture, "unused", false);
    request.key = None;
    let result = server.extract_message(Parameters(request)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let key = json_result["key"].as_str().unwrap();
    assert_eq!(key.split('_').count(), 4);
    assert_eq!(
        fixture.read_locale_file("de").unwrap()[key],
        "Wähle eine Farbe"
    );
}

#[tokio::test]
async fn test_extract_message_rejects_existing_key() {
    let fixture = fixture_app().unwrap();
    let server = ParaglotMcpServer::new();

    let result = server
        .extract_message(Parameters(params(&fixture, "farewell", true)))
        .await;

    assert!(result.is_err());
    assert_eq!(fixture.read_locale_file("en").unwrap()["farewell"], "Goodbye");
    assert_eq!(fixture.read_file("src/App.tsx").unwrap(), APP_TSX);
}

#[tokio::test]
async fn test_extract_message_rejects_invalid_key() {
    let fixture = fixture_app().unwrap();
    let server = ParaglotMcpServer::new();

    let result = server
        .extract_message(Parameters(params(&fixture, "Pick-Color", true)))
        .await;

    assert!(result.is_err());
    assert!(fixture.read_locale_file("en").unwrap().get("Pick-Color").is_none());
}

#[tokio::test]
async fn test_extract_message_plural_in_code() {
    let fixture = fixture_app().unwrap();
    let source = "export const label = (n: number) => 'One file';\n";
    fixture.write_file("src/label.ts", source).unwrap();
    let server = ParaglotMcpServer::new();

    let start = source.find('\'').unwrap();
    let request = ExtractMessageParams {
        project_root_path: fixture.root(),
        file_path: "src/label.ts".to_string(),
        start,
        end: source.rfind('\'').unwrap() + 1,
        key: Some("file_count".to_string()),
        translations: Some(HashMap::from([("de".to_string(), "Eine Datei".to_string())])),
        plurals: Some(HashMap::from([
            ("en".to_string(), "{count} files".to_string()),
            ("de".to_string(), "{count} Dateien".to_string()),
        ])),
        apply: Some(true),
    };
    let result = server.extract_message(Parameters(request)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["replacement"], "m.file_count({ count: 0 })");
    assert_eq!(
        fixture.read_file("src/label.ts").unwrap(),
        "export const label = (n: number) => m.file_count({ count: 0 });\n"
    );
    assert_eq!(
        fixture.read_locale_file("de").unwrap()["file_count"][0]["match"],
        json!({"countPlural=one": "Eine Datei", "countPlural=other": "{count} Dateien"})
    );
}
