use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stdout};

const APP: &str = r#"import * as m from '$lib/paraglide/messages';

export const App = () => <p>Pick a color</p>;
"#;

fn project() -> Result<CliTest> {
    let test = CliTest::project("{\n  \"greeting\": \"Hello\"\n}\n", "{\n  \"greeting\": \"Hallo\"\n}\n")?;
    test.write_file("src/App.tsx", APP)?;
    Ok(test)
}

fn selection() -> (String, String) {
    let start = APP.find("Pick a color").unwrap();
    let end = start + "Pick a color".len();
    (start.to_string(), end.to_string())
}

fn catalog(test: &CliTest, locale: &str) -> Result<Value> {
    Ok(serde_json::from_str(
        &test.read_file(&format!("messages/{}.json", locale))?,
    )?)
}

#[test]
fn test_extract_dry_run_writes_catalogs_only() -> Result<()> {
    let test = project()?;
    let (start, end) = selection();

    let output = test.run(&[
        "extract", "--file", "src/App.tsx", "--start", &start, "--end", &end, "--key",
        "pick_color", "--text", "de=Farbe wählen",
    ])?;
    let out = stdout(&output);

    assert!(output.status.success(), "{}", crate::stderr(&output));
    assert!(out.contains("Added pick_color (en, de)"));
    assert!(out.contains("- Pick a color"));
    assert!(out.contains("+ {m.pick_color()}"));
    assert!(out.contains("source left unchanged"));

    assert_eq!(
        catalog(&test, "en")?,
        json!({"greeting": "Hello", "pick_color": "Pick a color"})
    );
    assert_eq!(
        catalog(&test, "de")?,
        json!({"greeting": "Hallo", "pick_color": "Farbe wählen"})
    );
    assert_eq!(test.read_file("src/App.tsx")?, APP);
    Ok(())
}

#[test]
fn test_extract_apply_rewrites_source() -> Result<()> {
    let test = project()?;
    let (start, end) = selection();

    let output = test.run(&[
        "extract", "--file", "src/App.tsx", "--start", &start, "--end", &end, "--key",
        "pick_color", "--apply",
    ])?;
    assert!(output.status.success(), "{}", crate::stderr(&output));
    assert_eq!(
        test.read_file("src/App.tsx")?,
        APP.replace("Pick a color", "{m.pick_color()}")
    );

    let output = test.run(&["usages", "pick_color"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("1 usage(s) of pick_color"));
    Ok(())
}

#[test]
fn test_extract_plural() -> Result<()> {
    let test = CliTest::project("{}", "{}")?;
    test.write_file("src/count.ts", "export const label = 'One file';\n")?;
    let content = "export const label = 'One file';\n";
    let start = content.find('\'').unwrap();
    let end = content.rfind('\'').unwrap() + 1;

    let output = test.run(&[
        "extract",
        "--file",
        "src/count.ts",
        "--start",
        &start.to_string(),
        "--end",
        &end.to_string(),
        "--key",
        "file_count",
        "--text",
        "de=Eine Datei",
        "--plural",
        "en={count} files",
        "--plural",
        "de={count} Dateien",
    ])?;

    assert!(output.status.success(), "{}", crate::stderr(&output));
    assert!(stdout(&output).contains("+ m.file_count({ count: 0 })"));
    let en = catalog(&test, "en")?;
    assert_eq!(en["file_count"][0]["selectors"], json!(["countPlural"]));
    assert_eq!(
        en["file_count"][0]["match"],
        json!({"countPlural=one": "One file", "countPlural=other": "{count} files"})
    );
    Ok(())
}

#[test]
fn test_extract_duplicate_key_is_refused() -> Result<()> {
    let test = project()?;
    let (start, end) = selection();

    let output = test.run(&[
        "extract", "--file", "src/App.tsx", "--start", &start, "--end", &end, "--key",
        "greeting",
    ])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(crate::stderr(&output).contains("greeting"));
    assert_eq!(catalog(&test, "en")?, json!({"greeting": "Hello"}));
    Ok(())
}
