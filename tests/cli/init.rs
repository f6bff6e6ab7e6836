use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .paraglotrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".paraglotrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["inlangProject"], "./project.inlang");
    assert_eq!(parsed["messageQualifier"], "m");
    assert!(parsed["includes"].is_array());
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".paraglotrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(test.read_file(".paraglotrc.json")?, "{}");
    Ok(())
}
