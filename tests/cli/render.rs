use anyhow::Result;

use crate::{CliTest, stdout};

fn project() -> Result<CliTest> {
    CliTest::project(
        r#"{
  "greeting": "Hello {name}",
  "items": [{
    "declarations": ["input count", "local countPlural = count: plural"],
    "selectors": ["countPlural"],
    "match": {"countPlural=one": "One item", "countPlural=other": "{count} items"}
  }]
}"#,
        r#"{"greeting": "Hallo {name}"}"#,
    )
}

#[test]
fn test_render_with_args() -> Result<()> {
    let test = project()?;

    let output = test.run(&["render", "greeting", "--arg", "name=Ada"])?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Hello Ada\n");

    let output = test.run(&["render", "greeting", "--locale", "de", "--arg", "name=Ada"])?;
    assert_eq!(stdout(&output), "Hallo Ada\n");
    Ok(())
}

#[test]
fn test_render_plural() -> Result<()> {
    let test = project()?;

    let output = test.run(&["render", "items", "--count", "1"])?;
    assert_eq!(stdout(&output), "One item\n");

    let output = test.run(&["render", "items", "--count", "3"])?;
    assert_eq!(stdout(&output), "3 items\n");
    Ok(())
}

#[test]
fn test_render_unknown_key_is_an_error() -> Result<()> {
    let test = project()?;

    let output = test.run(&["render", "missing"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(crate::stderr(&output).contains("no message 'missing' in locale 'en'"));
    Ok(())
}
