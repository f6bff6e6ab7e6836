use anyhow::Result;

use crate::{CliTest, stdout};

const APP: &str = r#"import * as m from '$lib/paraglide/messages';

export const App = () => <h1>{m.greeting({ name: 'Ada' })}</h1>;
"#;

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::project(
        r#"{"greeting": "Hello {name}"}"#,
        r#"{"greeting": "Hallo {name}"}"#,
    )?;
    test.write_file("src/App.tsx", APP)?;

    let output = test.run(&["check"])?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Checked 1 source file, 2 locale files - no issues found"));
    Ok(())
}

#[test]
fn test_check_reports_unused_and_unparseable() -> Result<()> {
    let test = CliTest::project(
        "{\n  \"greeting\": \"Hello {name}\",\n  \"farewell\": \"Bye\",\n  \"broken\": 42\n}\n",
        r#"{"greeting": "Hallo {name}"}"#,
    )?;
    test.write_file("src/App.tsx", APP)?;

    let output = test.run(&["check"])?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("warning: \"farewell\"  unused-key"));
    assert!(out.contains("--> messages/en.json:3:1"));
    assert!(out.contains("error: \"broken\"  unparseable-entry"));
    assert!(!out.contains("\"greeting\""));
    Ok(())
}

#[test]
fn test_check_without_settings_fails() -> Result<()> {
    let test = CliTest::with_file(".paraglotrc.json", "{}")?;

    let output = test.run(&["check"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(crate::stderr(&output).contains("Error:"));
    Ok(())
}
