use anyhow::Result;

use crate::{CliTest, stdout};

const APP: &str = r#"import * as m from '$lib/paraglide/messages';

export const App = () => (
  <div>
    <h1>{m.greeting({ name: 'Ada' })}</h1>
    <p>{m.greeting({ name: "Grace" })}</p>
  </div>
);
"#;

fn project() -> Result<CliTest> {
    let test = CliTest::project(
        "{\n  \"greeting\": \"Hello {name}\",\n  \"farewell\": \"Bye\"\n}\n",
        "{\n  \"greeting\": \"Hallo {name}\"\n}\n",
    )?;
    test.write_file("src/App.tsx", APP)?;
    Ok(test)
}

#[test]
fn test_usages_lists_call_sites() -> Result<()> {
    let test = project()?;

    let output = test.run(&["usages", "greeting"])?;
    let out = stdout(&output);

    assert!(output.status.success());
    assert!(out.contains("--> src/App.tsx:5:10"));
    assert!(out.contains("--> src/App.tsx:6:9"));
    assert!(out.contains("= note: Hello Ada"));
    assert!(out.contains("= note: Hello Grace"));
    assert!(out.contains("2 usage(s) of greeting"));
    Ok(())
}

#[test]
fn test_usages_of_unused_key() -> Result<()> {
    let test = project()?;

    let output = test.run(&["usages", "farewell"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("No usages of 'farewell'"));
    Ok(())
}

#[test]
fn test_key_at_offset() -> Result<()> {
    let test = project()?;
    let offset = APP.find("greeting").unwrap();

    let output = test.run(&["key-at", "src/App.tsx", &offset.to_string(), "--locale", "de"])?;
    let out = stdout(&output);

    assert!(output.status.success());
    assert!(out.starts_with("greeting\n"));
    assert!(out.contains("= note: Hallo Ada"));
    assert!(out.contains("defined: messages/en.json:2 (en)"));
    assert!(out.contains("defined: messages/de.json:2 (de)"));
    Ok(())
}

#[test]
fn test_key_at_outside_any_call() -> Result<()> {
    let test = project()?;

    let output = test.run(&["key-at", "src/App.tsx", "0"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("No message call at offset 0"));
    Ok(())
}
