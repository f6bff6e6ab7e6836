use std::collections::HashSet;

use anyhow::Result;

use crate::{CliTest, stdout};

#[test]
fn test_id_generates_distinct_keys() -> Result<()> {
    let test = CliTest::project("{}", "{}")?;

    let output = test.run(&["id", "--count", "5"])?;
    let out = stdout(&output);
    let keys: Vec<&str> = out.lines().collect();

    assert!(output.status.success());
    assert_eq!(keys.len(), 5);
    assert_eq!(keys.iter().collect::<HashSet<_>>().len(), 5);
    for key in keys {
        assert_eq!(key.split('_').count(), 4, "unexpected key shape: {}", key);
    }
    Ok(())
}
