use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let out = run(test.command().arg("init"))?;
    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Created .tcleanrc.json"));
    assert!(test.root().join(".tcleanrc.json").exists());

    let content = test.read_file(".tcleanrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["resourceDir"], "./src/main/resources");
    assert_eq!(parsed["sourceDir"], "./src/main/java");
    assert_eq!(parsed["namespaceId"], "my-plugin");
    assert_eq!(parsed["sort"], true);
    assert_eq!(parsed["removeUnused"], false);

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tcleanrc.json", "{}")?;

    let out = run(test.command().arg("init"))?;
    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains(".tcleanrc.json already exists"));
    assert_eq!(test.read_file(".tcleanrc.json")?, "{}");

    Ok(())
}
