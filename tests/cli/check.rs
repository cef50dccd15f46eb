use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_check_reports_issues_without_writing() -> Result<()> {
    let test = CliTest::plugin_project()?;
    let before = test.read_file("src/main/resources/lang.properties")?;

    let out = run(test.check_command().args(["--namespace", "ns"]))?;
    assert_eq!(out.code, Some(1));
    assert_eq!(test.read_file("src/main/resources/lang.properties")?, before);

    assert!(out.stderr.contains("Unused key in"));
    assert!(out.stderr.contains("lang.properties: ns:old.entry"));
    assert!(out.stderr.contains("lang_de.properties: ns:dialog.title"));
    assert!(out.stdout.contains("2 problems (1 unused, 1 missing) in 2 translation files"));
    Ok(())
}

#[test]
fn test_check_clean_project_succeeds() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/main/java/Main.java", r#"tr("ns:a")"#)?;
    test.write_file("src/main/resources/lang.properties", "ns:a=A\n")?;

    let out = run(test.check_command().args(["--namespace", "ns"]))?;
    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("no issues found"));
    Ok(())
}

#[test]
fn test_check_uses_command_line_directories() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("java/Main.java", r#"tr("ns:a")"#)?;
    test.write_file("res/lang.properties", "ns:a=A\n")?;

    let out = run(test.check_command().args([
        "--namespace",
        "ns",
        "--source-dir",
        "java",
        "--resource-dir",
        "res",
    ]))?;
    assert_eq!(out.code, Some(0));
    Ok(())
}
