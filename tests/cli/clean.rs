use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_clean_sorts_and_moves_unused_keys() -> Result<()> {
    let test = CliTest::plugin_project()?;

    let out = run(test.clean_command().args(["--namespace", "ns"]))?;
    assert_eq!(out.code, Some(0));

    assert_eq!(
        test.read_file("src/main/resources/lang.properties")?,
        "ns:dialog.title=Title\n\
         ns:greeting.hello=Hello\n\
         ns:menu.file=File\n\
         \n\
         ### Unused keys: ###\n\
         ns:old.entry=Old\n"
    );
    assert_eq!(
        test.read_file("src/main/resources/lang_de.properties")?,
        "ns:greeting.hello=Hallo\nns:menu.file=Datei\n"
    );

    assert!(out.stdout.contains("namespace: ns"));
    assert!(out.stdout.contains("Detected 3 used keys in source code"));
    assert!(out.stdout.contains("Processed 2 translation files: 2 updated, 0 unchanged"));
    assert!(out.stderr.contains("warning: Missing key in"));
    assert!(out.stderr.contains("lang_de.properties: ns:dialog.title"));
    Ok(())
}

#[test]
fn test_clean_is_idempotent() -> Result<()> {
    let test = CliTest::plugin_project()?;

    run(test.clean_command().args(["--namespace", "ns"]))?;
    let first = test.read_file("src/main/resources/lang.properties")?;

    let out = run(test.clean_command().args(["--namespace", "ns"]))?;
    assert_eq!(out.code, Some(0));
    assert_eq!(test.read_file("src/main/resources/lang.properties")?, first);
    assert!(out.stdout.contains("0 updated, 2 unchanged"));
    Ok(())
}

#[test]
fn test_clean_remove_unused_without_sorting() -> Result<()> {
    let test = CliTest::plugin_project()?;

    let out = run(test.clean_command().args([
        "--namespace",
        "ns",
        "--remove-unused",
        "--no-sort",
    ]))?;
    assert_eq!(out.code, Some(0));

    assert_eq!(
        test.read_file("src/main/resources/lang.properties")?,
        "ns:menu.file=File\nns:greeting.hello=Hello\nns:dialog.title=Title\n"
    );
    Ok(())
}

#[test]
fn test_clean_dry_run_leaves_files_alone() -> Result<()> {
    let test = CliTest::plugin_project()?;
    let before = test.read_file("src/main/resources/lang.properties")?;

    let out = run(test.clean_command().args(["--namespace", "ns", "--dry-run"]))?;
    assert_eq!(out.code, Some(0));
    assert_eq!(test.read_file("src/main/resources/lang.properties")?, before);
    assert!(out.stdout.contains("Would update 2 of 2 translation files (1 unused key)."));
    Ok(())
}

#[test]
fn test_clean_reads_config_file() -> Result<()> {
    let test = CliTest::plugin_project()?;
    test.write_file(
        ".tcleanrc.json",
        r#"{ "namespaceId": "ns", "removeUnused": true }"#,
    )?;

    let out = run(&mut test.clean_command())?;
    assert_eq!(out.code, Some(0));
    assert!(
        !test
            .read_file("src/main/resources/lang.properties")?
            .contains("ns:old.entry")
    );
    Ok(())
}

#[test]
fn test_clean_verbose_lists_files() -> Result<()> {
    let test = CliTest::plugin_project()?;

    let out = run(test.clean_command().args(["--namespace", "ns", "-v"]))?;
    assert!(out.stdout.contains("Processing: "));
    Ok(())
}

#[test]
fn test_clean_without_namespace_is_an_error() -> Result<()> {
    let test = CliTest::plugin_project()?;

    let out = run(&mut test.clean_command())?;
    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("No namespace configured"));
    Ok(())
}

#[test]
fn test_clean_missing_resource_dir_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/main/java/Main.java", "class Main {}")?;

    let out = run(test.clean_command().args(["--namespace", "ns"]))?;
    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("does not exist"));
    Ok(())
}

#[test]
fn test_clean_ignores_are_relative_to_config_dir() -> Result<()> {
    let test = CliTest::plugin_project()?;
    test.write_file(
        "src/main/java/generated/Keys.java",
        r#"class Keys { String k = "ns:old.entry"; }"#,
    )?;
    test.write_file(
        ".tcleanrc.json",
        r#"{ "namespaceId": "ns", "ignores": ["src/main/java/generated/**"] }"#,
    )?;

    let out = run(&mut test.clean_command())?;
    assert_eq!(out.code, Some(0));
    assert!(
        test.read_file("src/main/resources/lang.properties")?
            .ends_with("### Unused keys: ###\nns:old.entry=Old\n")
    );
    Ok(())
}
