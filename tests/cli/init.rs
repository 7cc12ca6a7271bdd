use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert!(
        parsed["ignores"]
            .as_array()
            .is_some_and(|ignores| ignores.contains(&json!("**/.venv/**"))),
        "Config should ignore virtualenvs by default"
    );
    assert_eq!(parsed["severity"], json!({}));
    assert_eq!(parsed["defaultSeverity"], "warning");

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .diagnostrc.json

    ----- stderr -----
    ");
    assert!(test.root().join(".diagnostrc.json").exists());

    let content = test.read_file(".diagnostrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".diagnostrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    warning: .diagnostrc.json already exists
    ");
    assert_eq!(test.read_file(".diagnostrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_warns_about_shadowed_config() -> Result<()> {
    let test = CliTest::with_file(".diagnostrc.json", "{}")?;
    test.write_file("pkg/app.py", "")?;
    let root = regex::escape(&test.root().display().to_string());

    insta::with_settings!({ filters => vec![(root.as_str(), "[ROOT]")] }, {
        assert_cmd_snapshot!(test.command().current_dir(test.root().join("pkg")).arg("init"), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ Created .diagnostrc.json

        ----- stderr -----
        warning: .diagnostrc.json shadows [ROOT]/.diagnostrc.json
        ");
    });
    assert!(test.root().join("pkg/.diagnostrc.json").exists());

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("app.py", "import os\n")?;

    let output = test.analyze_command().arg(".").output()?;
    assert!(
        output.status.success(),
        "Analyze command should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage: diagnost"));
    Ok(())
}
