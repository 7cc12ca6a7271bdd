use std::{fs::File, process::Stdio};

use anyhow::Result;
use insta::assert_snapshot;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, run_json, stderr, stdout};

const RUFF_CONCISE: &str = "\
src/app.py:10:1: E501 line too long
src/app.py:3:8: F401 [*] `os` imported but unused
src/util.py:1:1: D100 Missing docstring in public module
Found 3 errors.
[*] 1 fixable with the `--fix` option.
";

#[test]
fn test_lint_json_output() -> Result<()> {
    let test = CliTest::with_file("ruff.txt", RUFF_CONCISE)?;

    let mut cmd = test.lint_command();
    cmd.arg("ruff.txt");
    let (code, json) = run_json(cmd)?;

    assert_eq!(code, Some(1));
    let summary: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|v| {
            (
                v["rule"].clone(),
                v["severity"].clone(),
                v["location"]["file_path"].clone(),
                v["location"]["line"].clone(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (json!("F401"), json!("error"), json!("src/app.py"), json!(3)),
            (json!("E501"), json!("warning"), json!("src/app.py"), json!(10)),
            (json!("D100"), json!("info"), json!("src/util.py"), json!(1)),
        ]
    );
    Ok(())
}

#[test]
fn test_lint_single_violation_shape() -> Result<()> {
    let test = CliTest::with_file("out.txt", "foo.py:10:1: E501 line too long\n")?;

    let mut cmd = test.lint_command();
    cmd.arg("out.txt");
    let (code, json) = run_json(cmd)?;

    assert_eq!(code, Some(0));
    assert_snapshot!(json.to_string(), @r#"[{"rule":"E501","message":"line too long","severity":"warning","location":{"file_path":"foo.py","line":10},"column":1,"fixable":false}]"#);
    Ok(())
}

#[test]
fn test_lint_ruff_json_input() -> Result<()> {
    let test = CliTest::with_file(
        "ruff.json",
        r#"[
  {
    "code": "F401",
    "message": "`os` imported but unused",
    "filename": "app.py",
    "location": { "row": 1, "column": 8 },
    "end_location": { "row": 1, "column": 10 },
    "fix": { "applicability": "safe", "message": "Remove unused import: `os`", "edits": [] },
    "noqa_row": 1,
    "url": "https://docs.astral.sh/ruff/rules/unused-import"
  }
]"#,
    )?;

    let mut cmd = test.lint_command();
    cmd.arg("ruff.json");
    let (code, json) = run_json(cmd)?;

    assert_eq!(code, Some(1));
    assert_eq!(json[0]["fix"], "Remove unused import: `os`");
    assert_eq!(json[0]["fixable"], true);
    assert_eq!(json[0]["column"], 8);
    Ok(())
}

#[test]
fn test_lint_clean_output_from_stdin() -> Result<()> {
    let test = CliTest::with_file("clean.txt", "All checks passed!\n")?;

    let output = test
        .lint_command()
        .arg("-")
        .stdin(Stdio::from(File::open(test.root().join("clean.txt"))?))
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "\u{2713} Normalized 0 violations - no issues found\n"
    );
    Ok(())
}

#[test]
fn test_lint_human_output() -> Result<()> {
    let test = CliTest::with_file("out.txt", "app.py:3:8: F401 [*] `os` imported but unused\n")?;

    assert_cmd_snapshot!(test.lint_command().arg("out.txt"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error: `os` imported but unused  F401
      --> app.py:3:8

    ✘ Normalized 1 violation: 1 error, 0 warnings

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_lint_bracketed_banner_is_not_json() -> Result<()> {
    let test = CliTest::with_file(
        "out.txt",
        "[ruff] checking 1 file\nfoo.py:10:1: E501 line too long\n",
    )?;

    assert_cmd_snapshot!(test.lint_command().arg("out.txt"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: line too long  E501
      --> foo.py:10:1

    ✘ Normalized 1 violation: 0 errors, 1 warning

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_lint_malformed_json_is_internal_error() -> Result<()> {
    let test = CliTest::with_file("ruff.json", "[{")?;

    let output = test.lint_command().arg("ruff.json").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to normalize linter output"));
    Ok(())
}

#[test]
fn test_lint_missing_file_is_internal_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.lint_command().arg("nope.txt").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read file: nope.txt"));
    Ok(())
}
