use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, run_json, stderr};

const APP: &str = r#"import os
from typing import (
    Any,
    Dict,
)


class Service:
    def handle(self, request: Dict[str, Any], *, retries: int = 3) -> bool:
        def inner():
            pass
        return True


async def main(argv=None):
    pass
"#;

#[test]
fn test_analyze_json_report() -> Result<()> {
    let test = CliTest::with_file("src/app.py", APP)?;
    test.write_file(
        "ruff.txt",
        "src/app.py:1:8: F401 [*] `os` imported but unused\nsrc/app.py:9:80: E501 Line too long (92 > 79)\nFound 2 errors.\n",
    )?;

    let mut cmd = test.analyze_command();
    cmd.args(["src", "--lint-output", "ruff.txt"]);
    let (code, json) = run_json(cmd)?;
    assert_eq!(code, Some(1));

    let report = &json[0];
    assert_eq!(report["file_path"], "src/app.py");
    assert_eq!(report["line_count"], 16);
    assert_eq!(report["status"], "has-errors");
    assert_eq!(report["lint"], json!({ "status": "ran" }));

    let imports: Vec<_> = report["imports"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| (i["module"].clone(), i["names"].clone(), i["location"]["line"].clone()))
        .collect();
    assert_eq!(
        imports,
        vec![
            (json!("os"), json!([]), json!(1)),
            (json!("typing"), json!(["Any", "Dict"]), json!(2)),
        ]
    );

    let functions: Vec<_> = report["functions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["name"].clone(), f["is_nested"].clone(), f["is_async"].clone()))
        .collect();
    assert_eq!(
        functions,
        vec![
            (json!("handle"), json!(true), json!(false)),
            (json!("inner"), json!(true), json!(false)),
            (json!("main"), json!(false), json!(true)),
        ]
    );

    let handle = &report["functions"][0];
    assert_eq!(handle["scope"], "Service");
    assert_eq!(handle["return_annotation"], "bool");
    assert_eq!(handle["parameters"][1]["annotation"], "Dict[str, Any]");
    assert_eq!(handle["parameters"][2]["kind"], "keyword-only");
    assert_eq!(handle["parameters"][2]["default"], "3");

    let rules: Vec<_> = report["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| (v["rule"].clone(), v["severity"].clone(), v["fixable"].clone()))
        .collect();
    assert_eq!(
        rules,
        vec![
            (json!("F401"), json!("error"), json!(true)),
            (json!("E501"), json!("warning"), json!(false)),
        ]
    );

    Ok(())
}

#[test]
fn test_analyze_without_lint_output() -> Result<()> {
    let test = CliTest::with_file("app.py", "import json\n")?;

    let mut cmd = test.analyze_command();
    cmd.arg("app.py");
    let (code, json) = run_json(cmd)?;

    assert_eq!(code, Some(0));
    assert_eq!(json[0]["status"], "clean");
    assert_eq!(json[0]["lint"]["status"], "unavailable");
    assert_eq!(json[0]["violations"], json!([]));
    Ok(())
}

#[test]
fn test_analyze_human_output() -> Result<()> {
    let test = CliTest::with_file("src/app.py", "import os\n\n\ndef main():\n    return 1\n")?;
    test.write_file("ruff.txt", "src/app.py:1:8: F401 `os` imported but unused\n")?;

    assert_cmd_snapshot!(test.analyze_command().args(["src", "--lint-output", "ruff.txt"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error: `os` imported but unused  F401
      --> src/app.py:1:8
      |
    1 | import os
      |        ^

    src/app.py: 5 lines, 1 import, 1 function
    ✘ Analyzed 1 file: 1 error, 0 warnings

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_analyze_warnings_only_exits_zero() -> Result<()> {
    let test = CliTest::with_file("app.py", "x = 1\n")?;
    test.write_file("ruff.txt", "app.py:1:6: W292 No newline at end of file\n")?;

    assert_cmd_snapshot!(test.analyze_command().args(["app.py", "--lint-output", "ruff.txt"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: No newline at end of file  W292
      --> app.py:1:6
      |
    1 | x = 1
      |      ^

    app.py: 1 line, 0 imports, 0 functions
    ✘ Analyzed 1 file: 0 errors, 1 warning

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_analyze_respects_config_ignores_and_severity() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".diagnostrc.json",
        r#"{ "ignores": ["**/generated/**"], "severity": { "F401": "info" } }"#,
    )?;
    test.write_file("pkg/app.py", "import os\n")?;
    test.write_file("pkg/generated/schema.py", "import sys\n")?;
    test.write_file("ruff.txt", "pkg/app.py:1:8: F401 `os` imported but unused\n")?;

    let mut cmd = test.analyze_command();
    cmd.args(["pkg", "--lint-output", "ruff.txt"]);
    let (code, json) = run_json(cmd)?;

    assert_eq!(code, Some(0));
    let files = json.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["file_path"], "pkg/app.py");
    assert_eq!(files[0]["violations"][0]["severity"], "info");
    assert_eq!(files[0]["status"], "clean");
    Ok(())
}

#[test]
fn test_analyze_malformed_json_lint_output() -> Result<()> {
    let test = CliTest::with_file("app.py", "def f(:\n")?;
    test.write_file("ruff.json", "[{\"code\": \"F401\"")?;

    let mut cmd = test.analyze_command();
    cmd.args(["app.py", "--lint-output", "ruff.json"]);
    let (code, json) = run_json(cmd)?;

    assert_eq!(code, Some(0));
    assert_eq!(json[0]["lint"]["status"], "failed");
    assert_eq!(json[0]["functions"][0]["name"], "f");
    assert_eq!(json[0]["functions"][0]["parameters"], json!([]));
    Ok(())
}

#[test]
fn test_analyze_reads_non_utf8_source() -> Result<()> {
    let test = CliTest::with_file("ok.py", "import json\n")?;
    std::fs::write(test.root().join("latin1.py"), b"import os\nname = '\xe9'\n")?;

    let mut cmd = test.analyze_command();
    cmd.arg(".");
    let (code, json) = run_json(cmd)?;

    assert_eq!(code, Some(0));
    let files: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| (r["file_path"].clone(), r["imports"][0]["module"].clone()))
        .collect();
    assert_eq!(
        files,
        vec![
            (json!("./latin1.py"), json!("os")),
            (json!("./ok.py"), json!("json")),
        ]
    );
    assert_eq!(json[0]["line_count"], 2);
    Ok(())
}

#[test]
fn test_analyze_missing_path_is_internal_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.analyze_command().arg("missing").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Path does not exist: missing"));
    Ok(())
}

#[test]
fn test_analyze_invalid_config_is_internal_error() -> Result<()> {
    let test = CliTest::with_file("app.py", "")?;
    test.write_file(".diagnostrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.analyze_command().arg("app.py").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("ignores"));
    Ok(())
}
