use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, run_json};

const FAILED_LOG: &str = r"This is pdfTeX, Version 3.141592653-2.6-1.40.25 (TeX Live 2023) (preloaded format=pdflatex)
entering extended mode
(./main.tex
LaTeX2e <2023-11-01> patch level 1
(./sections/intro.tex
LaTeX Warning: Reference `fig:arch' on page 1 undefined on input line 8.

! Undefined control sequence.
l.12 \includegrapics
                    
)
! Missing $ inserted.
<inserted text> 
                $
l.20 a_
       b
)
";

#[test]
fn test_tex_json_report() -> Result<()> {
    let test = CliTest::with_file("main.log", FAILED_LOG)?;

    let mut cmd = test.tex_command();
    cmd.args(["main.log", "--exit-code", "1", "--artifact", "main.pdf"]);
    let (code, json) = run_json(cmd)?;

    assert_eq!(code, Some(1));
    assert_eq!(json["success"], false);
    assert_eq!(json["exit_code"], 1);
    assert_eq!(json["log_file"], "main.log");
    assert_eq!(json.get("output_artifact"), None);
    assert_eq!(json["error_count"], 2);
    assert_eq!(json["warning_count"], 1);
    assert_eq!(json["summary"], "1 warnings, 2 errors found");

    let diagnostics: Vec<_> = json["diagnostics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| (d["severity"].clone(), d["source_file"].clone(), d["line"].clone()))
        .collect();
    assert_eq!(
        diagnostics,
        vec![
            (json!("warning"), json!("./sections/intro.tex"), json!(8)),
            (json!("error"), json!("./sections/intro.tex"), json!(12)),
            (json!("error"), json!("./main.tex"), json!(20)),
        ]
    );
    Ok(())
}

#[test]
fn test_tex_error_with_zero_exit_fails() -> Result<()> {
    let test = CliTest::with_file("main.log", "! Undefined control sequence.\nl.42 \\foo\n")?;

    let mut cmd = test.tex_command();
    cmd.args(["main.log", "--exit-code", "0"]);
    let (code, json) = run_json(cmd)?;

    assert_eq!(code, Some(1));
    assert_eq!(json["success"], false);
    assert_eq!(json["diagnostics"][0]["line"], 42);
    Ok(())
}

#[test]
fn test_tex_success_reports_artifact() -> Result<()> {
    let test = CliTest::with_file(
        "main.log",
        "(./main.tex\nLaTeX Font Warning: Font shape `OT1/cmr/bx/sc' undefined\n(Font)              using `OT1/cmr/bx/n' instead on input line 5.\n)\nOutput written on main.pdf (1 page, 2048 bytes).\n",
    )?;

    assert_cmd_snapshot!(test.tex_command().args(["main.log", "--exit-code", "0", "--artifact", "main.pdf"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: LaTeX Font Warning: Font shape `OT1/cmr/bx/sc' undefined using `OT1/cmr/bx/n' instead
      --> ./main.tex:5

    ✓ Compilation succeeded: 1 warnings, 0 errors found -> main.pdf

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_tex_without_exit_code_fails() -> Result<()> {
    let test = CliTest::with_file("main.log", "")?;

    assert_cmd_snapshot!(test.tex_command().arg("main.log"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ Compilation failed (compiler did not run): 0 warnings, 0 errors found

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_tex_latex_error_line_after_help_text() -> Result<()> {
    let test = CliTest::with_file(
        "main.log",
        "(./main.tex\n! LaTeX Error: Environment foo undefined.\n\nSee the LaTeX manual or LaTeX Companion for explanation.\nType  H <return>  for immediate help.\n ...\n\nl.5 \\begin{foo}\n\n)\n",
    )?;

    let mut cmd = test.tex_command();
    cmd.args(["main.log", "--exit-code", "1"]);
    let (_, json) = run_json(cmd)?;

    assert_eq!(json["error_count"], 1);
    assert_eq!(
        json["diagnostics"][0],
        json!({
            "severity": "error",
            "message": "LaTeX Error: Environment foo undefined.",
            "source_file": "./main.tex",
            "line": 5,
        })
    );
    Ok(())
}

#[test]
fn test_tex_negative_exit_code() -> Result<()> {
    let test = CliTest::with_file("main.log", "")?;

    let mut cmd = test.tex_command();
    cmd.args(["main.log", "--exit-code", "-1"]);
    let (code, json) = run_json(cmd)?;

    assert_eq!(code, Some(1));
    assert_eq!(json["exit_code"], -1);
    Ok(())
}

#[test]
fn test_tex_log_with_invalid_utf8() -> Result<()> {
    let test = CliTest::new()?;
    std::fs::write(
        test.root().join("main.log"),
        b"(./main.tex\n! Package inputenc Error: Invalid UTF-8 byte \xe9.\nl.3 caf\xe9\n\n)\n",
    )?;

    let mut cmd = test.tex_command();
    cmd.args(["main.log", "--exit-code", "1"]);
    let (_, json) = run_json(cmd)?;

    assert_eq!(json["error_count"], 1);
    assert_eq!(json["diagnostics"][0]["line"], 3);
    Ok(())
}
