use std::fs;

use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_paired_annotations() -> Result<()> {
    let test = CliTest::with_file(
        "src/auth.js",
        r#"
// REQUIRE: login
function login() {
    // SATISFIED: login
}
"#,
    )?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "✓ Checked 1 file - no issues found\n");

    Ok(())
}

#[test]
fn test_missing_satisfied() -> Result<()> {
    let test = CliTest::with_file("a.js", "let x = 1; // REQUIRE: y\n")?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert_snapshot!(stdout, @r"
    error: Missing corresponding SATISFIED for REQUIRE: y  missing-satisfied
      --> ./a.js:1:23
      |
    1 | let x = 1; // REQUIRE: y
      |                       ^

    ✘ 1 problems (1 error, 0 warnings)
    1 file(s) scanned
    ");

    Ok(())
}

#[test]
fn test_missing_require() -> Result<()> {
    let test = CliTest::with_file("run.py", "print(1)\n# SATISFIED: never asked\n")?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.starts_with(
        "error: Missing corresponding REQUIRE for SATISFIED: never asked  missing-require\n"
    ));
    assert!(stdout.contains("  --> ./run.py:2:13\n"));

    Ok(())
}

#[test]
fn test_duplicate_is_warning() -> Result<()> {
    let test = CliTest::with_file(
        "a.c",
        "// REQUIRE: a\n// SATISFIED: a\n// REQUIRE: a\n",
    )?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0);
    assert!(stdout.starts_with("warning: Duplicated REQUIRE: a  duplicated-require\n"));
    assert!(stdout.contains("  --> ./a.c:3:12\n"));
    assert!(stdout.contains("  = note: First defined at ./a.c:1:12\n"));
    assert!(stdout.contains("✘ 1 problems (0 errors, 1 warning)\n"));

    Ok(())
}

#[test]
fn test_multiline_block_annotation() -> Result<()> {
    let test = CliTest::with_file(
        "lib.c",
        r#"/*
 * REQUIRE: multi
 *   line id
 */
int f(void);
// SATISFIED: multi line id
"#,
    )?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "✓ Checked 1 file - no issues found\n");

    Ok(())
}

#[test]
fn test_external_annotations_pair_across_files() -> Result<()> {
    let test = CliTest::with_file("src/a.rs", "// REQUIRE(extern): shared id\n")?;
    test.write_file("scripts/b.py", "# SATISFIED(extern): shared id\n")?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "✓ Checked 2 files - no issues found\n");

    Ok(())
}

#[test]
fn test_external_annotation_without_pair() -> Result<()> {
    let test = CliTest::with_file("src/a.rs", "// REQUIRE(extern): shared id\n")?;
    test.write_file("src/b.rs", "// SATISFIED: shared id\n")?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains(
        "error: Missing corresponding SATISFIED for REQUIRE(extern): shared id  missing-satisfied\n"
    ));
    assert!(stdout.contains("  --> ./src/a.rs:1:20\n"));
    assert!(stdout.contains("  --> ./src/b.rs:1:14\n"));
    assert!(stdout.contains("✘ 2 problems (2 errors, 0 warnings)\n"));
    assert!(stdout.ends_with("2 file(s) scanned\n"));

    Ok(())
}

#[test]
fn test_lang_option_overrides_extension() -> Result<()> {
    let test = CliTest::with_file("x.py", "// REQUIRE: a\n")?;

    let (code, _, _) = run(test.check_command())?;
    assert_eq!(code, 0);

    let mut cmd = test.check_command();
    cmd.args(["--lang", "C"]);
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, 1);
    assert!(stdout.contains("  --> ./x.py:1:12\n"));

    Ok(())
}

#[test]
fn test_unknown_lang_option() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.check_command();
    cmd.args(["--lang", "cobol"]);
    let (code, _, stderr) = run(cmd)?;

    assert_eq!(code, 2);
    assert!(stderr.contains("unknown language 'cobol'"));

    Ok(())
}

#[test]
fn test_exclude_option() -> Result<()> {
    let test = CliTest::with_file("a.js", "// REQUIRE: kept\n")?;
    test.write_file("gen/b.js", "// REQUIRE: generated\n")?;

    let mut cmd = test.check_command();
    cmd.args(["-x", "gen/**"]);
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, 1);
    assert!(stdout.contains("REQUIRE: kept"));
    assert!(!stdout.contains("generated"));
    assert!(stdout.ends_with("1 file(s) scanned\n"));

    Ok(())
}

#[test]
fn test_include_option() -> Result<()> {
    let test = CliTest::with_file("a.js", "// REQUIRE: js\n")?;
    test.write_file("b.py", "# REQUIRE: py\n")?;

    let mut cmd = test.check_command();
    cmd.args(["--include", "**/*.py"]);
    let (_, stdout, _) = run(cmd)?;

    assert!(stdout.contains("REQUIRE: py"));
    assert!(!stdout.contains("REQUIRE: js"));

    Ok(())
}

#[test]
fn test_path_argument() -> Result<()> {
    let test = CliTest::with_file("src/a.rs", "// REQUIRE: in src\n")?;
    test.write_file("other/b.rs", "// REQUIRE: elsewhere\n")?;

    let mut cmd = test.check_command();
    cmd.arg("src");
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, 1);
    assert!(stdout.contains("  --> src/a.rs:1:12\n"));
    assert!(!stdout.contains("elsewhere"));

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::with_file(".reqsatrc.json", r#"{ "ignores": ["legacy/**"] }"#)?;
    test.write_file("legacy/old.js", "// REQUIRE: old\n")?;
    test.write_file("new.js", "// REQUIRE: new\n// SATISFIED: new\n")?;

    let (code, stdout, _) = run(test.check_command())?;

    // The config file itself is scanned too.
    assert_eq!(code, 0);
    assert_eq!(stdout, "✓ Checked 2 files - no issues found\n");

    Ok(())
}

#[test]
fn test_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".reqsatrc.json", r#"{ "lang": "cobol" }"#)?;

    let (code, _, stderr) = run(test.check_command())?;

    assert_eq!(code, 2);
    assert_eq!(stderr, "Error: Unknown language in 'lang': \"cobol\"\n");

    Ok(())
}

#[test]
fn test_verbose_output() -> Result<()> {
    let test = CliTest::with_file("a.js", "// REQUIRE: a\n// SATISFIED: a\n")?;
    test.write_file("b.c", "/* REQUIRE: never closed\n")?;

    let mut cmd = test.check_command();
    cmd.arg("-v");
    let (code, _, stderr) = run(cmd)?;

    assert_eq!(code, 0);
    assert!(stderr.contains("Note: No .reqsatrc.json found, using default configuration\n"));
    assert!(stderr.contains("lang=auto\n"));
    assert!(stderr.contains("include=**/*\n"));
    assert!(stderr.contains("./a.js local 1/1 extern 0/0\n"));
    assert!(stderr.contains("./b.c:1:3 unterminated block comment ignored\n"));

    Ok(())
}

#[test]
fn test_unreadable_file_warning() -> Result<()> {
    let test = CliTest::with_file("a.js", "// REQUIRE: a\n// SATISFIED: a\n")?;
    fs::write(test.root().join("blob.bin"), [0xff, 0xfe, 0x00, 0x80])?;

    let (code, stdout, stderr) = run(test.check_command())?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "✓ Checked 1 file - no issues found\n");
    assert_eq!(
        stderr,
        "warning: 1 file(s) could not be read (use -v for details)\n"
    );

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(test.command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("check"));

    Ok(())
}
