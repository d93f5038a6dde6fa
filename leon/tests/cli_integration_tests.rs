// leon/tests/cli_integration_tests.rs
//! End-to-end tests of the `leon` binary.
//!
//! Every test points `LEON_RULES_FILE` at a fresh temporary directory so the
//! user's real rule file is never read or written.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use strip_ansi_escapes::strip as strip_ansi_escapes_fn;

fn leon(rules_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("leon").unwrap();
    cmd.env("LEON_RULES_FILE", rules_dir.path().join("rules.yaml"))
        .env_remove("RUST_LOG");
    cmd
}

fn plain(bytes: &[u8]) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes_fn(bytes)).to_string()
}

#[test]
fn clean_positional_text() -> Result<()> {
    let dir = TempDir::new()?;
    let output = leon(&dir)
        .args(["clean", "go http://x.test/?a=1&wt_mc=2 now"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(plain(&output.stdout), "go http://x.test/?a=1 now\n");
    assert!(plain(&output.stderr).contains("1 of 1 URL(s) cleaned."));
    Ok(())
}

#[test]
fn clean_reads_stdin_and_keeps_its_newline() -> Result<()> {
    let dir = TempDir::new()?;
    leon(&dir)
        .args(["clean", "--no-summary"])
        .write_stdin("see http://a.test/p?k=1&utm_source=x\nbye\n")
        .assert()
        .success()
        .stdout("see http://a.test/p?k=1\nbye\n")
        .stderr(predicate::str::is_empty());
    Ok(())
}

#[test]
fn clean_reads_input_file_and_writes_output_file() -> Result<()> {
    let dir = TempDir::new()?;
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "http://x.test/?wt_mc=9\n")?;

    leon(&dir)
        .args(["-q", "clean", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&output)?, "http://x.test/\n");
    Ok(())
}

#[test]
fn clean_decode_flag() -> Result<()> {
    let dir = TempDir::new()?;
    leon(&dir)
        .args(["clean", "--no-summary", "-u", "http://x.test/?q=a%20b&wt_mc=1"])
        .assert()
        .success()
        .stdout("http://x.test/?q=a b\n");
    Ok(())
}

#[test]
fn clean_urls_only() -> Result<()> {
    let dir = TempDir::new()?;
    leon(&dir)
        .args(["clean", "--urls-only", "a http://x.test/?wt_mc=1 b https://y.test/?k=v."])
        .assert()
        .success()
        .stdout("http://x.test/\nhttps://y.test/?k=v\n");
    Ok(())
}

#[test]
fn clean_json_output() -> Result<()> {
    let dir = TempDir::new()?;
    let output = leon(&dir)
        .args(["clean", "--json", "see http://x.test/?wt_mc=1"])
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["cleaned_text"], "see http://x.test/");
    assert_eq!(value["original_text"], "see http://x.test/?wt_mc=1");
    assert_eq!(value["urls"], serde_json::json!(["http://x.test/"]));
    assert_eq!(value["matches"][0]["start"], 4);
    Ok(())
}

#[test]
fn clean_diff_view() -> Result<()> {
    let dir = TempDir::new()?;
    let output = leon(&dir)
        .args(["clean", "--diff", "--no-summary", "go http://x.test/?wt_mc=1"])
        .output()?;
    let stdout = plain(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("--- Diff View ---"));
    assert!(stdout.contains("- go http://x.test/?wt_mc=1"));
    assert!(stdout.contains("+ go http://x.test/"));
    Ok(())
}

#[test]
fn text_without_urls_passes_through() -> Result<()> {
    let dir = TempDir::new()?;
    leon(&dir)
        .args(["clean", "nothing ?utm_source=x here"])
        .assert()
        .success()
        .stdout("nothing ?utm_source=x here\n")
        .stderr(predicate::str::contains("0 of 0 URL(s) cleaned."));
    Ok(())
}

#[test]
fn user_rule_lifecycle() -> Result<()> {
    let dir = TempDir::new()?;
    let text = "http://x.test/?fbclid=abc&k=1";

    leon(&dir)
        .args(["rules", "add", "--kind", "parameter", "--name", "fbclid", "--description", "Facebook", "fbclid"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Rule 'fbclid' added."));
    assert!(dir.path().join("rules.yaml").exists());

    leon(&dir)
        .args(["clean", "--no-summary", text])
        .assert()
        .success()
        .stdout("http://x.test/?k=1\n");

    leon(&dir)
        .args(["clean", "--no-summary", "-x", "fbclid", text])
        .assert()
        .success()
        .stdout(format!("{}\n", text));

    leon(&dir).args(["rules", "disable", "fbclid"]).assert().success();
    leon(&dir)
        .args(["clean", "--no-summary", text])
        .assert()
        .success()
        .stdout(format!("{}\n", text));

    leon(&dir).args(["rules", "enable", "fbclid"]).assert().success();
    leon(&dir).args(["rules", "remove", "fbclid"]).assert().success();
    leon(&dir)
        .args(["clean", "--no-summary", text])
        .assert()
        .success()
        .stdout(format!("{}\n", text));
    Ok(())
}

#[test]
fn rules_list_shows_builtins_then_user_rules() -> Result<()> {
    let dir = TempDir::new()?;
    leon(&dir)
        .args(["rules", "add", "--kind", "pattern", "--name", "mc", "[?&]mc_eid=[^&]*"])
        .assert()
        .success();

    let output = leon(&dir).args(["rules", "list", "--json"]).output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let names: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["wt_mc", "ga_* & utm_*", "mc"]);
    assert_eq!(value[2]["builtin"], false);

    let table = leon(&dir).args(["rules", "list"]).output()?;
    let table = plain(&table.stdout);
    assert!(table.contains("built-in"));
    assert!(table.contains("[?&]mc_eid=[^&]*"));
    Ok(())
}

#[test]
fn invalid_pattern_is_rejected_without_writing() -> Result<()> {
    let dir = TempDir::new()?;
    leon(&dir)
        .args(["rules", "add", "--kind", "pattern", "--name", "broken", "[?&](utm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken"));
    assert!(!dir.path().join("rules.yaml").exists());
    Ok(())
}

#[test]
fn builtin_rules_cannot_be_removed_or_disabled() -> Result<()> {
    let dir = TempDir::new()?;
    leon(&dir)
        .args(["rules", "remove", "wt_mc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("built in"));
    leon(&dir)
        .args(["rules", "disable", "ga_* & utm_*"])
        .assert()
        .failure();
    leon(&dir)
        .args(["rules", "remove", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sanitizer named 'nope'"));
    Ok(())
}

#[test]
fn corrupt_rules_file_is_reported() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join("rules.yaml"),
        "rules:\n  - kind: pattern\n    name: bad\n    pattern: \"(\"\n",
    )?;
    leon(&dir)
        .args(["clean", "http://x.test/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid rules file"));
    Ok(())
}

#[test]
fn custom_theme_file_is_accepted() -> Result<()> {
    let dir = TempDir::new()?;
    let theme = dir.path().join("theme.yaml");
    fs::write(&theme, "url_cleaned: brightcyan\n")?;
    leon(&dir)
        .arg("--theme")
        .arg(&theme)
        .args(["clean", "http://x.test/?wt_mc=1"])
        .assert()
        .success()
        .stdout("http://x.test/\n");
    Ok(())
}
