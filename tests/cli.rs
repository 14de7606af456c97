use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn test_help_lists_options() {
    cargo_bin_cmd!("zcalc")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--history"));
}

#[test]
fn test_tokens_from_arguments() {
    let config = config_file("");
    cargo_bin_cmd!("zcalc")
        .arg("--config")
        .arg(config.path())
        .args(["3", "+", "4", "*", "2", "="])
        .assert()
        .success()
        .stdout("14\n");
}

#[test]
fn test_history_output() {
    let config = config_file("");
    cargo_bin_cmd!("zcalc")
        .arg("--config")
        .arg(config.path())
        .arg("--history")
        .arg("5 fact")
        .assert()
        .success()
        .stdout(predicate::str::contains("@0  !(5) = 120"));
}

#[test]
fn test_json_snapshot() {
    let config = config_file("");
    let output = cargo_bin_cmd!("zcalc")
        .arg("--config")
        .arg(config.path())
        .args(["--json", "2", "+"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["display"], "2");
    assert_eq!(snapshot["pending"]["operator"], "+");
    assert_eq!(snapshot["awaiting_new_entry"], true);
}

#[test]
fn test_config_grouping_and_error_text() {
    let config = config_file("group_digits = true\nerror_text = \"E\"\n");
    cargo_bin_cmd!("zcalc")
        .arg("--config")
        .arg(config.path())
        .arg("1000 * 1000 =")
        .assert()
        .success()
        .stdout("1,000,000\n");

    cargo_bin_cmd!("zcalc")
        .arg("--config")
        .arg(config.path())
        .arg("1 / 0 =")
        .assert()
        .success()
        .stdout("E\n");
}

#[test]
fn test_unknown_token_fails() {
    let config = config_file("");
    cargo_bin_cmd!("zcalc")
        .arg("--config")
        .arg(config.path())
        .arg("2 banana")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown token"));
}

#[test]
fn test_interactive_session() {
    let config = config_file("");
    cargo_bin_cmd!("zcalc")
        .arg("--config")
        .arg(config.path())
        .write_stdin("9 ms c\n2 +\n# bad\n3 =\nquit\n1 +\n")
        .assert()
        .success()
        .stdout("0  [M]\n2 + | 2  [M]\n5  [M]\n")
        .stderr(predicate::str::contains("unknown token"));
}

#[test]
fn test_interactive_commands_ignore_case() {
    let config = config_file("");
    cargo_bin_cmd!("zcalc")
        .arg("--config")
        .arg(config.path())
        .write_stdin("6 * 7 =\nHISTORY\nQuit\n1 +\n")
        .assert()
        .success()
        .stdout("42\n@0  6 * 7 = 42\n")
        .stderr(predicate::str::contains("unknown token").not());
}
