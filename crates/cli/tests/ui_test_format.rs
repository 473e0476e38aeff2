//! # UI Tests for the jsfmt binary
#![cfg(not(miri))]

use assert_cmd::Command;

fn jsfmt() -> Command {
  Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

#[test]
fn formats_stdin_to_stdout() {
  jsfmt()
    .arg("--stdin")
    .write_stdin("let x=1")
    .assert()
    .success()
    .stdout("let x = 1;\n");
}

#[test]
fn reads_stdin_when_no_files_are_given() {
  jsfmt()
    .write_stdin("a   +   b")
    .assert()
    .success()
    .stdout("a + b;\n");
}

#[test]
fn respects_formatting_flags() {
  jsfmt()
    .args(["--stdin", "--single-quote", "--no-semi"])
    .write_stdin("let s = \"a\"")
    .assert()
    .success()
    .stdout("let s = 'a'\n");

  jsfmt()
    .args(["--stdin", "--print-width", "8"])
    .write_stdin("f(aaaa, bbbb)")
    .assert()
    .success()
    .stdout("f(\n  aaaa,\n  bbbb\n);\n");
}

#[test]
fn list_different_reports_unformatted_input() {
  jsfmt()
    .args(["--stdin", "-l"])
    .write_stdin("let   x = 1")
    .assert()
    .code(1)
    .stdout("(stdin)\n");

  jsfmt()
    .args(["--stdin", "-l"])
    .write_stdin("let x = 1;\n")
    .assert()
    .success()
    .stdout("");
}

#[test]
fn parse_errors_exit_with_code_two() {
  jsfmt()
    .arg("--stdin")
    .write_stdin("let x = ;")
    .assert()
    .code(2);
}

#[test]
fn missing_files_exit_with_code_two() {
  jsfmt()
    .arg("./does-not-exist.js")
    .assert()
    .code(2);
}

#[test]
fn invalid_option_values_are_fatal() {
  jsfmt()
    .args(["--stdin", "--trailing-comma", "banana"])
    .write_stdin("a")
    .assert()
    .code(1);

  jsfmt()
    .args(["--stdin", "--parser", "esoteric"])
    .write_stdin("a")
    .assert()
    .code(1);
}

#[test]
fn write_conflicts_with_debug_check() {
  jsfmt()
    .args(["--write", "--debug-check", "file.js"])
    .assert()
    .failure();
}

#[test]
fn debug_check_passes_for_ordinary_input() {
  jsfmt()
    .args(["--stdin", "--debug-check"])
    .write_stdin("let x = { a: 1 }")
    .assert()
    .success()
    .stdout("");
}

#[test]
fn debug_print_doc_shows_the_layout_ir() {
  let output = jsfmt()
    .args(["--stdin", "--debug-print-doc"])
    .write_stdin("f(a)")
    .output()
    .unwrap();

  assert!(output.status.success());
  let stdout = String::from_utf8(output.stdout).unwrap();
  assert!(stdout.contains("group"));
  assert!(stdout.contains("\"f\""));
}

#[test]
fn write_rewrites_the_file_in_place() {
  let path = std::env::temp_dir().join(format!("jsfmt-write-test-{}.js", std::process::id()));
  std::fs::write(&path, "let   x =  1").unwrap();

  jsfmt()
    .args(["--write", path.to_str().unwrap()])
    .assert()
    .success();

  let rewritten = std::fs::read_to_string(&path).unwrap();
  std::fs::remove_file(&path).ok();
  assert_eq!(rewritten, "let x = 1;\n");
}

#[test]
fn node_modules_paths_are_skipped_by_default() {
  jsfmt()
    .arg("node_modules/example.js")
    .assert()
    .success()
    .stdout("");
}
