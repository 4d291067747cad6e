//! CLI surface tests for the `faxc` binary: flag parsing, emit modes, and
//! process exit codes. Exercised via `assert_cmd` against the real binary
//! rather than `Config`/`Session` directly, so a change to argument
//! handling in `main.rs` is caught here even if `lib.rs`'s own API stays
//! stable.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn faxc() -> Command {
    Command::cargo_bin("faxc").expect("faxc binary should build")
}

fn write_fixture(dir: &tempfile::TempDir, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create fixture");
    file.write_all(source.as_bytes()).expect("write fixture");
    path
}

#[test]
fn no_input_files_is_a_usage_error() {
    faxc().assert().failure();
}

#[test]
fn well_typed_program_exits_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "ok.fax", "let x: i32 = 1;");
    faxc().arg(&path).assert().success();
}

#[test]
fn type_error_exits_with_failure_and_reports_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "bad.fax", "let x: u8 = 300;");
    faxc()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn emit_tokens_prints_the_token_stream() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "ok.fax", "let x: i32 = 1;");
    faxc()
        .arg(&path)
        .arg("--emit-tokens")
        .assert()
        .success()
        .stdout(predicate::str::contains("Let"));
}

#[test]
fn emit_ast_prints_the_unbound_tree() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "ok.fax", "let x: i32 = 1;");
    faxc()
        .arg(&path)
        .arg("--emit-ast")
        .assert()
        .success()
        .stdout(predicate::str::contains("Variable"));
}

#[test]
fn unknown_flag_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "ok.fax", "let x: i32 = 1;");
    faxc().arg(&path).arg("--bogus-flag").assert().failure();
}

#[test]
fn werror_turns_a_warning_into_a_failing_build() {
    let dir = tempfile::tempdir().unwrap();
    let source = r#"
        enum Color { Red, Green }
        fn pick(): i32 {
            let c: Color = Color.Red;
            match c {
                Color.Red => 1,
            }
        }
    "#;
    let path = write_fixture(&dir, "warn.fax", source);
    faxc().arg(&path).assert().success();
    faxc().arg(&path).arg("-Werror").assert().failure();
}
