use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write test file");
}

#[test]
fn prints_document_with_sorted_keys() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    write_file(&input, r#"{"b":[true,null],"a":1}"#);

    let expected = "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null\n  ]\n}\n";

    cargo_bin_cmd!("jsonl")
        .arg(&input)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn compact_output_with_zero_indent() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    write_file(&input, "[[1,2],3.5]");

    cargo_bin_cmd!("jsonl")
        .arg(&input)
        .args(["--indent", "0"])
        .assert()
        .success()
        .stdout("[[1,2],3.5]\n");
}

#[test]
fn reads_stdin_when_no_input() {
    cargo_bin_cmd!("jsonl")
        .args(["--indent", "0"])
        .write_stdin(r#"{"k":"v"}"#)
        .assert()
        .success()
        .stdout("{\"k\":\"v\"}\n");
}

#[test]
fn get_prints_nested_value() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    write_file(
        &input,
        r#"{"meta":{"status":200},"data":[{"slug":"first-post"}]}"#,
    );

    cargo_bin_cmd!("jsonl")
        .arg(&input)
        .args(["--get", "data.0.slug"])
        .assert()
        .success()
        .stdout("\"first-post\"\n");
}

#[test]
fn get_missing_path_fails() {
    cargo_bin_cmd!("jsonl")
        .args(["--get", "nope"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(contains("ERROR  path not found: nope"));
}

#[test]
fn tokens_lists_one_token_per_line() {
    cargo_bin_cmd!("jsonl")
        .arg("--tokens")
        .write_stdin("{\"a\":\ntrue}")
        .assert()
        .success()
        .stdout("1\tobjectOpen\n1\tstring\ta\n1\tcolon\n2\tboolean\ttrue\n2\tobjectClose\n2\tendOfInput\n");
}

#[test]
fn stats_reports_release() {
    cargo_bin_cmd!("jsonl")
        .args(["--stats", "--indent", "0"])
        .write_stdin(r#"{"a":[1,2]}"#)
        .assert()
        .success()
        .stdout(
            contains("{\"a\":[1,2]}")
                .and(contains("Released 5 allocations (3 scalars, 1 arrays, 1 maps)")),
        );
}

#[test]
fn strict_flag_rejects_missing_comma() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    write_file(&input, r#"{"a":1 "b":2}"#);

    cargo_bin_cmd!("jsonl").arg(&input).assert().success();

    cargo_bin_cmd!("jsonl")
        .arg(&input)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("expected comma but got string on line 1"));
}

#[test]
fn lex_error_is_reported() {
    cargo_bin_cmd!("jsonl")
        .write_stdin(r#"{"a":"x"#)
        .assert()
        .failure()
        .stderr(contains("ERROR  unterminated string starting on line 1"));
}

#[test]
fn writes_output_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    let output = dir.path().join("out.json");
    write_file(&input, "[1]");

    cargo_bin_cmd!("jsonl")
        .arg(&input)
        .args(["--indent", "0", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&output).expect("read output"), "[1]\n");
}

#[test]
fn missing_input_file_fails() {
    cargo_bin_cmd!("jsonl")
        .arg("does-not-exist.json")
        .assert()
        .failure()
        .stderr(contains("ERROR"));
}

#[test]
fn escaped_strings_print_stably() {
    let input = r#"{"q":"say \"hi\"","p":"C:\\dir","n":"a
b"}"#;
    let first = cargo_bin_cmd!("jsonl")
        .args(["--indent", "0"])
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(
        String::from_utf8_lossy(&first),
        "{\"n\":\"a\\nb\",\"p\":\"C:\\\\dir\",\"q\":\"say \\\"hi\\\"\"}\n"
    );

    cargo_bin_cmd!("jsonl")
        .args(["--indent", "0"])
        .write_stdin(first.clone())
        .assert()
        .success()
        .stdout(first);
}

#[test]
fn max_depth_above_ceiling_is_rejected() {
    cargo_bin_cmd!("jsonl")
        .args(["--max-depth", "100000"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(contains("must be between 1 and 512"));
}
