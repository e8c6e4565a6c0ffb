//! CLI integration tests for the `extract`/`parse`/`tld`/`load-psl`
//! subcommands, using `assert_cmd`/`predicates` against the built binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn bin() -> Command {
    Command::cargo_bin("urlscan").unwrap()
}

#[test]
fn parse_prints_decomposed_url() {
    bin()
        .args(["parse", "http://user@example.com:8080/path?x=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("host:     example.com"))
        .stdout(predicate::str::contains("port:     8080"))
        .stdout(predicate::str::contains("path:     /path"));
}

#[test]
fn parse_reports_error_on_bad_input() {
    bin().args(["parse", ""]).assert().failure();
}

#[test]
fn tld_reports_matched_span() {
    let mut psl = tempfile::NamedTempFile::new().unwrap();
    writeln!(psl, "com\nco.uk").unwrap();

    bin()
        .args(["tld", "example.co.uk", "--psl-file"])
        .arg(psl.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("co.uk"));
}

#[test]
fn tld_fails_when_no_suffix_matches() {
    let mut psl = tempfile::NamedTempFile::new().unwrap();
    writeln!(psl, "com").unwrap();

    bin()
        .args(["tld", "example.nonexistenttld", "--psl-file"])
        .arg(psl.path())
        .assert()
        .failure();
}

#[test]
fn load_psl_reports_accepted_and_skipped_counts() {
    let mut psl = tempfile::NamedTempFile::new().unwrap();
    writeln!(psl, "com\n// a comment\n\n*.ck\n!exception.example").unwrap();

    bin()
        .arg("load-psl")
        .arg(psl.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rules accepted"))
        .stdout(predicate::str::contains("1 skipped"));
}

#[test]
fn extract_finds_urls_in_a_file() {
    let mut psl = tempfile::NamedTempFile::new().unwrap();
    writeln!(psl, "com").unwrap();

    let mut input = tempfile::NamedTempFile::new().unwrap();
    writeln!(input, "visit http://example.com/path today").unwrap();

    bin()
        .args(["extract"])
        .arg(input.path())
        .args(["--psl-file"])
        .arg(psl.path())
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://example.com/path"));
}

#[test]
fn extract_reads_from_stdin() {
    let mut psl = tempfile::NamedTempFile::new().unwrap();
    writeln!(psl, "net").unwrap();

    bin()
        .args(["extract", "-", "--psl-file"])
        .arg(psl.path())
        .args(["--format", "text"])
        .write_stdin("write to bob@example.net please\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("mailto:bob@example.net"));
}
