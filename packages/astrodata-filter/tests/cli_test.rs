//! Command-line tests against the built binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("astrodata.xml")
}

/// The built binary, without any arguments.
fn binary() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("astrodata-filter"))
}

/// Binary with a clean environment pointed at the fixture.
fn cli() -> Command {
    let mut cmd = binary();
    cmd.env_remove("ASTRODATA_PATH")
        .env_remove("ASTRODATA_SIGN_DISPLAY")
        .env_remove("ASTRODATA_LABEL_MODE")
        .env_remove("ASTRODATA_KEYWORDS")
        .env_remove("RUST_LOG")
        .arg("--data")
        .arg(fixture_path());
    cmd
}

#[test]
fn test_search_by_sign_prints_single_match() {
    cli()
        .args(["search", "--sun-sign", "Лев"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Keeper"))
        .stdout(predicate::str::contains("John Stage").not())
        .stdout(predicate::str::contains("1 of 4 records"));
}

#[test]
fn test_search_accepts_raw_codes_and_ranges() {
    cli()
        .args(["search", "--sun-sign", "leo", "--sun-degree", "10..20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("101"));
}

#[test]
fn test_raw_mode_accepts_codes_in_any_case() {
    cli()
        .args(["search", "--signs", "raw", "--sun-sign", "LEO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Keeper"))
        .stdout(predicate::str::contains("1 of 4 records"));
}

#[test]
fn test_search_by_category_path() {
    cli()
        .args(["search", "--category", "Writer", "--category", "Fiction"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ann Quill"))
        .stdout(predicate::str::contains("1 of 4 records"));
}

#[test]
fn test_search_without_matches_is_not_an_error() {
    cli()
        .args(["search", "--moon-degree", "28"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No records match"));
}

#[test]
fn test_search_json_output() {
    let output = cli()
        .args(["search", "--label", "актёр", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(1));
    assert_eq!(parsed[0]["id"], "102");
    assert_eq!(parsed[0]["moon_sign"], "Лев/Дева");
}

#[test]
fn test_search_rejects_out_of_range_degree() {
    cli()
        .args(["search", "--sun-degree", "30"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("sun degree"));
}

#[test]
fn test_search_rejects_unknown_category() {
    cli()
        .args(["search", "--category", "Politics"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Politics"));
}

#[test]
fn test_options_lists_choices() {
    cli()
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sun sign"))
        .stdout(predicate::str::contains("any, Лев, Овен, Рыбы"))
        .stdout(predicate::str::contains("спортсмен"));
}

#[test]
fn test_options_in_raw_mode() {
    cli()
        .args(["options", "--signs", "raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("any, ari, leo, pis"));
}

#[test]
fn test_tree_prints_hierarchy() {
    cli()
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sports\n  Football\n"));
}

#[test]
fn test_show_record_detail() {
    cli()
        .args(["show", "101"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paris, France"))
        .stdout(predicate::str::contains("Goalkeeper for a national side"));

    cli().args(["show", "999"]).assert().failure();
}

#[test]
fn test_missing_source_fails() {
    let mut cmd = binary();
    cmd.env_remove("ASTRODATA_PATH")
        .args(["--data", "/nonexistent/astrodata.xml", "options"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_malformed_xml_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xml");
    fs::write(&path, "<astrodatabank_export><adb_entry>").unwrap();

    let mut cmd = binary();
    cmd.env_remove("ASTRODATA_PATH")
        .arg("--data")
        .arg(&path)
        .arg("options")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_data_path_from_environment() {
    let mut cmd = binary();
    cmd.env("ASTRODATA_PATH", fixture_path())
        .env_remove("ASTRODATA_SIGN_DISPLAY")
        .env_remove("ASTRODATA_LABEL_MODE")
        .env_remove("ASTRODATA_KEYWORDS")
        .args(["search", "--rodden", "AA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Keeper"));
}
