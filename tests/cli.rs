use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("statfin").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("statfin"));
}

#[test]
fn population_help_lists_predict_flag() {
    let mut cmd = Command::cargo_bin("statfin").unwrap();
    cmd.args(["population", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--predict"));
}

#[test]
fn code_and_area_flags_conflict() {
    let mut cmd = Command::cargo_bin("statfin").unwrap();
    cmd.args(["population", "--area", "helsinki", "--code", "091"]);
    cmd.assert().failure();
}

#[test]
fn name_flag_requires_code() {
    let mut cmd = Command::cargo_bin("statfin").unwrap();
    cmd.args(["births-deaths", "--name", "Helsinki"]);
    cmd.assert().failure();
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn fetch_online_population_with_stats() {
    let mut cmd = Command::cargo_bin("statfin").unwrap();
    cmd.args(["population", "--area", "whole country", "--stats"]);
    cmd.assert().success();
}
