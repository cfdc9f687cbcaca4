#![allow(missing_docs, clippy::tests_outside_test_module)]

use std::{fs, process::Command};

use assert_cmd::{
    assert::{Assert, OutputAssertExt},
    cargo::CommandCargoExt,
};
use tempfile::tempdir;

#[allow(deprecated)]
fn run_fvg(args: &[&str]) -> Assert {
    let mut cmd = Command::cargo_bin("fvg").expect("binary exists");
    cmd.args(args);
    cmd.assert()
}

fn stdout_of(assert: Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout")
}

fn stderr_of(assert: Assert) -> String {
    String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 stderr")
}

#[test]
fn build_prints_csv_table() {
    let out = stdout_of(run_fvg(&["build", "-n", "4", "-d", "0:2"]).success());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "index,face,center,face_width,center_gap");

    let first: Vec<f64> = lines[1]
        .split(',')
        .map(|v| v.parse().expect("number"))
        .collect();
    assert_eq!(first, vec![0.0, 0.0, 0.25, 0.5, 0.25]);
}

#[test]
fn build_accepts_negative_domain() {
    let out = stdout_of(run_fvg(&["build", "-n", "2", "--domain", "-1:1", "-c", "cell"]).success());
    let last = out.lines().last().expect("rows");
    assert!(last.starts_with("2,1.000000000000000e0,"));
}

#[test]
fn seeded_random_output_is_stable() {
    let args = [
        "build",
        "-n",
        "25",
        "-D",
        "random",
        "--low",
        "0.6",
        "--high",
        "1.4",
        "--seed",
        "99",
    ];
    let a = stdout_of(run_fvg(&args).success());
    let b = stdout_of(run_fvg(&args).success());
    assert_eq!(a, b);
}

#[test]
fn build_writes_output_file() {
    let td = tempdir().expect("tmp");
    let path = td.path().join("grid.csv");
    let path_arg = path.to_str().expect("utf8 path");
    let out = stdout_of(run_fvg(&["build", "-n", "8", "-o", path_arg]).success());
    assert!(out.is_empty());

    let written = fs::read_to_string(&path).expect("csv written");
    assert_eq!(written.lines().count(), 10);
}

#[test]
fn zero_cells_fail() {
    let err = stderr_of(run_fvg(&["build", "-n", "0"]).failure());
    assert!(err.contains("invalid number of volumes N: 0"));
}

#[test]
fn inverted_domain_fails() {
    let err = stderr_of(run_fvg(&["build", "-n", "3", "-d", "2:1"]).failure());
    assert!(err.contains("invalid domain"));
}

#[test]
fn unknown_distribution_is_rejected_by_parser() {
    run_fvg(&["build", "-n", "3", "-D", "chebyshev"]).failure();
}

#[test]
fn seed_and_clock_seed_conflict() {
    run_fvg(&["build", "-n", "3", "-D", "random", "--seed", "1", "--clock-seed"]).failure();
}

#[test]
fn stats_reports_uniform_grid() {
    let args = ["stats", "-n", "10", "--bins", "4", "--region", "0:0.5"];
    let out = stdout_of(run_fvg(&args).success());
    assert!(out.contains("uniformity:       1.000000"));
    assert!(out.contains("aspect (max/min): 1.000000"));
    assert!(out.contains("region [0, 0.5]: 5 cells"));
    assert_eq!(out.lines().filter(|l| l.starts_with("  [")).count(), 4);
}

#[test]
fn list_distributions_shows_builtins() {
    let out = stdout_of(run_fvg(&["list-distributions"]).success());
    assert!(out.contains("- random — 1"));
    assert!(out.contains("- uniform — 0"));
}
