extern crate assert_cmd;
extern crate predicates;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

// These never open a window: argument validation rejects the command
// line, or --help short-circuits, before the display is touched.

#[test]
fn help_names_every_knob() {
    Command::cargo_bin("julia")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--size")
                .and(predicate::str::contains("--iterations"))
                .and(predicate::str::contains("--delta"))
                .and(predicate::str::contains("--delay"))
                .and(predicate::str::contains("--threads")),
        );
}

#[test]
fn rejects_a_malformed_size() {
    Command::cargo_bin("julia")
        .unwrap()
        .args(&["--size", "huge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WIDTHxHEIGHT"));
}

#[test]
fn rejects_an_iteration_cap_of_zero() {
    Command::cargo_bin("julia")
        .unwrap()
        .args(&["--iterations", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Iteration cap must be between"));
}

#[test]
fn rejects_a_step_delta_that_is_not_a_number() {
    Command::cargo_bin("julia")
        .unwrap()
        .args(&["--delta", "tiny"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step delta must be a number"));
}

#[test]
fn rejects_an_absurd_thread_count() {
    Command::cargo_bin("julia")
        .unwrap()
        .args(&["--threads", "100000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Thread count must be between"));
}
