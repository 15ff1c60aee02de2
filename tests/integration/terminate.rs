//! The `Terminate` path, observed from a parent process.
//!
//! Each child test re-runs this test binary filtered to one test, with
//! `PACTGUARD_CHILD` set so that test actually triggers the abort.

use crate::common::{increment, terminate};
use pactguard::{CheckGuard, ConditionRole};
use std::env;
use std::process::{Command, Output};

const CHILD_ENV: &str = "PACTGUARD_CHILD";

fn in_child() -> bool {
    env::var_os(CHILD_ENV).is_some()
}

fn run_child(test_name: &str) -> Output {
    let exe = env::current_exe().expect("test binary path");
    Command::new(exe)
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .expect("spawn child test")
}

#[test]
fn child_violates_precondition() {
    if in_child() {
        increment(0, terminate());
        unreachable!("Terminate returned");
    }
}

#[test]
fn child_drops_unchecked_guard() {
    if in_child() {
        let _guard = CheckGuard::new(ConditionRole::Postcondition);
    }
}

#[test]
fn test_violation_aborts_with_diagnostic() {
    let output = run_child("terminate::child_violates_precondition");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let expected = "CONTRACT VIOLATION - the following precondition was not true:\n\tinput > 0\nin file:\n\t ";
    assert!(stderr.contains(expected), "stderr was:\n{stderr}");
    assert!(stderr.contains("common/mod.rs\nat line:\n\t "), "stderr was:\n{stderr}");
}

#[test]
fn test_unchecked_guard_aborts_with_diagnostic() {
    let output = run_child("terminate::child_drops_unchecked_guard");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("CONTRACT NOT CHECKED - postcondition declared at "),
        "stderr was:\n{stderr}"
    );
    assert!(stderr.contains("terminate.rs:"), "stderr was:\n{stderr}");
}

#[cfg(unix)]
#[test]
fn test_abort_is_a_signal_not_an_exit_code() {
    use std::os::unix::process::ExitStatusExt;

    let output = run_child("terminate::child_violates_precondition");
    assert_eq!(output.status.code(), None);
    assert_eq!(output.status.signal(), Some(6));
}
