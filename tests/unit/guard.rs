//! The check guard used on its own, outside a contract.

use pactguard::testing::{defects_of, intercept};
use pactguard::{catch, check, CheckGuard, ConditionRole, GuardState, ViolationPolicy};
use std::cell::Cell;

#[test]
fn test_guard_checks_exactly_once() {
    let calls = Cell::new(0);
    let mut guard = CheckGuard::new(ConditionRole::Precondition);
    let mut predicate = || {
        calls.set(calls.get() + 1);
        check!(calls.get() == 1)
    };

    guard.check(ViolationPolicy::Raise, &mut predicate);
    guard.check(ViolationPolicy::Raise, &mut predicate);
    assert_eq!(calls.get(), 1);
    assert_eq!(guard.state(), GuardState::Checked);
}

#[test]
fn test_faulted_guard_ignores_later_checks() {
    let (low, high) = (1, 2);
    let mut guard = CheckGuard::new(ConditionRole::Postcondition);
    assert!(guard.try_check(ViolationPolicy::Raise, || check!(low > high)).is_err());
    assert_eq!(guard.state(), GuardState::Faulted);
    assert!(guard.try_check(ViolationPolicy::Raise, || check!(low > high)).is_ok());
}

#[test]
fn test_skip_never_calls_predicate() {
    let mut guard = CheckGuard::new(ConditionRole::Precondition);
    guard.check(ViolationPolicy::Skip, || unreachable!("skipped predicate ran"));
    assert!(guard.is_checked());
}

#[test]
fn test_unprobed_predicate_reports_call_site() {
    fn silent() -> bool {
        false
    }

    let mut guard = CheckGuard::new(ConditionRole::Precondition);
    let line = line!() + 1;
    let violation = guard.try_check(ViolationPolicy::Raise, silent).unwrap_err();
    assert!(violation.condition.contains("silent"));
    assert_eq!(violation.line, line);
    assert!(violation.file.ends_with("guard.rs"));
}

#[test]
fn test_terminate_reports_violation_with_role() {
    let count = 0u32;
    let (state, defects) = intercept(|| {
        let mut guard = CheckGuard::new(ConditionRole::Postcondition);
        guard.check(ViolationPolicy::Terminate, || check!(count > 0));
        guard.state()
    });
    assert_eq!(state, GuardState::Faulted);
    assert_eq!(defects.len(), 1);
    assert_eq!(defects[0].role(), ConditionRole::Postcondition);
    assert!(defects[0]
        .to_string()
        .starts_with("CONTRACT VIOLATION - the following postcondition was not true:\n\tcount > 0\n"));
}

#[test]
fn test_dropped_unchecked_guard_is_a_defect() {
    let line = line!() + 2;
    let defects = defects_of(|| {
        let _guard = CheckGuard::new(ConditionRole::Precondition);
    });
    assert_eq!(defects.len(), 1);
    assert!(defects[0].is_unchecked());
    assert_eq!(
        defects[0].to_string(),
        format!(
            "CONTRACT NOT CHECKED - precondition declared at {}:{} was never evaluated",
            file!(),
            line
        )
    );
}

#[test]
fn test_unwinding_past_unchecked_guard_is_silent() {
    let defects = defects_of(|| {
        let result = std::panic::catch_unwind(|| {
            let _guard = CheckGuard::new(ConditionRole::Precondition);
            panic!("body failed before the check");
        });
        assert!(result.is_err());
    });
    assert!(defects.is_empty());
}

#[test]
fn test_raise_payload_survives_catch() {
    let err = catch(|| {
        let mut guard = CheckGuard::new(ConditionRole::Precondition);
        let items: Vec<u8> = Vec::new();
        guard.check(ViolationPolicy::Raise, || check!(items.len() == 1));
    })
    .unwrap_err();
    assert_eq!(err.condition, "items.len() == 1");
}

#[test]
fn test_role_none_starts_checked() {
    let guard = CheckGuard::new(ConditionRole::None);
    assert_eq!(guard.state(), GuardState::Checked);
}
