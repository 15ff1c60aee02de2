//! Reference scenarios: one guarded free function, one guarded method.

use crate::common::{increment, raise, skip, Object};
use pactguard::{catch, check, probe, ConditionRole, Free, Pre, Unconditional};

// ============================================================================
// FREE FUNCTION
// ============================================================================

#[test]
fn test_failing_precondition_raises_its_text() {
    let err = catch(|| increment(0, raise())).unwrap_err();
    assert_eq!(err.condition, "input > 0");
    assert!(err.file.ends_with("common/mod.rs"));
}

#[test]
fn test_failing_postcondition_raises_its_text() {
    let err = catch(|| increment(1, raise())).unwrap_err();
    assert_eq!(err.condition, "ret > 2");
}

#[test]
fn test_passing_call_returns_value() {
    assert_eq!(catch(|| increment(2, raise())), Ok(3));
}

#[test]
fn test_skip_returns_normally_without_probing() {
    probe::clear();
    assert_eq!(increment(0, skip()), 1);
    assert_eq!(probe::last(), None);
}

// ============================================================================
// METHOD
// ============================================================================

#[test]
fn test_method_contract_passes_across_state_change() {
    let mut object = Object::new();
    assert_eq!(catch(move || object.advance(1, raise())), Ok(3));
}

#[test]
fn test_method_precondition_reports_last_probe() {
    let mut object = Object { member: 7 };
    let err = catch(move || object.advance(1, raise())).unwrap_err();
    assert_eq!(err.condition, "self.member == 2");
}

#[test]
fn test_method_precondition_short_circuits_to_first_failure() {
    let mut object = Object::new();
    let err = catch(move || object.advance(0, raise())).unwrap_err();
    assert_eq!(err.condition, "input > 0");
}

// ============================================================================
// TYPE-LEVEL PRECONDITION
// ============================================================================

trait Numeric: Default {
    const SIGNED: bool;
}

impl Numeric for i64 {
    const SIGNED: bool = true;
}

impl Numeric for u64 {
    const SIGNED: bool = false;
}

fn signed_only<T: Numeric>() -> bool {
    check!(T::SIGNED)
}

/// A function whose only requirement is on its type parameter.
fn zero<T: Numeric>() -> T {
    let mut c = Pre::<(), T, _>::new(raise(), Free(signed_only::<T>), Unconditional);
    c.pre_check(());
    c.post_check(T::default(), ())
}

#[test]
fn test_type_precondition_passes_for_signed() {
    assert_eq!(catch(zero::<i64>), Ok(0));
}

#[test]
fn test_type_precondition_raises_for_unsigned() {
    let err = catch(zero::<u64>).unwrap_err();
    assert_eq!(err.condition, "T::SIGNED");
}

#[test]
fn test_role_names() {
    assert_eq!(ConditionRole::Precondition.to_string(), "precondition");
    assert_eq!(ConditionRole::Postcondition.to_string(), "postcondition");
    assert!(!ConditionRole::None.is_declared());
}
