// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The check guard: one declared condition, evaluated exactly once.
//!
//! ```text
//!              check() ─ true / Skip ──▶ Checked
//! Unchecked ──┤
//!              check() ─ false ────────▶ Faulted   (policy already dispatched)
//!
//! disarm() ────────────────────────────▶ Disarmed  (a sibling returned Err)
//!
//! drop while Unchecked, not unwinding ──▶ fatal "never checked" defect
//! ```
//!
//! The drop-time defect ignores the violation policy. A code path that returns
//! without evaluating its declared condition is a bug in how the contract is
//! used, and `Skip` does not excuse it: skipping still counts as a check.

use crate::fault::{self, Defect};
use crate::policy::ViolationPolicy;
use crate::probe;
use crate::violation::{ConditionRole, ContractViolation};
use std::panic::Location;

/// Where a guard is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unchecked,
    /// Evaluated and held, or skipped by policy.
    Checked,
    /// Evaluated false; the policy has been applied.
    Faulted,
    /// Released unevaluated while a violation from another slot of the same
    /// contract propagates as an `Err`.
    Disarmed,
}

/// Scoped enforcement for a single declared condition.
#[derive(Debug)]
#[must_use = "a guard that is never checked aborts the process when dropped"]
pub struct CheckGuard {
    state: GuardState,
    role: ConditionRole,
    declared_at: &'static Location<'static>,
}

impl CheckGuard {
    /// Guard for a condition declared by the caller.
    ///
    /// Role `None` produces a guard that is already satisfied.
    #[track_caller]
    pub fn new(role: ConditionRole) -> Self {
        Self::declared_at(role, Location::caller())
    }

    pub(crate) fn declared_at(role: ConditionRole, declared_at: &'static Location<'static>) -> Self {
        let state = if role.is_declared() {
            GuardState::Unchecked
        } else {
            GuardState::Checked
        };
        Self {
            state,
            role,
            declared_at,
        }
    }

    #[inline]
    pub fn state(&self) -> GuardState {
        self.state
    }

    #[inline]
    pub fn role(&self) -> ConditionRole {
        self.role
    }

    #[inline]
    pub fn is_checked(&self) -> bool {
        self.state != GuardState::Unchecked
    }

    /// Release an unchecked guard without evaluating it.
    ///
    /// `try_*` violations travel as values, so nothing is unwinding when the
    /// remaining guards drop.
    pub(crate) fn disarm(&mut self) {
        if self.state == GuardState::Unchecked {
            tracing::trace!(role = %self.role, "contract check disarmed");
            self.state = GuardState::Disarmed;
        }
    }

    /// Evaluate `predicate` under `policy`.
    ///
    /// Under `Raise`, a false predicate unwinds with the `ContractViolation`
    /// as panic payload. Under `Terminate` it aborts. Under `Skip` the
    /// predicate is never called.
    #[track_caller]
    pub fn check<F: FnOnce() -> bool>(&mut self, policy: ViolationPolicy, predicate: F) {
        self.check_named(policy, std::any::type_name::<F>(), predicate);
    }

    /// Evaluate `predicate` under `policy`, returning `Raise` violations as `Err`.
    ///
    /// Once the guard has left `Unchecked`, later calls do nothing and
    /// return `Ok`.
    #[track_caller]
    pub fn try_check<F: FnOnce() -> bool>(
        &mut self,
        policy: ViolationPolicy,
        predicate: F,
    ) -> Result<(), ContractViolation> {
        self.try_check_named(policy, std::any::type_name::<F>(), predicate)
    }

    /// `name` stands in for the condition text if the predicate never probes.
    #[track_caller]
    pub(crate) fn check_named(
        &mut self,
        policy: ViolationPolicy,
        name: &'static str,
        predicate: impl FnOnce() -> bool,
    ) {
        if let Err(violation) = self.try_check_named(policy, name, predicate) {
            tracing::debug!(role = %self.role, %violation, "raising contract violation");
            std::panic::panic_any(violation);
        }
    }

    #[track_caller]
    pub(crate) fn try_check_named(
        &mut self,
        policy: ViolationPolicy,
        name: &'static str,
        predicate: impl FnOnce() -> bool,
    ) -> Result<(), ContractViolation> {
        if self.state != GuardState::Unchecked {
            return Ok(());
        }
        if !policy.is_enforcing() {
            tracing::trace!(role = %self.role, "contract check skipped by policy");
            self.state = GuardState::Checked;
            return Ok(());
        }

        let violation = match evaluate(predicate, name, Location::caller()) {
            None => {
                self.state = GuardState::Checked;
                return Ok(());
            }
            Some(violation) => violation,
        };

        self.state = GuardState::Faulted;
        match policy {
            ViolationPolicy::Raise => Err(violation),
            _ => {
                fault::report(Defect::Violation {
                    role: self.role,
                    violation,
                });
                Ok(())
            }
        }
    }
}

/// Run a predicate and, if it fails, pick up the record it just probed.
///
/// The slot is cleared first so a predicate that fails without probing
/// can't inherit a stale record from an earlier call. Such a predicate is
/// reported under `name` at the call site instead.
fn evaluate(
    predicate: impl FnOnce() -> bool,
    name: &'static str,
    call_site: &'static Location<'static>,
) -> Option<ContractViolation> {
    probe::clear();
    if predicate() {
        return None;
    }
    Some(probe::take().unwrap_or_else(|| {
        ContractViolation::new(name, call_site.file(), call_site.line())
    }))
}

impl Drop for CheckGuard {
    fn drop(&mut self) {
        if self.state == GuardState::Unchecked && !std::thread::panicking() {
            fault::report(Defect::Unchecked {
                role: self.role,
                file: self.declared_at.file(),
                line: self.declared_at.line(),
            });
        }
    }
}
