// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning a raised violation back into a value.
//!
//! Under `Raise`, a failed condition unwinds with the `ContractViolation` as
//! its panic payload. `catch` stops that unwind and hands the record back as
//! an `Err`. Panics carrying anything else keep unwinding.

use crate::violation::ContractViolation;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Run `f`, returning a raised contract violation as `Err`.
///
/// Other panics are resumed untouched. The raise still passes through the
/// panic hook, so the default hook prints a report for every caught
/// violation; install a hook with [`std::panic::set_hook`] to quiet it.
pub fn catch<T>(f: impl FnOnce() -> T) -> Result<T, ContractViolation> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match violation_of(payload.as_ref()) {
            Some(violation) => Err(violation),
            None => panic::resume_unwind(payload),
        },
    }
}

/// The violation carried by a panic payload, if it is one.
pub fn violation_of(payload: &(dyn Any + Send)) -> Option<ContractViolation> {
    payload.downcast_ref::<ContractViolation>().copied()
}
