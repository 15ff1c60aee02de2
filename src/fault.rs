// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The fatal path: render a defect to stderr and abort.
//!
//! Two kinds of defect end here. A violation under `Terminate`, and a guard
//! that went out of scope without ever being evaluated. The second one is not
//! subject to policy at all.
//!
//! Tests can't survive an abort, so a thread may install an observer (see
//! [`crate::testing::intercept`]) that records defects and lets execution
//! continue past the point where the process would have died.

use crate::violation::{ConditionRole, ContractViolation};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::io::Write;

/// Something the fatal path was asked to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Defect {
    /// A predicate evaluated false under `Terminate`.
    Violation {
        role: ConditionRole,
        violation: ContractViolation,
    },
    /// A declared condition's guard dropped without being evaluated.
    Unchecked {
        role: ConditionRole,
        file: &'static str,
        line: u32,
    },
}

impl Defect {
    pub fn role(&self) -> ConditionRole {
        match self {
            Defect::Violation { role, .. } | Defect::Unchecked { role, .. } => *role,
        }
    }

    pub fn violation(&self) -> Option<&ContractViolation> {
        match self {
            Defect::Violation { violation, .. } => Some(violation),
            Defect::Unchecked { .. } => None,
        }
    }

    pub fn is_unchecked(&self) -> bool {
        matches!(self, Defect::Unchecked { .. })
    }
}

/// The fixed diagnostic written to stderr before aborting.
impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Defect::Violation { role, violation } => write!(
                f,
                "CONTRACT VIOLATION - the following {} was not true:\n\t{}\nin file:\n\t {}\nat line:\n\t {}",
                role, violation.condition, violation.file, violation.line
            ),
            Defect::Unchecked { role, file, line } => write!(
                f,
                "CONTRACT NOT CHECKED - {} declared at {}:{} was never evaluated",
                role, file, line
            ),
        }
    }
}

thread_local! {
    static OBSERVER: RefCell<Option<Vec<Defect>>> = const { RefCell::new(None) };
}

/// Report a fatal defect.
///
/// Aborts the process unless this thread has an observer installed, in which
/// case the defect is recorded and control returns to the caller.
pub(crate) fn report(defect: Defect) {
    let observed = OBSERVER.with(|observer| match observer.borrow_mut().as_mut() {
        Some(defects) => {
            defects.push(defect);
            true
        }
        None => false,
    });
    if observed {
        return;
    }

    match &defect {
        Defect::Violation { role, violation } => tracing::error!(
            %role,
            condition = violation.condition,
            file = violation.file,
            line = violation.line,
            "contract violation"
        ),
        Defect::Unchecked { role, file, line } => tracing::error!(
            %role,
            file = *file,
            line = *line,
            "contract condition never checked"
        ),
    }

    // Nothing useful to do if stderr is gone; abort regardless.
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "{}", defect);
    let _ = stderr.flush();
    std::process::abort();
}

/// Swap in a new observer slot, returning the previous one.
pub(crate) fn replace_observer(next: Option<Vec<Defect>>) -> Option<Vec<Defect>> {
    OBSERVER.with(|observer| std::mem::replace(&mut *observer.borrow_mut(), next))
}
