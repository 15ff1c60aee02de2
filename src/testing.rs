//! Test utilities for observing the fatal path.
//!
//! This module is always compiled but hidden from documentation. The real
//! fatal path aborts the process, which no test harness survives, so tests
//! swap it for a recorder.

#![doc(hidden)]

use crate::fault::{self, Defect};

/// Restores the previous observer even if the closure unwinds.
struct Restore {
    previous: Option<Option<Vec<Defect>>>,
}

impl Restore {
    fn finish(&mut self) -> Vec<Defect> {
        self.previous
            .take()
            .and_then(fault::replace_observer)
            .unwrap_or_default()
    }
}

impl Drop for Restore {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Run `f` with this thread's fatal path recording instead of aborting.
///
/// Returns `f`'s result and every defect reported while it ran, in order.
/// After a recorded defect, execution carries on where the process would
/// have died. Nested calls each see only their own defects.
pub fn intercept<T>(f: impl FnOnce() -> T) -> (T, Vec<Defect>) {
    let mut restore = Restore {
        previous: Some(fault::replace_observer(Some(Vec::new()))),
    };
    let value = f();
    (value, restore.finish())
}

/// Like [`intercept`], for closures whose result is not interesting.
pub fn defects_of(f: impl FnOnce()) -> Vec<Defect> {
    intercept(f).1
}
