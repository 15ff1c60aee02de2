// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The assertion probe used inside predicate bodies.
//!
//! `check!(input > 0)` evaluates the expression, writes its text and location
//! into this thread's slot, and hands the boolean back untouched. The slot is
//! overwritten on every evaluation, passing or not, so a predicate that chains
//! several probes reports whichever ran last:
//!
//! ```ignore
//! fn ordered(&(lo, hi): &(i32, i32)) -> bool {
//!     // If `lo >= 0` fails, `&&` stops and it is the last write.
//!     check!(lo >= 0) && check!(lo <= hi)
//! }
//! ```
//!
//! The slot is thread-local, so predicates running on different threads never
//! see each other's text. Last write wins: read it right after the predicate
//! returns, before anything else can probe. Guards do exactly that.

use crate::violation::ContractViolation;
use std::cell::Cell;

thread_local! {
    static SLOT: Cell<Option<ContractViolation>> = const { Cell::new(None) };
}

/// Record `text` at `file:line` as the latest evaluation and return `result`.
///
/// The record is stored whether or not `result` is true.
#[inline]
pub fn probe(result: bool, text: &'static str, file: &'static str, line: u32) -> bool {
    SLOT.with(|slot| slot.set(Some(ContractViolation::new(text, file, line))));
    result
}

/// The latest record written on this thread, if any.
#[inline]
pub fn last() -> Option<ContractViolation> {
    SLOT.with(Cell::get)
}

/// Read and clear this thread's slot.
#[inline]
pub fn take() -> Option<ContractViolation> {
    SLOT.with(Cell::take)
}

#[inline]
pub fn clear() {
    SLOT.with(|slot| slot.set(None));
}

/// Evaluate a boolean expression through the probe.
///
/// `check!(expr)` records `stringify!(expr)`; `check!(expr, "text")` records
/// the given text instead.
#[macro_export]
macro_rules! check {
    ($predicate:expr, $text:expr $(,)?) => {
        $crate::probe::probe($predicate, $text, ::core::file!(), ::core::line!())
    };
    ($predicate:expr $(,)?) => {
        $crate::probe::probe(
            $predicate,
            ::core::stringify!($predicate),
            ::core::file!(),
            ::core::line!(),
        )
    };
}
