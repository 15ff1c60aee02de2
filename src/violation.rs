// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! What a failed predicate leaves behind.
//!
//! A `ContractViolation` is the record the probe writes when a boolean
//! expression is evaluated: the expression's source text and where it lives.
//! Under the `Raise` policy it is also the value that unwinds up the stack,
//! so tests can match on `condition` directly.

use serde::Serialize;
use std::fmt;

/// Which slot of a contract a condition occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionRole {
    /// Evaluated against the arguments before the body runs.
    Precondition,
    /// Evaluated against the result before it is handed back.
    Postcondition,
    /// No condition was declared for this slot.
    None,
}

impl ConditionRole {
    /// Whether a guard in this role has to be evaluated before it drops.
    #[inline]
    pub const fn is_declared(self) -> bool {
        !matches!(self, ConditionRole::None)
    }
}

impl fmt::Display for ConditionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionRole::Precondition => f.write_str("precondition"),
            ConditionRole::Postcondition => f.write_str("postcondition"),
            ConditionRole::None => f.write_str("none"),
        }
    }
}

/// One failed predicate: the condition text and its source location.
///
/// Two violations are equal when all three fields are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ContractViolation {
    /// Source text of the boolean expression, as written.
    pub condition: &'static str,
    /// File containing the expression.
    pub file: &'static str,
    /// Line of the expression.
    pub line: u32,
}

impl ContractViolation {
    pub const fn new(condition: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            condition,
            file,
            line,
        }
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" at {}:{}", self.condition, self.file, self.line)
    }
}

impl std::error::Error for ContractViolation {}
