// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Violation policies and the build-profile switch that picks their defaults.
//!
//! There is no hidden global: the profile is an ordinary value. The
//! `from_build` constructor reads it from `cfg!(debug_assertions)` and the
//! `testing` cargo feature, and that is the only place the build leaks in.
//!
//! | Profile            | enforcing policy | sensitive policy |
//! |--------------------|------------------|------------------|
//! | debug              | `Terminate`      | `Terminate`      |
//! | debug + testing    | `Raise`          | `Raise`          |
//! | optimized          | `Terminate`      | `Skip`           |
//! | optimized + testing| `Raise`          | `Skip`           |

use serde::{Deserialize, Serialize};

/// What happens when a bound predicate evaluates false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationPolicy {
    /// Print the violation to stderr and abort the process.
    Terminate,
    /// Unwind with the `ContractViolation` as the panic payload.
    Raise,
    /// Do not evaluate the predicate at all.
    Skip,
}

impl ViolationPolicy {
    /// Whether the predicate is evaluated under this policy.
    #[inline]
    pub const fn is_enforcing(self) -> bool {
        !matches!(self, ViolationPolicy::Skip)
    }

    /// Policy for performance-sensitive conditions in the current build.
    ///
    /// `Skip` in optimized builds, the enforcing default otherwise.
    #[inline]
    pub const fn skip_in_release() -> Self {
        Profile::from_build().sensitive_policy()
    }
}

impl Default for ViolationPolicy {
    fn default() -> Self {
        Profile::from_build().enforcing_policy()
    }
}

/// Precondition policy for performance-sensitive contracts.
pub const SKIP_PRE_IN_RELEASE: ViolationPolicy = ViolationPolicy::skip_in_release();
/// Postcondition policy for performance-sensitive contracts.
pub const SKIP_POST_IN_RELEASE: ViolationPolicy = ViolationPolicy::skip_in_release();

/// Build profile a default policy is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Built with optimizations and without debug assertions.
    #[serde(default)]
    pub optimized: bool,
    /// Violations should unwind into a test harness instead of aborting.
    #[serde(default)]
    pub testing: bool,
}

impl Profile {
    /// The profile this crate was compiled under.
    pub const fn from_build() -> Self {
        Self {
            optimized: !cfg!(debug_assertions),
            testing: cfg!(feature = "testing"),
        }
    }

    pub const fn debug() -> Self {
        Self {
            optimized: false,
            testing: false,
        }
    }

    pub const fn release() -> Self {
        Self {
            optimized: true,
            testing: false,
        }
    }

    pub const fn with_testing(self, testing: bool) -> Self {
        Self { testing, ..self }
    }

    /// Policy for ordinary conditions: never skipped.
    pub const fn enforcing_policy(&self) -> ViolationPolicy {
        if self.testing {
            ViolationPolicy::Raise
        } else {
            ViolationPolicy::Terminate
        }
    }

    /// Policy for conditions marked performance-sensitive.
    pub const fn sensitive_policy(&self) -> ViolationPolicy {
        if self.optimized {
            ViolationPolicy::Skip
        } else {
            self.enforcing_policy()
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::from_build()
    }
}

/// The policies one contract instance applies to its two slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractPolicy {
    pub pre: ViolationPolicy,
    pub post: ViolationPolicy,
}

impl ContractPolicy {
    pub const fn new(pre: ViolationPolicy, post: ViolationPolicy) -> Self {
        Self { pre, post }
    }

    /// Same policy for both slots.
    pub const fn uniform(policy: ViolationPolicy) -> Self {
        Self::new(policy, policy)
    }

    /// Enforcing policy of `profile` for both slots.
    pub const fn for_profile(profile: &Profile) -> Self {
        Self::uniform(profile.enforcing_policy())
    }

    pub const fn with_pre(self, pre: ViolationPolicy) -> Self {
        Self { pre, ..self }
    }

    pub const fn with_post(self, post: ViolationPolicy) -> Self {
        Self { post, ..self }
    }
}

impl Default for ContractPolicy {
    fn default() -> Self {
        Self::uniform(ViolationPolicy::default())
    }
}

/// A bare policy overrides the precondition slot only.
impl From<ViolationPolicy> for ContractPolicy {
    fn from(pre: ViolationPolicy) -> Self {
        Self::default().with_pre(pre)
    }
}
