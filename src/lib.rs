// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Design-by-contract enforcement for functions and methods.
//!
//! A function declares a precondition over its arguments and/or a
//! postcondition over its result. Every call evaluates each declared
//! condition exactly once, and a declared condition that is never evaluated
//! is itself a fatal defect.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  binding.rs  │────▶│ contract.rs  │────▶│   guard.rs   │
//! │ (Free,Method,│     │  (Contract,  │     │ (CheckGuard, │
//! │ Unconditional│     │  pre_check,  │     │  check once) │
//! │  Signature)  │     │  post_check) │     │              │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                                                  │
//!        ┌──────────────────┬──────────────────────┤
//!        ▼                  ▼                      ▼
//! ┌──────────────┐   ┌──────────────┐      ┌──────────────┐
//! │   probe.rs   │   │  policy.rs   │      │   fault.rs   │
//! │   (check!,   │   │ (Terminate,  │      │ (stderr +    │
//! │  last probe) │   │ Raise, Skip) │      │    abort)    │
//! └──────────────┘   └──────────────┘      └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use pactguard::{catch, check, contract, ViolationPolicy};
//!
//! fn int_pre(&input: &i32) -> bool {
//!     check!(input > 0)
//! }
//!
//! fn int_post(&ret: &i32, _input: &i32) -> bool {
//!     check!(ret > 2)
//! }
//!
//! #[contract(pre = int_pre, post = int_post)]
//! fn f(input: i32) -> i32 {
//!     input + 1
//! }
//!
//! assert_eq!(f(2), 3);
//!
//! let err = catch(|| f_with_policy(0, ViolationPolicy::Raise)).unwrap_err();
//! assert_eq!(err.condition, "input > 0");
//! ```
//!
//! # Policies
//!
//! | Policy      | On a false condition                                    |
//! |-------------|---------------------------------------------------------|
//! | `Terminate` | Fixed diagnostic on stderr, then `process::abort`       |
//! | `Raise`     | Unwinds with a [`ContractViolation`] payload            |
//! | `Skip`      | Nothing; the predicate is never called                  |
//!
//! Debug and release builds default to `Terminate`; with the `testing`
//! feature the default is `Raise`. An unchecked condition aborts under every
//! policy, in every build.
//!
//! # Binding defects
//!
//! A predicate whose parameters don't match the function is rejected at
//! compile time:
//!
//! ```compile_fail
//! use pactguard::{Contract, ContractPolicy, Free, Unconditional};
//!
//! fn wants_string(_: &String) -> bool {
//!     true
//! }
//!
//! let _c = Contract::<(), (i32,), (), _, _>::new(
//!     ContractPolicy::default(),
//!     Free(wants_string),
//!     Unconditional,
//! );
//! ```
//!
//! ```compile_fail
//! use pactguard::{Contract, ContractPolicy, Free, Unconditional};
//!
//! fn two_args(_: &i32, _: &i32) -> bool {
//!     true
//! }
//!
//! let _c = Contract::<(), (i32,), (), _, _>::new(
//!     ContractPolicy::default(),
//!     Free(two_args),
//!     Unconditional,
//! );
//! ```
//!
//! A postcondition must take the result first:
//!
//! ```compile_fail
//! use pactguard::{Contract, ContractPolicy, Free, Unconditional};
//!
//! fn no_result(_: &i32) -> bool {
//!     true
//! }
//!
//! let _c = Contract::<(), (i32,), u64, _, _>::new(
//!     ContractPolicy::default(),
//!     Unconditional,
//!     Free(no_result),
//! );
//! ```

// Lets `#[contract]` expansions name `::pactguard` inside this crate too.
extern crate self as pactguard;

// Module declarations
mod binding;
mod catch;
mod contract;
mod fault;
mod guard;
mod policy;
pub mod probe;
mod violation;

pub mod testing;

// Re-exports for public API
pub use binding::{
    Binding, Free, Method, Postcondition, Precondition, PredicateShape, Signature, Unconditional,
};
pub use catch::{catch, violation_of};
pub use contract::{Contract, FnContract, Post, Pre, PrePost};
pub use fault::Defect;
pub use guard::{CheckGuard, GuardState};
pub use policy::{
    ContractPolicy, Profile, ViolationPolicy, SKIP_POST_IN_RELEASE, SKIP_PRE_IN_RELEASE,
};
pub use probe::probe;
pub use violation::{ConditionRole, ContractViolation};

#[cfg(feature = "macros")]
pub use pactguard_macros::contract;
