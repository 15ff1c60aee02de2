// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The `#[contract]` attribute.
//!
//! Rust has no default arguments, so a contract can't ride along as a
//! trailing `c: Contract = {}` parameter. The attribute does that job: it
//! builds the contract at the top of the function, checks the precondition,
//! runs the original body, and routes the result through the postcondition.
//!
//! ```ignore
//! use pactguard::{check, contract};
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
//! // Also generated: the same function with a per-call policy.
//! f_with_policy(0, ViolationPolicy::Skip);
//! ```
//!
//! # How it works
//!
//! 1. **Signature**: argument types and the return type become the
//!    contract's `Args` tuple and `Ret`, so a predicate with the wrong
//!    parameter list fails to compile.
//! 2. **Shape**: on a method (any `self` receiver) predicates bind as
//!    `Method` and receive the receiver first; otherwise as `Free`.
//! 3. **Body**: runs inside a closure, so `return` and `?` still pass through
//!    the postcondition instead of skipping it.

use proc_macro::TokenStream;

mod attrs;
mod contract;
mod signature;

/// Attach a precondition and/or postcondition to a function.
///
/// # Attributes
///
/// - `pre = <expr>` - Precondition, called with `&` of each argument
/// - `post = <expr>` - Postcondition, called with `&result` then `&` of each argument
/// - `policy = <expr>` - Default policy (anything `Into<ContractPolicy>`)
///
/// # Generated Output
///
/// - The function itself, checking under `policy` (or the build default)
/// - `<name>_with_policy`, taking the policy as a trailing argument
///
/// Arguments must be plain identifiers and must still be alive after the
/// body runs, since the postcondition borrows them.
#[proc_macro_attribute]
pub fn contract(attr: TokenStream, item: TokenStream) -> TokenStream {
    contract::process(attr, item)
}
