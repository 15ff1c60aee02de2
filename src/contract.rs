// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The contract handle: a precondition guard and a postcondition guard for
//! one call.
//!
//! A guarded function builds a `Contract` when it starts, checks the
//! precondition against its arguments, runs its body, and hands the result
//! through `post_check` on the way out:
//!
//! ```
//! use pactguard::{check, Contract, ContractPolicy, Free};
//!
//! fn int_pre(&input: &i32) -> bool {
//!     check!(input > 0)
//! }
//!
//! fn int_post(&ret: &i32, _input: &i32) -> bool {
//!     check!(ret > 1)
//! }
//!
//! fn f(input: i32) -> i32 {
//!     let mut c = Contract::<(), (i32,), i32, _, _>::new(
//!         ContractPolicy::default(),
//!         Free(int_pre),
//!         Free(int_post),
//!     );
//!     c.pre_check((&input,));
//!     c.post_check(input + 1, (&input,))
//! }
//!
//! assert_eq!(f(2), 3);
//! ```
//!
//! Methods use the `_on` variants, which take the receiver first. Dropping a
//! contract whose declared conditions were never checked is a fatal defect,
//! except after a `try_*` check has returned `Err`: that releases the other
//! slot so the error can be passed up with `?`.

use crate::binding::{Postcondition, Precondition, PredicateShape, Signature, Unconditional};
use crate::guard::{CheckGuard, GuardState};
use crate::policy::{ContractPolicy, ViolationPolicy};
use crate::violation::{ConditionRole, ContractViolation};
use std::any::type_name;
use std::marker::PhantomData;
use std::panic::Location;

/// Contract for one activation of a function `fn(&Recv, Args) -> Ret`.
///
/// `Recv` is `()` for free functions.
#[must_use = "a contract whose conditions are never checked aborts the process when dropped"]
pub struct Contract<Recv: ?Sized, Args, Ret, P, Q> {
    pre: P,
    post: Q,
    pre_guard: CheckGuard,
    post_guard: CheckGuard,
    policy: ContractPolicy,
    _signature: PhantomData<fn(&Recv, Args) -> Ret>,
}

/// Contract for a free function.
pub type FnContract<Args, Ret, P, Q> = Contract<(), Args, Ret, P, Q>;
/// Contract with a precondition only.
pub type Pre<Args, Ret, P, Recv = ()> = Contract<Recv, Args, Ret, P, Unconditional>;
/// Contract with a postcondition only.
pub type Post<Args, Ret, Q, Recv = ()> = Contract<Recv, Args, Ret, Unconditional, Q>;
/// Contract with both conditions.
pub type PrePost<Args, Ret, P, Q, Recv = ()> = Contract<Recv, Args, Ret, P, Q>;

fn role_for(shape: PredicateShape, declared: ConditionRole) -> ConditionRole {
    match shape {
        PredicateShape::Absent => ConditionRole::None,
        PredicateShape::Free | PredicateShape::Bound => declared,
    }
}

impl<Recv, Args, Ret, P, Q> Contract<Recv, Args, Ret, P, Q>
where
    Recv: ?Sized,
    Args: Signature,
    P: Precondition<Recv, Args>,
    Q: Postcondition<Recv, Args, Ret>,
{
    /// Bind `pre` and `post` to this signature.
    ///
    /// A bare `ViolationPolicy` converts into a policy for the precondition
    /// slot; the postcondition slot keeps its default.
    #[track_caller]
    pub fn new(policy: impl Into<ContractPolicy>, pre: P, post: Q) -> Self {
        let declared_at = Location::caller();
        Self {
            pre_guard: CheckGuard::declared_at(
                role_for(P::SHAPE, ConditionRole::Precondition),
                declared_at,
            ),
            post_guard: CheckGuard::declared_at(
                role_for(Q::SHAPE, ConditionRole::Postcondition),
                declared_at,
            ),
            pre,
            post,
            policy: policy.into(),
            _signature: PhantomData,
        }
    }

    /// Both conditions under the build profile's default policy.
    #[track_caller]
    pub fn pre_post(pre: P, post: Q) -> Self {
        Self::new(ContractPolicy::default(), pre, post)
    }

    /// Replace the policy before any check has run.
    pub fn with_policy(mut self, policy: impl Into<ContractPolicy>) -> Self {
        self.policy = policy.into();
        self
    }

    pub fn policy(&self) -> ContractPolicy {
        self.policy
    }

    pub fn pre_state(&self) -> GuardState {
        self.pre_guard.state()
    }

    pub fn post_state(&self) -> GuardState {
        self.post_guard.state()
    }

    /// Check the precondition of a method call. Always `true` when it returns.
    #[track_caller]
    pub fn pre_check_on<'a>(&mut self, receiver: &Recv, args: Args::Refs<'a>) -> bool
    where
        Args: 'a,
    {
        let pre = &self.pre;
        self.pre_guard
            .check_named(self.policy.pre, type_name::<P>(), || pre.holds(receiver, args));
        true
    }

    /// Check the precondition, returning a `Raise` violation instead of unwinding.
    #[track_caller]
    pub fn try_pre_check_on<'a>(
        &mut self,
        receiver: &Recv,
        args: Args::Refs<'a>,
    ) -> Result<(), ContractViolation>
    where
        Args: 'a,
    {
        let pre = &self.pre;
        let checked = self
            .pre_guard
            .try_check_named(self.policy.pre, type_name::<P>(), || pre.holds(receiver, args));
        if checked.is_err() {
            self.post_guard.disarm();
        }
        checked
    }

    /// Check the postcondition of a method call against `ret`, then return it.
    #[track_caller]
    pub fn post_check_on<'a>(&mut self, receiver: &Recv, ret: Ret, args: Args::Refs<'a>) -> Ret
    where
        Args: 'a,
    {
        let policy = self.policy.post;
        self.post_check_on_with(policy, receiver, ret, args)
    }

    /// [`post_check_on`](Self::post_check_on) under an explicit policy for this call.
    #[track_caller]
    pub fn post_check_on_with<'a>(
        &mut self,
        policy: ViolationPolicy,
        receiver: &Recv,
        ret: Ret,
        args: Args::Refs<'a>,
    ) -> Ret
    where
        Args: 'a,
    {
        let post = &self.post;
        self.post_guard
            .check_named(policy, type_name::<Q>(), || post.holds(receiver, &ret, args));
        ret
    }

    /// Check the postcondition against a borrowed result.
    #[track_caller]
    pub fn post_check_ref_on<'a>(&mut self, receiver: &Recv, ret: &Ret, args: Args::Refs<'a>)
    where
        Args: 'a,
    {
        let post = &self.post;
        self.post_guard
            .check_named(self.policy.post, type_name::<Q>(), || post.holds(receiver, ret, args));
    }

    /// Check the postcondition, returning a `Raise` violation instead of unwinding.
    #[track_caller]
    pub fn try_post_check_on<'a>(
        &mut self,
        receiver: &Recv,
        ret: Ret,
        args: Args::Refs<'a>,
    ) -> Result<Ret, ContractViolation>
    where
        Args: 'a,
    {
        let post = &self.post;
        let checked = self
            .post_guard
            .try_check_named(self.policy.post, type_name::<Q>(), || {
                post.holds(receiver, &ret, args)
            });
        if checked.is_err() {
            self.pre_guard.disarm();
        }
        checked.map(|()| ret)
    }
}

impl<Args, Ret, P, Q> Contract<(), Args, Ret, P, Q>
where
    Args: Signature,
    P: Precondition<(), Args>,
    Q: Postcondition<(), Args, Ret>,
{
    /// Check the precondition. Always `true` when it returns.
    #[track_caller]
    pub fn pre_check<'a>(&mut self, args: Args::Refs<'a>) -> bool
    where
        Args: 'a,
    {
        self.pre_check_on(&(), args)
    }

    #[track_caller]
    pub fn try_pre_check<'a>(&mut self, args: Args::Refs<'a>) -> Result<(), ContractViolation>
    where
        Args: 'a,
    {
        self.try_pre_check_on(&(), args)
    }

    /// Check the postcondition against `ret`, then return it.
    #[track_caller]
    pub fn post_check<'a>(&mut self, ret: Ret, args: Args::Refs<'a>) -> Ret
    where
        Args: 'a,
    {
        self.post_check_on(&(), ret, args)
    }

    #[track_caller]
    pub fn post_check_with<'a>(
        &mut self,
        policy: ViolationPolicy,
        ret: Ret,
        args: Args::Refs<'a>,
    ) -> Ret
    where
        Args: 'a,
    {
        self.post_check_on_with(policy, &(), ret, args)
    }

    #[track_caller]
    pub fn post_check_ref<'a>(&mut self, ret: &Ret, args: Args::Refs<'a>)
    where
        Args: 'a,
    {
        self.post_check_ref_on(&(), ret, args);
    }

    #[track_caller]
    pub fn try_post_check<'a>(
        &mut self,
        ret: Ret,
        args: Args::Refs<'a>,
    ) -> Result<Ret, ContractViolation>
    where
        Args: 'a,
    {
        self.try_post_check_on(&(), ret, args)
    }
}

impl<Recv, Args, Ret, P> Contract<Recv, Args, Ret, P, Unconditional>
where
    Recv: ?Sized,
    Args: Signature,
    P: Precondition<Recv, Args>,
{
    /// Precondition only, under the default policy.
    #[track_caller]
    pub fn requires(pre: P) -> Self {
        Self::new(ContractPolicy::default(), pre, Unconditional)
    }
}

impl<Recv, Args, Ret, Q> Contract<Recv, Args, Ret, Unconditional, Q>
where
    Recv: ?Sized,
    Args: Signature,
    Q: Postcondition<Recv, Args, Ret>,
{
    /// Postcondition only, under the default policy.
    #[track_caller]
    pub fn ensures(post: Q) -> Self {
        Self::new(ContractPolicy::default(), Unconditional, post)
    }
}
