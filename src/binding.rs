// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binding predicates to the signature of the function they guard.
//!
//! A contract knows the guarded function's argument tuple `Args` and return
//! type `Ret`. From those two it derives the parameter list each predicate
//! must have, and the trait system rejects anything else at compile time:
//!
//! | Role          | `Free<F>`                 | `Method<F>`                        |
//! |---------------|---------------------------|------------------------------------|
//! | precondition  | `Fn(&A0, .., &An)`        | `Fn(&Recv, &A0, .., &An)`          |
//! | postcondition | `Fn(&Ret, &A0, .., &An)`  | `Fn(&Recv, &Ret, &A0, .., &An)`    |
//!
//! Every argument is passed by shared reference, so a predicate can't consume
//! or mutate what the body is about to use. Destructure in the parameter
//! list to get plain names back: `fn int_pre(&input: &i32) -> bool`.
//!
//! The shape (free or bound to a receiver) is the wrapper type itself, so it
//! is resolved once when the contract is built, never per call.
//! `Unconditional` fills a slot that has no condition: it fits any
//! signature and never runs.

/// Argument tuples a contract can guard, from `()` up to eight arguments.
pub trait Signature {
    /// The arguments as a tuple of shared references.
    type Refs<'a>
    where
        Self: 'a;
}

/// How a predicate receives its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateShape {
    /// Role-relevant arguments only.
    Free,
    /// Receiver first, then the role-relevant arguments.
    Bound,
    /// No predicate at all.
    Absent,
}

/// Anything that can sit in a contract slot.
pub trait Binding {
    const SHAPE: PredicateShape;
}

/// A predicate over the arguments (and result) only.
#[derive(Debug, Clone, Copy)]
pub struct Free<F>(pub F);

/// A predicate that also receives the method's receiver.
#[derive(Debug, Clone, Copy)]
pub struct Method<F>(pub F);

/// The "no condition" sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconditional;

impl<F> Binding for Free<F> {
    const SHAPE: PredicateShape = PredicateShape::Free;
}

impl<F> Binding for Method<F> {
    const SHAPE: PredicateShape = PredicateShape::Bound;
}

impl Binding for Unconditional {
    const SHAPE: PredicateShape = PredicateShape::Absent;
}

/// A predicate evaluated against the arguments before the body runs.
pub trait Precondition<Recv: ?Sized, Args: Signature>: Binding {
    fn holds<'a>(&self, receiver: &Recv, args: Args::Refs<'a>) -> bool
    where
        Args: 'a;
}

/// A predicate evaluated against the result before it is returned.
pub trait Postcondition<Recv: ?Sized, Args: Signature, Ret>: Binding {
    fn holds<'a>(&self, receiver: &Recv, ret: &Ret, args: Args::Refs<'a>) -> bool
    where
        Args: 'a;
}

impl<Recv: ?Sized, Args: Signature> Precondition<Recv, Args> for Unconditional {
    #[inline(always)]
    fn holds<'a>(&self, _receiver: &Recv, _args: Args::Refs<'a>) -> bool
    where
        Args: 'a,
    {
        true
    }
}

impl<Recv: ?Sized, Args: Signature, Ret> Postcondition<Recv, Args, Ret> for Unconditional {
    #[inline(always)]
    fn holds<'a>(&self, _receiver: &Recv, _ret: &Ret, _args: Args::Refs<'a>) -> bool
    where
        Args: 'a,
    {
        true
    }
}

macro_rules! bind_arity {
    ($($arg:ident $val:ident),*) => {
        impl<$($arg),*> Signature for ($($arg,)*) {
            type Refs<'a> = ($(&'a $arg,)*) where Self: 'a;
        }

        impl<Recv: ?Sized, F, $($arg),*> Precondition<Recv, ($($arg,)*)> for Free<F>
        where
            F: Fn($(&$arg),*) -> bool,
        {
            #[inline]
            fn holds<'a>(
                &self,
                _receiver: &Recv,
                args: <($($arg,)*) as Signature>::Refs<'a>,
            ) -> bool
            where
                ($($arg,)*): 'a,
            {
                let ($($val,)*) = args;
                (self.0)($($val),*)
            }
        }

        impl<Recv: ?Sized, F, $($arg),*> Precondition<Recv, ($($arg,)*)> for Method<F>
        where
            F: Fn(&Recv, $(&$arg),*) -> bool,
        {
            #[inline]
            fn holds<'a>(
                &self,
                receiver: &Recv,
                args: <($($arg,)*) as Signature>::Refs<'a>,
            ) -> bool
            where
                ($($arg,)*): 'a,
            {
                let ($($val,)*) = args;
                (self.0)(receiver, $($val),*)
            }
        }

        impl<Recv: ?Sized, Ret, F, $($arg),*> Postcondition<Recv, ($($arg,)*), Ret> for Free<F>
        where
            F: Fn(&Ret, $(&$arg),*) -> bool,
        {
            #[inline]
            fn holds<'a>(
                &self,
                _receiver: &Recv,
                ret: &Ret,
                args: <($($arg,)*) as Signature>::Refs<'a>,
            ) -> bool
            where
                ($($arg,)*): 'a,
            {
                let ($($val,)*) = args;
                (self.0)(ret, $($val),*)
            }
        }

        impl<Recv: ?Sized, Ret, F, $($arg),*> Postcondition<Recv, ($($arg,)*), Ret> for Method<F>
        where
            F: Fn(&Recv, &Ret, $(&$arg),*) -> bool,
        {
            #[inline]
            fn holds<'a>(
                &self,
                receiver: &Recv,
                ret: &Ret,
                args: <($($arg,)*) as Signature>::Refs<'a>,
            ) -> bool
            where
                ($($arg,)*): 'a,
            {
                let ($($val,)*) = args;
                (self.0)(receiver, ret, $($val),*)
            }
        }
    };
}

bind_arity!();
bind_arity!(A0 a0);
bind_arity!(A0 a0, A1 a1);
bind_arity!(A0 a0, A1 a1, A2 a2);
bind_arity!(A0 a0, A1 a1, A2 a2, A3 a3);
bind_arity!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4);
bind_arity!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
bind_arity!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
bind_arity!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
