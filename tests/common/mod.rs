//! Shared predicates and guarded functions.

#![allow(dead_code)]

use pactguard::{check, ContractPolicy, Free, Method, PrePost, ViolationPolicy};

// ============================================================================
// POLICIES
// ============================================================================

pub fn raise() -> ContractPolicy {
    ContractPolicy::uniform(ViolationPolicy::Raise)
}

pub fn skip() -> ContractPolicy {
    ContractPolicy::uniform(ViolationPolicy::Skip)
}

pub fn terminate() -> ContractPolicy {
    ContractPolicy::uniform(ViolationPolicy::Terminate)
}

// ============================================================================
// FREE FUNCTION
// ============================================================================

pub fn int_pre(&input: &i32) -> bool {
    check!(input > 0)
}

pub fn int_post(&ret: &i32, _input: &i32) -> bool {
    check!(ret > 2)
}

/// `input + 1`, requiring `input > 0` and ensuring `ret > 2`.
pub fn increment(input: i32, policy: ContractPolicy) -> i32 {
    let mut c = PrePost::<(i32,), i32, _, _>::new(policy, Free(int_pre), Free(int_post));
    c.pre_check((&input,));
    c.post_check(input + 1, (&input,))
}

// ============================================================================
// METHOD
// ============================================================================

pub struct Object {
    pub member: i32,
}

impl Object {
    pub fn new() -> Self {
        Self { member: 2 }
    }

    fn method_pre(&self, &input: &i32) -> bool {
        check!(input > 0) && check!(self.member == 2)
    }

    fn method_post(&self, &ret: &i32, _input: &i32) -> bool {
        check!(ret > 2) && check!(self.member == 3)
    }

    /// Sets `member` to 3 and returns `input + member - 1`.
    pub fn advance(&mut self, input: i32, policy: ContractPolicy) -> i32 {
        let mut c = PrePost::<(i32,), i32, _, _, Object>::new(
            policy,
            Method(Object::method_pre),
            Method(Object::method_post),
        );
        c.pre_check_on(self, (&input,));
        self.member = 3;
        let ret = input + self.member - 1;
        c.post_check_on(self, ret, (&input,))
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}
