// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Expansion of `#[contract]`.
//!
//! ```ignore
//! #[contract(pre = int_pre, post = int_post)]
//! fn f(input: i32) -> i32 { input + 1 }
//!
//! // becomes
//!
//! fn f(input: i32) -> i32 {
//!     let __pactguard_policy = ::pactguard::ContractPolicy::default();
//!     let mut __pactguard_contract =
//!         ::pactguard::Contract::<(), (i32,), i32, _, _>::new(
//!             __pactguard_policy,
//!             ::pactguard::Free(int_pre),
//!             ::pactguard::Free(int_post),
//!         );
//!     __pactguard_contract.pre_check_on(&(), (&input,));
//!     let __pactguard_ret: i32 = (|| -> i32 { input + 1 })();
//!     __pactguard_contract.post_check_on(&(), __pactguard_ret, (&input,))
//! }
//!
//! fn f_with_policy(input: i32, __pactguard_policy: impl Into<ContractPolicy>) -> i32 {
//!     /* same body */
//! }
//! ```
//!
//! The body is emitted twice rather than having `f` call `f_with_policy`:
//! the macro can't tell an associated function from a free one, so it
//! can't know whether the call needs `Self::`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Attribute, Expr, ItemFn};

use crate::attrs::ContractAttrs;
use crate::signature::GuardedSignature;

/// Main entry point for the `#[contract]` attribute macro.
pub fn process(attr: TokenStream, item: TokenStream) -> TokenStream {
    match expand(attr.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

pub(crate) fn expand(attr: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    let func: ItemFn = syn::parse2(item)?;
    let attrs = ContractAttrs::parse(attr)?;
    let sig = GuardedSignature::read(&func.sig)?;

    let default_policy = match &attrs.policy {
        Some(policy) => quote!(#policy),
        None => quote!(::pactguard::ContractPolicy::default()),
    };

    let checked_body = checked_body(&func, &attrs, &sig);

    let ItemFn {
        attrs: fn_attrs,
        vis,
        sig: fn_sig,
        ..
    } = &func;

    let mut companion_sig = fn_sig.clone();
    companion_sig.ident = format_ident!("{}_with_policy", fn_sig.ident);
    companion_sig.inputs.push(syn::parse_quote!(
        __pactguard_policy: impl ::core::convert::Into<::pactguard::ContractPolicy>
    ));
    let companion_attrs = fn_attrs.iter().filter(|a| is_carried(a));
    let companion_doc = format!(
        "[`{}`] under an explicit violation policy for this call.",
        fn_sig.ident
    );

    Ok(quote! {
        #(#fn_attrs)*
        #vis #fn_sig {
            let __pactguard_policy = #default_policy;
            #checked_body
        }

        #[doc = #companion_doc]
        #(#companion_attrs)*
        #[allow(dead_code)]
        #vis #companion_sig {
            #checked_body
        }
    })
}

/// Attributes that must follow the function onto its companion.
fn is_carried(attr: &Attribute) -> bool {
    ["cfg", "cfg_attr", "allow", "expect", "deny", "warn", "inline", "track_caller"]
        .iter()
        .any(|name| attr.path().is_ident(name))
}

fn bind(predicate: Option<&Expr>, method: bool) -> TokenStream2 {
    match predicate {
        None => quote!(::pactguard::Unconditional),
        Some(p) if method => quote!(::pactguard::Method(#p)),
        Some(p) => quote!(::pactguard::Free(#p)),
    }
}

/// Contract construction, precondition, body, postcondition.
///
/// Expects `__pactguard_policy` in scope.
fn checked_body(func: &ItemFn, attrs: &ContractAttrs, sig: &GuardedSignature) -> TokenStream2 {
    let method = sig.receiver.is_method();
    let pre = bind(attrs.pre.as_ref(), method);
    let post = bind(attrs.post.as_ref(), method);
    let recv_ty = sig.receiver.ty();
    let recv = sig.receiver.borrow();
    let args_ty = sig.args_ty();
    let args = sig.args_refs();
    let ret_ty = sig.ret_ty();
    let block = &func.block;

    let body = if sig.ret_is_annotatable() {
        quote!((|| -> #ret_ty #block)())
    } else {
        quote!((|| #block)())
    };

    // An unconditional postcondition slot is already satisfied; skipping the
    // call leaves the arguments free to be consumed by the body.
    let finish = if attrs.post.is_some() {
        quote!(__pactguard_contract.post_check_on(#recv, __pactguard_ret, #args))
    } else {
        quote!(__pactguard_ret)
    };

    quote! {
        let mut __pactguard_contract =
            ::pactguard::Contract::<#recv_ty, #args_ty, #ret_ty, _, _>::new(
                __pactguard_policy,
                #pre,
                #post,
            );
        __pactguard_contract.pre_check_on(#recv, #args);
        #[allow(clippy::redundant_closure_call)]
        let __pactguard_ret: #ret_ty = #body;
        #finish
    }
}
