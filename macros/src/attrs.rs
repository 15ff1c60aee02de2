// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parsing `#[contract(...)]` arguments.

use proc_macro2::{Span, TokenStream};
use syn::{parse::Parser, punctuated::Punctuated, Expr, Meta, Token};

/// Parsed attributes from `#[contract(...)]`.
#[derive(Default)]
pub struct ContractAttrs {
    /// Precondition expression
    pub pre: Option<Expr>,
    /// Postcondition expression
    pub post: Option<Expr>,
    /// Default policy expression
    pub policy: Option<Expr>,
}

impl ContractAttrs {
    pub fn parse(attr: TokenStream) -> syn::Result<Self> {
        let mut result = ContractAttrs::default();

        let parser = Punctuated::<Meta, Token![,]>::parse_terminated;
        let nested = parser.parse2(attr)?;

        for meta in nested {
            let nv = match meta {
                Meta::NameValue(nv) => nv,
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected `pre = ...`, `post = ...` or `policy = ...`",
                    ))
                }
            };
            let slot = match nv.path.get_ident().map(|i| i.to_string()).as_deref() {
                Some("pre") => &mut result.pre,
                Some("post") => &mut result.post,
                Some("policy") => &mut result.policy,
                _ => {
                    return Err(syn::Error::new_spanned(
                        &nv.path,
                        "unknown contract key; expected `pre`, `post` or `policy`",
                    ))
                }
            };
            if slot.is_some() {
                return Err(syn::Error::new_spanned(&nv.path, "duplicate contract key"));
            }
            *slot = Some(nv.value);
        }

        if result.pre.is_none() && result.post.is_none() {
            return Err(syn::Error::new(
                Span::call_site(),
                "#[contract] needs at least one of `pre = ...` or `post = ...`",
            ));
        }

        Ok(result)
    }
}
