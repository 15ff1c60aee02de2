// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading the guarded function's signature.
//!
//! Everything a contract needs is here: whether there is a receiver, the
//! argument names (to borrow them for the predicates) and their types (to
//! spell the contract's `Args` tuple).

use proc_macro2::{TokenStream, TokenTree};
use quote::{quote, ToTokens};
use syn::{FnArg, Ident, Pat, ReturnType, Signature, Type};

/// How the function takes `self`, if it does.
pub enum Receiver {
    /// A free function or an associated function without `self`.
    None,
    /// `&self`, `&mut self`, `self: Box<Self>` and friends.
    Borrowed,
    /// `self` by value.
    Owned,
}

impl Receiver {
    /// Type the contract binds as its receiver.
    pub fn ty(&self) -> TokenStream {
        match self {
            Receiver::None => quote!(()),
            Receiver::Borrowed | Receiver::Owned => quote!(Self),
        }
    }

    /// Expression lending the receiver to a predicate.
    pub fn borrow(&self) -> TokenStream {
        match self {
            Receiver::None => quote!(&()),
            Receiver::Borrowed => quote!(&*self),
            Receiver::Owned => quote!(&self),
        }
    }

    pub fn is_method(&self) -> bool {
        !matches!(self, Receiver::None)
    }
}

/// The parts of a signature a contract is derived from.
pub struct GuardedSignature {
    pub receiver: Receiver,
    pub names: Vec<Ident>,
    pub types: Vec<Type>,
    /// `None` for `-> ()` written implicitly.
    pub ret: Option<Type>,
}

impl GuardedSignature {
    pub fn read(sig: &Signature) -> syn::Result<Self> {
        if let Some(asyncness) = &sig.asyncness {
            return Err(syn::Error::new_spanned(
                asyncness,
                "#[contract] does not support async functions",
            ));
        }
        if let Some(constness) = &sig.constness {
            return Err(syn::Error::new_spanned(
                constness,
                "#[contract] does not support const functions",
            ));
        }
        if let Some(variadic) = &sig.variadic {
            return Err(syn::Error::new_spanned(
                variadic,
                "#[contract] does not support variadic functions",
            ));
        }

        let mut receiver = Receiver::None;
        let mut names = Vec::new();
        let mut types = Vec::new();

        for arg in &sig.inputs {
            match arg {
                FnArg::Receiver(r) => {
                    receiver = if r.reference.is_some() || r.colon_token.is_some() {
                        Receiver::Borrowed
                    } else {
                        Receiver::Owned
                    };
                }
                FnArg::Typed(pat_type) => {
                    let name = match pat_type.pat.as_ref() {
                        Pat::Ident(ident) if ident.subpat.is_none() => ident.ident.clone(),
                        other => {
                            return Err(syn::Error::new_spanned(
                                other,
                                "#[contract] arguments must be plain identifiers",
                            ))
                        }
                    };
                    reject_impl_trait(&pat_type.ty)?;
                    names.push(name);
                    types.push((*pat_type.ty).clone());
                }
            }
        }

        let ret = match &sig.output {
            ReturnType::Default => None,
            ReturnType::Type(_, ty) => {
                reject_impl_trait(ty)?;
                Some((**ty).clone())
            }
        };

        Ok(Self {
            receiver,
            names,
            types,
            ret,
        })
    }

    /// The contract's `Args` tuple type.
    pub fn args_ty(&self) -> TokenStream {
        let types = &self.types;
        quote!((#(#types,)*))
    }

    /// A tuple borrowing every argument.
    pub fn args_refs(&self) -> TokenStream {
        let names = &self.names;
        quote!((#(&#names,)*))
    }

    pub fn ret_ty(&self) -> TokenStream {
        match &self.ret {
            Some(ty) => ty.to_token_stream(),
            None => quote!(()),
        }
    }

    /// Whether the return type can be written on the body closure.
    ///
    /// Elided lifetimes don't survive on a closure's return annotation, so
    /// borrowed returns are left to inference.
    pub fn ret_is_annotatable(&self) -> bool {
        match &self.ret {
            Some(ty) => {
                let text = ty.to_token_stream().to_string();
                !text.contains('&') && !text.contains('\'')
            }
            None => false,
        }
    }
}

fn mentions_impl(tokens: TokenStream) -> bool {
    tokens.into_iter().any(|tt| match tt {
        TokenTree::Ident(ident) => ident == "impl",
        TokenTree::Group(group) => mentions_impl(group.stream()),
        _ => false,
    })
}

fn reject_impl_trait(ty: &Type) -> syn::Result<()> {
    if mentions_impl(ty.to_token_stream()) {
        return Err(syn::Error::new_spanned(
            ty,
            "#[contract] needs nameable types; `impl Trait` can't be bound",
        ));
    }
    Ok(())
}
