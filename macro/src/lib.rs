#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Not an issue in a macro crate"
)]
//! Procedural macro for compile-time SDDL validation.
mod core;
use core::sddl_impl;
use proc_macro::TokenStream;

use syn::{LitStr, parse_macro_input};

/// Builds a `win_sddl::SddlString` from a string literal checked at compile time.
///
/// An invalid literal is a compile error pointing at the literal.
#[proc_macro]
pub fn sddl(input: TokenStream) -> TokenStream {
    let lit = parse_macro_input!(input as LitStr);
    match sddl_impl(&lit) {
        Ok(token_stream) => token_stream,
        Err(err) => err.to_compile_error(),
    }
    .into()
}
