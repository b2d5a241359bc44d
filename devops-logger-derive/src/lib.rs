//! Derive macros for `devops-logger`.
//!
//! This crate generates the `WithBoundLogger` implementation behind
//! `#[derive(BoundLogger)]`. It:
//! - locates the logger field (marked `#[logger]`, or named `logger`)
//! - emits an impl that hands that field out to `bind_logger`
//!
//! It does **not** define loggers or binding rules. Those live in the main
//! `devops-logger` crate.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod field;
use field::{find_logger_field, LoggerFieldSpec};

/// Derives `devops_logger::WithBoundLogger` for structs owning a logger.
///
/// # Field Attributes
///
/// - `#[logger]`: marks the field holding the `ContextualLogger`. Required for
///   tuple structs, and when the field is not called `logger`.
///
/// - **No annotation**: a named field called `logger` is used.
///
/// Exactly one field may be marked. Enums, unions and unit structs are rejected
/// at compile time. A marked field that is not a `ContextualLogger<_>` fails
/// with a diagnostic pointing at the field type.
#[proc_macro_derive(BoundLogger, attributes(logger))]
pub fn derive_bound_logger(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the devops-logger crate root.
///
/// Handles crate renaming (e.g., `log_ctx = { package = "devops-logger", ... }`).
/// Inside the crate itself (unit tests, integration tests and doc tests) the
/// absolute path still resolves through `extern crate self as devops_logger`.
fn crate_root() -> TokenStream {
    match crate_name("devops-logger") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::devops_logger },
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        ..
    } = input;

    let data = match data {
        Data::Struct(data) => data,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "`BoundLogger` can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "`BoundLogger` cannot be derived for unions",
            ));
        }
    };

    let LoggerFieldSpec { member, ty } = find_logger_field(&ident, &data)?;
    let crate_root = crate_root();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #crate_root::WithBoundLogger for #ident #ty_generics #where_clause {
            type Sink = <#ty as #crate_root::LoggerField>::Sink;

            fn logger_mut(&mut self) -> &mut #crate_root::ContextualLogger<Self::Sink> {
                &mut self.#member
            }
        }
    })
}
