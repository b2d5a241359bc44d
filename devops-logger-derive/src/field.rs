//! Logger field selection for `#[derive(BoundLogger)]`.
//!
//! A field marked `#[logger]` wins; otherwise a named field called `logger` is
//! used.

use proc_macro2::Ident;
use syn::{spanned::Spanned, DataStruct, Field, Fields, Member, Meta, Result, Type};

/// The field the generated impl hands out.
pub(crate) struct LoggerFieldSpec {
    pub(crate) member: Member,
    pub(crate) ty: Type,
}

/// Returns `true` if the field carries a bare `#[logger]` attribute.
fn is_marked(field: &Field) -> Result<bool> {
    let mut marked = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("logger") {
            continue;
        }
        match &attr.meta {
            Meta::Path(_) => {
                if marked {
                    return Err(syn::Error::new_spanned(attr, "duplicate `#[logger]` attribute"));
                }
                marked = true;
            }
            Meta::List(list) => {
                return Err(syn::Error::new_spanned(
                    list,
                    "`#[logger]` takes no options; use the bare attribute",
                ));
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for #[logger]",
                ));
            }
        }
    }
    Ok(marked)
}

fn member(index: usize, field: &Field) -> Member {
    field.ident.clone().map_or_else(
        || Member::Unnamed(syn::Index {
            index: u32::try_from(index).unwrap_or(u32::MAX),
            span: field.span(),
        }),
        Member::Named,
    )
}

/// Picks the logger field of `data`.
pub(crate) fn find_logger_field(name: &Ident, data: &DataStruct) -> Result<LoggerFieldSpec> {
    let fields: Vec<&Field> = match &data.fields {
        Fields::Named(fields) => fields.named.iter().collect(),
        Fields::Unnamed(fields) => fields.unnamed.iter().collect(),
        Fields::Unit => {
            return Err(syn::Error::new(
                name.span(),
                "`BoundLogger` requires a struct with a logger field",
            ));
        }
    };

    let mut marked = None;
    for (index, field) in fields.iter().enumerate() {
        if !is_marked(field)? {
            continue;
        }
        if marked.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "only one field may be marked `#[logger]`",
            ));
        }
        marked = Some((index, *field));
    }

    let (index, field) = marked
        .or_else(|| {
            fields
                .iter()
                .enumerate()
                .find(|(_, field)| field.ident.as_ref().is_some_and(|ident| ident == "logger"))
                .map(|(index, field)| (index, *field))
        })
        .ok_or_else(|| {
            syn::Error::new(
                name.span(),
                "no logger field found; name a field `logger` or mark it with `#[logger]`",
            )
        })?;

    Ok(LoggerFieldSpec {
        member: member(index, field),
        ty: field.ty.clone(),
    })
}
