#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared by the Feast charm crates.
//!
//! Currently this is a single attribute, [`feast_error`], which turns a plain
//! enum with named-field variants into the error type convention used across
//! the workspace (optional context, `?`-friendly conversions, `.context(..)`).

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Defines a crate-specific error enum.
///
/// # Injected items
///
/// * `#[derive(Debug, thiserror::Error)]` unless the enum already derives them.
/// * A `<Name>Ext` trait adding `.context(..)` to `Result<T, Name>`, and to
///   `Result<T, Source>` for every variant that wraps a `source` error.
/// * `From<Source>` for each variant with a `source` field (or a field marked
///   `#[source]` / `#[from]`), so upstream errors convert with `?`.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, .. }`
///   variant exists.
/// * A module-private `format_context` helper used inside `#[error(..)]`
///   strings. Declare at most one `#[feast_error]` enum per module.
///
/// # Requirements
///
/// * Only enums with named-field variants are accepted.
/// * A `context` field must be typed `Option<Cow<'static, str>>`.
/// * A variant wrapping a source error must also carry `context`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[feast_derive::feast_error]
/// pub enum LoadError {
///     #[error("Parse error{}: {source}", format_context(.context))]
///     Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(raw: &str) -> Result<serde_json::Value, LoadError> {
///     serde_json::from_str(raw).context("Reading snapshot")
/// }
/// ```
#[proc_macro_attribute]
pub fn feast_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(&input).into()
}
