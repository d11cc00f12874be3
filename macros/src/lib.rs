//! Derive macros for the todo store
//!
//! This crate provides procedural macros to reduce boilerplate when building
//! reducer-driven state containers.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates stable names for action enum variants
//!
//! # Example
//!
//! ```ignore
//! use todo_store_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     Add { text: String },
//!     ToggleLiked { id: u64 },
//!     #[action(rename = "delete")]
//!     Remove { id: u64 },
//! }
//!
//! // Generated items:
//! assert_eq!(TodoAction::Add { text: "x".into() }.name(), "add");
//! assert_eq!(TodoAction::ToggleLiked { id: 1 }.name(), "toggle_liked");
//! assert_eq!(TodoAction::ACTION_NAMES, &["add", "toggle_liked", "delete"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derive macro for Action enums
///
/// Generates for the enum:
/// - `name()` - the variant's stable `snake_case` name, for log fields and
///   metric labels
/// - `ACTION_NAMES` - every variant name, in declaration order
/// - an implementation of `todo_store_core::action::Action`
///
/// # Attributes
///
/// - `#[action(rename = "...")]` - Override the generated name of a variant
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - An `#[action(...)]` attribute is malformed
/// - Two variants end up with the same name
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut names = Vec::with_capacity(data_enum.variants.len());
    let mut arms = Vec::with_capacity(data_enum.variants.len());

    for variant in &data_enum.variants {
        let variant_name = &variant.ident;

        let action_name = match renamed(&variant.attrs) {
            Ok(Some(rename)) => rename,
            Ok(None) => snake_case(&variant_name.to_string()),
            Err(error) => return error.to_compile_error().into(),
        };

        if names.contains(&action_name) {
            return syn::Error::new_spanned(
                variant,
                format!("Duplicate action name `{action_name}`"),
            )
            .to_compile_error()
            .into();
        }

        arms.push(match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_name { .. } => #action_name, },
            Fields::Unnamed(_) => quote! { Self::#variant_name(..) => #action_name, },
            Fields::Unit => quote! { Self::#variant_name => #action_name, },
        });
        names.push(action_name);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // An empty enum has no values, so `name()` can never be called on it.
    let body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! { match self { #(#arms)* } }
    };

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Every action name, in declaration order
            pub const ACTION_NAMES: &'static [&'static str] = &[#(#names),*];

            /// Returns the stable name of this action
            #[must_use]
            pub const fn name(&self) -> &'static str {
                #body
            }
        }

        impl #impl_generics ::todo_store_core::action::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                #name::name(self)
            }
        }
    };

    TokenStream::from(expanded)
}

/// Read `#[action(rename = "...")]` from a variant, if present
fn renamed(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rename = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("action")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                rename = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported action attribute, expected `rename`"))
            }
        })?;
    }

    Ok(rename)
}

/// `ToggleLiked` → `toggle_liked`
fn snake_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, ch) in ident.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::snake_case;

    #[test]
    fn snake_case_splits_words() {
        assert_eq!(snake_case("Add"), "add");
        assert_eq!(snake_case("ToggleLiked"), "toggle_liked");
        assert_eq!(snake_case("ToggleSaved"), "toggle_saved");
    }
}
