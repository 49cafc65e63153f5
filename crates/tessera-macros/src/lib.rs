// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This crate provides procedural macros for Tessera.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, LitStr};

/// A derive macro that implements `tessera_core::ValueType` and submits the
/// type's registration to the process-wide type registry.
///
/// The registered name defaults to `module_path::Ident`. Use
/// `#[value_type(name = "...")]` to pick a stable name of your own:
///
/// ```rust,ignore
/// #[derive(Clone, tessera_core::ValueType)]
/// #[value_type(name = "engine::property")]
/// struct Property {
///     speed: f32,
/// }
/// ```
///
/// Generic types are rejected: every instantiation would need a name of its
/// own.
#[proc_macro_derive(ValueType, attributes(value_type))]
pub fn derive_value_type(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "ValueType cannot be derived for generic types",
        ));
    }

    let type_name = match explicit_name(input)? {
        Some(lit) => quote! { #lit },
        None => quote! { concat!(module_path!(), "::", stringify!(#name)) },
    };

    Ok(quote! {
        impl ::tessera_core::ValueType for #name {
            const TYPE_NAME: &'static str = #type_name;
        }

        ::tessera_core::inventory::submit! {
            ::tessera_core::TypeRegistration::of::<#name>()
        }
    })
}

/// Reads `#[value_type(name = "...")]`, if present.
fn explicit_name(input: &DeriveInput) -> syn::Result<Option<LitStr>> {
    let mut name = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("value_type")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(meta.error("type name must not be empty"));
                }
                name = Some(lit);
                Ok(())
            } else {
                Err(meta.error("unsupported value_type attribute, expected `name`"))
            }
        })?;
    }
    Ok(name)
}
