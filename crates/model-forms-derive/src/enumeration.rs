// File: model-forms-derive/src/enumeration.rs
// Purpose: Enumeration derive macro (CaseSet + FieldCodec for fieldless enums)

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr};

pub fn impl_enumeration(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "Enumeration can only be derived for enums",
        ));
    };

    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "Enumeration needs at least one variant",
        ));
    }

    let mut variants = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Enumeration variants cannot carry fields",
            ));
        }
        variants.push(variant.ident.clone());
    }

    let type_name = name.to_string();
    let set_name = extract_set_name(input)?.unwrap_or_else(|| type_name.clone());
    let case_names: Vec<String> = variants.iter().map(|v| v.to_string()).collect();

    let expanded = quote! {
        impl #impl_generics ::model_forms::types::CaseSet for #name #ty_generics #where_clause {
            fn case_set_name() -> &'static str {
                #set_name
            }

            fn cases() -> &'static [&'static str] {
                &[#(#case_names),*]
            }

            fn case_name(&self) -> &'static str {
                match self {
                    #(Self::#variants => #case_names,)*
                }
            }

            fn from_case_name(name: &str) -> ::std::option::Option<Self> {
                match name {
                    #(#case_names => ::std::option::Option::Some(Self::#variants),)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl #impl_generics ::model_forms::types::FieldCodec for #name #ty_generics #where_clause {
            fn declared_type() -> ::model_forms::types::DeclaredType {
                ::model_forms::types::DeclaredType::plain(
                    ::model_forms::types::TypeFacts::case_set(#type_name, #set_name),
                )
            }

            fn encode(&self) -> ::std::option::Option<::model_forms::types::FieldValue> {
                ::model_forms::types::model::encode_case(self)
            }

            fn decode(
                value: ::std::option::Option<::model_forms::types::FieldValue>,
            ) -> ::std::result::Result<Self, ::model_forms::types::CodecError> {
                ::model_forms::types::model::decode_case(value)
            }
        }
    };

    Ok(expanded)
}

/// Extract the case set name from #[enumeration(name = "...")]
fn extract_set_name(input: &DeriveInput) -> syn::Result<Option<String>> {
    let mut set_name = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("enumeration") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                set_name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported enumeration attribute, expected `name = \"...\"`"))
            }
        })?;
    }
    Ok(set_name)
}
