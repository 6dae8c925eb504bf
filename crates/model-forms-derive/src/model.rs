// File: model-forms-derive/src/model.rs
// Purpose: Model derive macro and attribute processing

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, GenericArgument, LitStr, PathArguments, Type};

/// How a field is converted to and from a field value
enum FieldMode {
    Codec,
    Text,
    OptionalText(Type),
}

struct ModelField {
    ident: syn::Ident,
    name: String,
    ty: Type,
    mode: FieldMode,
}

pub fn impl_model(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let model_name = extract_model_name(input)?.unwrap_or_else(|| name.to_string());
    let fields = collect_fields(input)?;

    let properties = fields.iter().map(|field| {
        let prop = &field.name;
        let declared = declared_type_tokens(field);
        quote! {
            ::model_forms::types::RawProperty::new(#prop, #declared)
        }
    });

    let getters = fields.iter().map(|field| {
        let prop = &field.name;
        let ident = &field.ident;
        let encode = match &field.mode {
            FieldMode::Codec => quote! {
                ::model_forms::types::FieldCodec::encode(&self.#ident)
            },
            FieldMode::Text => quote! {
                ::model_forms::types::codec::encode_text(&self.#ident)
            },
            FieldMode::OptionalText(_) => quote! {
                ::model_forms::types::codec::encode_optional_text(&self.#ident)
            },
        };
        quote! { #prop => #encode, }
    });

    let setters = fields.iter().map(|field| {
        let prop = &field.name;
        let ident = &field.ident;
        let ty = &field.ty;
        let decode = match &field.mode {
            FieldMode::Codec => quote! {
                <#ty as ::model_forms::types::FieldCodec>::decode(value)
            },
            FieldMode::Text => quote! {
                ::model_forms::types::codec::decode_text::<#ty>(value)
            },
            FieldMode::OptionalText(inner) => quote! {
                ::model_forms::types::codec::decode_optional_text::<#inner>(value)
            },
        };
        quote! {
            #prop => {
                self.#ident = #decode.map_err(|e| {
                    ::model_forms::types::AssignError::codec(#model_name, name, e)
                })?;
                ::std::result::Result::Ok(())
            }
        }
    });

    let expanded = quote! {
        impl #impl_generics ::model_forms::types::Model for #name #ty_generics #where_clause {
            fn model_name() -> &'static str {
                #model_name
            }

            fn properties() -> ::std::vec::Vec<::model_forms::types::RawProperty> {
                ::std::vec![#(#properties),*]
            }

            fn get(&self, name: &str) -> ::std::option::Option<::model_forms::types::FieldValue> {
                match name {
                    #(#getters)*
                    _ => ::std::option::Option::None,
                }
            }

            fn set(
                &mut self,
                name: &str,
                value: ::std::option::Option<::model_forms::types::FieldValue>,
            ) -> ::std::result::Result<(), ::model_forms::types::AssignError> {
                match name {
                    #(#setters)*
                    _ => ::std::result::Result::Err(
                        ::model_forms::types::AssignError::UnknownProperty {
                            model: #model_name,
                            property: name.to_string(),
                        },
                    ),
                }
            }
        }
    };

    Ok(expanded)
}

fn declared_type_tokens(field: &ModelField) -> TokenStream {
    let ty = &field.ty;
    match &field.mode {
        FieldMode::Codec => quote! {
            <#ty as ::model_forms::types::FieldCodec>::declared_type()
        },
        FieldMode::Text => {
            let type_name = type_name(ty);
            quote! {
                ::model_forms::types::DeclaredType::plain(
                    ::model_forms::types::TypeFacts::text(#type_name),
                )
            }
        }
        FieldMode::OptionalText(inner) => {
            let type_name = type_name(inner);
            quote! {
                ::model_forms::types::DeclaredType::optional(
                    ::model_forms::types::DeclaredType::plain(
                        ::model_forms::types::TypeFacts::text(#type_name),
                    ),
                )
            }
        }
    }
}

fn collect_fields(input: &DeriveInput) -> syn::Result<Vec<ModelField>> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Model can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Model can only be derived for structs",
            ))
        }
    };

    let mut fields = Vec::new();
    for field in named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };

        let (skip, text) = extract_field_flags(&field.attrs)?;
        if skip {
            continue;
        }

        let mode = if text {
            match option_inner(&field.ty) {
                Some(inner) => FieldMode::OptionalText(inner.clone()),
                None => FieldMode::Text,
            }
        } else {
            FieldMode::Codec
        };

        fields.push(ModelField {
            name: ident.unraw().to_string(),
            ident,
            ty: field.ty.clone(),
            mode,
        });
    }

    Ok(fields)
}

/// Extract the model name from #[model(name = "...")]
fn extract_model_name(input: &DeriveInput) -> syn::Result<Option<String>> {
    let mut model_name = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("model") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                model_name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported model attribute, expected `name = \"...\"`"))
            }
        })?;
    }
    Ok(model_name)
}

/// Parse #[model(skip)] and #[model(text)] on a field
fn extract_field_flags(attrs: &[syn::Attribute]) -> syn::Result<(bool, bool)> {
    let mut skip = false;
    let mut text = false;
    for attr in attrs {
        if !attr.path().is_ident("model") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else if meta.path.is_ident("text") {
                text = true;
                Ok(())
            } else {
                Err(meta.error("unsupported field attribute, expected `skip` or `text`"))
            }
        })?;
    }
    Ok((skip, text))
}

/// `T` when the type is written `Option<T>`
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn type_name(ty: &Type) -> String {
    quote!(#ty).to_string().replace(' ', "")
}
