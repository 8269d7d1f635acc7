//! Logic for deriving the record bridge.
//!
//! The generated code calls back into the dispatch protocol once per field,
//! so the core never needs to know a record's shape.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, DeriveInput};

/// Name of the helper attribute, `#[duoser(...)]`
const ATTR: &str = "duoser";

/// One named field, after its attributes have been read.
struct RecordField {
    ident: syn::Ident,
    ty: syn::Type,
    /// Name used by the text format
    name: String,
}

/// Fields split into the optional base record and the struct's own fields.
struct RecordFields {
    base: Option<RecordField>,
    own: Vec<RecordField>,
}

/// Generate `Record`, `Encode` and `Decode` for a struct with named fields.
pub fn derive(input: DeriveInput) -> syn::Result<TokenStream> {
    let named = match &input.data {
        syn::Data::Struct(syn::DataStruct {
            fields: syn::Fields::Named(named),
            ..
        }) => named,
        syn::Data::Struct(_) => {
            return Err(syn::Error::new(
                input.ident.span(),
                "Record can only be derived for structs with named fields",
            ))
        }
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let RecordFields { base, own } = parse_fields(named)?;

    let ident = &input.ident;
    let generics = add_trait_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let encode_base = base.as_ref().map(|RecordField { ident, .. }| {
        quote! {
            ::duoser::Record::encode_fields(&self.#ident, encoder)?;
        }
    });
    let encode_own = own.iter().map(|RecordField { ident, name, .. }| {
        quote! {
            ::duoser::Encoder::encode_field(encoder, #name, &self.#ident)?;
        }
    });

    // struct expression fields are evaluated in the order written,
    // so listing the base first makes it the first thing consumed
    let decode_base = base.as_ref().map(|RecordField { ident, ty, .. }| {
        quote! {
            #ident: <#ty as ::duoser::Record>::decode_fields(decoder)?,
        }
    });
    let decode_own = own.iter().map(|RecordField { ident, name, .. }| {
        quote! {
            #ident: ::duoser::Decoder::decode_field(decoder, #name)?,
        }
    });

    Ok(quote! {
        impl #impl_generics ::duoser::Record for #ident #ty_generics #where_clause {
            fn encode_fields<__E: ::duoser::Encoder>(
                &self,
                encoder: &mut __E,
            ) -> ::duoser::SerDeResult<()> {
                #encode_base
                #(#encode_own)*
                ::core::result::Result::Ok(())
            }

            fn decode_fields<__D: ::duoser::Decoder>(
                decoder: &mut __D,
            ) -> ::duoser::SerDeResult<Self> {
                ::core::result::Result::Ok(Self {
                    #decode_base
                    #(#decode_own)*
                })
            }
        }

        impl #impl_generics ::duoser::Encode for #ident #ty_generics #where_clause {
            fn encode<__E: ::duoser::Encoder>(
                &self,
                encoder: &mut __E,
            ) -> ::duoser::SerDeResult<()> {
                ::duoser::Encoder::encode_record(encoder, self)
            }
        }

        impl #impl_generics ::duoser::Decode for #ident #ty_generics #where_clause {
            fn decode<__D: ::duoser::Decoder>(decoder: &mut __D) -> ::duoser::SerDeResult<Self> {
                ::duoser::Decoder::decode_record(decoder)
            }
        }
    })
}

/// Read the `#[duoser(...)]` attributes of every field.
fn parse_fields(named: &syn::FieldsNamed) -> syn::Result<RecordFields> {
    let mut base: Option<RecordField> = None;
    let mut own = Vec::with_capacity(named.named.len());

    for field in named.named.iter() {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new(field.span(), "expected a named field"));
        };

        let mut rename = None;
        let mut is_base = false;

        for attr in field.attrs.iter().filter(|a| a.path().is_ident(ATTR)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    rename = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("base") {
                    is_base = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported duoser attribute, expected `rename` or `base`"))
                }
            })?;
        }

        let name = rename
            .clone()
            .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string());

        let parsed = RecordField {
            ident,
            ty: field.ty.clone(),
            name,
        };

        if !is_base {
            own.push(parsed);
            continue;
        }

        if base.is_some() {
            return Err(syn::Error::new(
                field.span(),
                "a record can only have one `base` field",
            ));
        }
        if rename.is_some() {
            return Err(syn::Error::new(
                field.span(),
                "a `base` field is flattened and cannot be renamed",
            ));
        }
        base = Some(parsed);
    }

    Ok(RecordFields { base, own })
}

/// Every type parameter must itself be encodable and decodable.
fn add_trait_bounds(mut generics: syn::Generics) -> syn::Generics {
    for param in generics.params.iter_mut() {
        if let syn::GenericParam::Type(ty) = param {
            ty.bounds.push(syn::parse_quote!(::duoser::Encode));
            ty.bounds.push(syn::parse_quote!(::duoser::Decode));
        }
    }

    generics
}
