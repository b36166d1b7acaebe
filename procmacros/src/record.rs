use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Result};

use crate::paths::{core as core_paths, std as std_paths};

/// How a field shows up in the model descriptor.
enum FieldShape {
    Scalar,
    ForeignKey(LitStr),
    OneToOne(LitStr),
    OneToMany(LitStr),
    ManyToMany(LitStr),
}

struct FieldSpec {
    ident: Ident,
    name: String,
    shape: FieldShape,
    skip: bool,
}

#[derive(Default)]
struct StructOptions {
    model: Option<LitStr>,
    display: Option<LitStr>,
}

/// Parse `#[record(model = "Banquet", display = "name")]` on the struct.
fn parse_struct_options(input: &DeriveInput) -> Result<StructOptions> {
    let mut options = StructOptions::default();

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("model") {
                options.model = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("display") {
                options.display = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute, expected `model` or `display`"))
            }
        })?;
    }

    Ok(options)
}

/// Parse `#[record(relation = "Event")]`, `#[record(skip)]` etc. on a field.
fn parse_field(field: &Field) -> Result<FieldSpec> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| Error::new_spanned(field, "Record fields must be named"))?;
    let name = ident.to_string().trim_start_matches("r#").to_string();

    let mut shape = FieldShape::Scalar;
    let mut skip = false;
    let mut seen_relation = false;

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                return Ok(());
            }

            let make: fn(LitStr) -> FieldShape = if meta.path.is_ident("relation") {
                FieldShape::ForeignKey
            } else if meta.path.is_ident("one_to_one") {
                FieldShape::OneToOne
            } else if meta.path.is_ident("one_to_many") {
                FieldShape::OneToMany
            } else if meta.path.is_ident("many_to_many") {
                FieldShape::ManyToMany
            } else {
                return Err(meta.error(
                    "unsupported record attribute, expected `relation`, `one_to_one`, \
                     `one_to_many`, `many_to_many` or `skip`",
                ));
            };

            if seen_relation {
                return Err(meta.error("a field can only declare one relation"));
            }
            seen_relation = true;

            let target: LitStr = meta.value()?.parse()?;
            shape = make(target);
            Ok(())
        })?;
    }

    Ok(FieldSpec {
        ident,
        name,
        shape,
        skip,
    })
}

fn field_kind_tokens(shape: &FieldShape) -> TokenStream {
    let field_kind = core_paths::field_kind();
    match shape {
        FieldShape::Scalar => quote!(#field_kind::Scalar),
        FieldShape::ForeignKey(target) => quote!(#field_kind::ForeignKey { target: #target }),
        FieldShape::OneToOne(target) => quote!(#field_kind::OneToOne { target: #target }),
        FieldShape::OneToMany(target) => quote!(#field_kind::OneToMany { target: #target }),
        FieldShape::ManyToMany(target) => quote!(#field_kind::ManyToMany { target: #target }),
    }
}

/// Generate `Record` and `Model` implementations for a struct.
pub(crate) fn generate_record_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    struct_name,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                struct_name,
                "Record can only be derived for structs",
            ));
        }
    };

    let options = parse_struct_options(&input)?;
    let specs = fields.iter().map(parse_field).collect::<Result<Vec<_>>>()?;
    let visible: Vec<&FieldSpec> = specs.iter().filter(|spec| !spec.skip).collect();

    let record = core_paths::record();
    let model = core_paths::model();
    let value = core_paths::value();
    let to_value = core_paths::to_value();
    let model_descriptor = core_paths::model_descriptor();
    let field_descriptor = core_paths::field_descriptor();
    let option = std_paths::option();
    let string = std_paths::string();

    let model_name = options
        .model
        .clone()
        .unwrap_or_else(|| LitStr::new(&struct_name.to_string(), struct_name.span()));

    let match_arms = visible.iter().map(|spec| {
        let ident = &spec.ident;
        let name = &spec.name;
        quote! {
            #name => #option::Some(#to_value::to_value(&self.#ident)),
        }
    });

    let display_fn = match &options.display {
        Some(display) => {
            let spec = visible
                .iter()
                .find(|spec| spec.name == display.value())
                .ok_or_else(|| {
                    Error::new_spanned(display, "display must name a non-skipped field")
                })?;
            let ident = &spec.ident;
            quote! {
                fn display(&self) -> #string {
                    <#value as ::std::string::ToString>::to_string(
                        &#to_value::to_value(&self.#ident),
                    )
                }
            }
        }
        None => quote!(),
    };

    let descriptors = visible.iter().map(|spec| {
        let name = &spec.name;
        let kind = field_kind_tokens(&spec.shape);
        quote!(#field_descriptor::new(#name, #kind))
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #record for #struct_name #ty_generics #where_clause {
            fn attribute(&self, name: &str) -> #option<#value> {
                match name {
                    #(#match_arms)*
                    _ => #option::None,
                }
            }

            #display_fn
        }

        impl #impl_generics #model for #struct_name #ty_generics #where_clause {
            fn descriptor() -> &'static #model_descriptor {
                static DESCRIPTOR: #model_descriptor =
                    #model_descriptor::new(#model_name, &[#(#descriptors),*]);
                &DESCRIPTOR
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_tuple_structs() {
        let input: DeriveInput = syn::parse_quote! {
            struct Pair(i32, i32);
        };
        let err = generate_record_impl(input).unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn rejects_two_relations_on_one_field() {
        let input: DeriveInput = syn::parse_quote! {
            struct Banquet {
                #[record(relation = "Event", one_to_one = "Event")]
                event: Option<Event>,
            }
        };
        let err = generate_record_impl(input).unwrap_err();
        assert!(err.to_string().contains("one relation"));
    }

    #[test]
    fn display_must_name_a_field() {
        let input: DeriveInput = syn::parse_quote! {
            #[record(display = "title")]
            struct Room {
                name: String,
            }
        };
        let err = generate_record_impl(input).unwrap_err();
        assert!(err.to_string().contains("display"));
    }

    #[test]
    fn skipped_fields_are_not_exposed() {
        let input: DeriveInput = syn::parse_quote! {
            struct Room {
                name: String,
                #[record(skip)]
                secret: String,
            }
        };
        let tokens = generate_record_impl(input).unwrap().to_string();
        assert!(tokens.contains("\"name\""));
        assert!(!tokens.contains("\"secret\""));
    }

    #[test]
    fn relation_fields_get_foreign_key_kind() {
        let input: DeriveInput = syn::parse_quote! {
            #[record(model = "banquet")]
            struct Banquet {
                #[record(relation = "Event")]
                event: Option<Event>,
            }
        };
        let tokens = generate_record_impl(input).unwrap().to_string();
        assert!(tokens.contains("ForeignKey"));
        assert!(tokens.contains("\"banquet\""));
    }
}
