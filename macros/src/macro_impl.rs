use proc_macro2::TokenStream;
use quote::{format_ident, quote};

pub fn derive_buildable(item: &syn::ItemStruct) -> TokenStream {
    let item_ident = &item.ident;
    let type_name = item_ident.to_string();

    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();

    let fields: Vec<&syn::Field> = match &item.fields {
        syn::Fields::Named(named) => named.named.iter().collect(),
        syn::Fields::Unit => vec![],
        syn::Fields::Unnamed(_) => {
            return quote! { compile_error!("Buildable requires named fields"); };
        }
    };

    let mut property_keys: Vec<TokenStream> = vec![];
    let mut property_infos: Vec<TokenStream> = vec![];

    for field in fields {
        let field_ident = field.ident.as_ref().unwrap();
        let field_type = &field.ty;

        let attrs = match FieldAttrs::parse(&field.attrs) {
            Ok(attrs) => attrs,
            Err(err) => return err.to_compile_error(),
        };
        if attrs.skip {
            continue;
        }

        let is_option = option_argument(field_type).is_some();
        if attrs.non_null && !is_option {
            return syn::Error::new_spanned(
                field_type,
                "`non_null` only applies to Option fields",
            )
            .to_compile_error();
        }

        let name = property_name(field_ident);
        let key_ident = format_ident!("{}", name.to_uppercase());
        let required = attrs.required;
        let nullable = is_option && !attrs.non_null;

        let is_null = if is_option {
            quote! { |x: &Self| x.#field_ident.is_none() }
        } else {
            quote! { |_: &Self| false }
        };

        property_keys.push(quote! {
            pub const #key_ident: ::fluent_construction::Property<Self, #field_type> =
                ::fluent_construction::Property::new(
                    #name,
                    |x: &mut Self, v: #field_type| x.#field_ident = v,
                );
        });

        property_infos.push(quote! {
            ::fluent_construction::PropertyInfo {
                name: #name,
                required: #required,
                nullable: #nullable,
                value_type: ::core::any::TypeId::of::<#field_type>,
                is_null: #is_null,
                write_any: |x: &mut Self, v: &dyn ::core::any::Any| {
                    match v.downcast_ref::<#field_type>() {
                        ::core::option::Option::Some(v) => {
                            x.#field_ident = ::core::clone::Clone::clone(v);
                            true
                        }
                        ::core::option::Option::None => false,
                    }
                },
            }
        });
    }

    quote! {
        impl #impl_generics #item_ident #ty_generics #where_clause {
            #(#property_keys)*
        }

        impl #impl_generics ::fluent_construction::Buildable for #item_ident #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;

            const PROPERTIES: &'static [::fluent_construction::PropertyInfo<Self>] =
                &[#(#property_infos),*];
        }
    }
}

#[derive(Default)]
struct FieldAttrs {
    required: bool,
    non_null: bool,
    skip: bool,
}

impl FieldAttrs {
    fn parse(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut parsed = FieldAttrs::default();

        for attr in attrs {
            if !attr.path().is_ident("buildable") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("required") {
                    parsed.required = true;
                    Ok(())
                } else if meta.path.is_ident("non_null") {
                    parsed.non_null = true;
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    parsed.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `required`, `non_null` or `skip`"))
                }
            })?;
        }

        Ok(parsed)
    }
}

fn property_name(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    name.trim_start_matches("r#").to_string()
}

fn option_argument(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }

    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(source: &str) -> String {
        let item = syn::parse_str::<syn::ItemStruct>(source).unwrap();
        derive_buildable(&item).to_string()
    }

    #[test]
    fn generates_a_key_and_descriptor_per_field() {
        let output = derive(
            "struct Profile { nickname: Option<String>, greeting: String }",
        );

        assert!(output.contains("NICKNAME"));
        assert!(output.contains("GREETING"));
        assert!(output.contains("\"nickname\""));
        assert!(output.contains("Buildable"));
    }

    #[test]
    fn skip_excludes_the_field() {
        let output = derive(
            "struct Profile { nickname: Option<String>, #[buildable(skip)] cache: Option<String> }",
        );

        assert!(output.contains("NICKNAME"));
        assert!(!output.contains("CACHE"));
        assert!(!output.contains("\"cache\""));
    }

    #[test]
    fn non_null_on_a_plain_field_is_rejected() {
        let output = derive("struct Profile { #[buildable(non_null)] greeting: String }");

        assert!(output.contains("compile_error"));
    }

    #[test]
    fn unknown_attribute_is_rejected() {
        let output = derive("struct Profile { #[buildable(mandatory)] greeting: String }");

        assert!(output.contains("compile_error"));
    }

    #[test]
    fn detects_option_fields() {
        let option = syn::parse_str::<syn::Type>("Option<String>").unwrap();
        let plain = syn::parse_str::<syn::Type>("String").unwrap();
        let qualified = syn::parse_str::<syn::Type>("core::option::Option<u32>").unwrap();

        assert!(option_argument(&option).is_some());
        assert!(option_argument(&plain).is_none());
        assert!(option_argument(&qualified).is_some());
    }

    #[test]
    fn raw_identifiers_lose_their_prefix() {
        let ident = syn::parse_str::<syn::Ident>("r#type").unwrap();

        assert_eq!(property_name(&ident), "type");
    }
}
