use std::collections::HashMap;

use proc_macro::TokenStream;
use proc_macro2::{Literal, Span};
use quote::{format_ident, quote};
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, Ident, Type};

/// Derives `soa_vector::Row` for a struct with named fields of `Copy` types.
///
/// For a struct `Node { parent: u32, value: u32 }` this generates
/// - the `Row` implementation with columns `(u32, u32)`,
/// - a module `node_columns` with one key type per field
///   (`node_columns::Parent`, `node_columns::Value`),
/// - associated constants `Node::PARENT` and `Node::VALUE` holding those keys.
#[proc_macro_derive(Row)]
pub fn derive_row(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    match expand_row(&input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand_row(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Row)] does not support generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "#[derive(Row)] requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[derive(Row)] can only be applied to structs",
            ))
        }
    };

    if fields.is_empty() || fields.len() > 12 {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Row)] supports between one and twelve fields",
        ));
    }

    let name = &input.ident;
    let vis = &input.vis;
    let module = Ident::new(
        &format!("{}_columns", snake_case(&name.to_string())),
        Span::call_site(),
    );

    let field_names = fields
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .collect::<Vec<_>>();
    let field_types = fields.iter().map(|field| &field.ty).collect::<Vec<_>>();
    let columns: Type = parse_quote!((#(#field_types,)*));
    let bindings = (0..fields.len())
        .map(|position| format_ident!("column_{}", position))
        .collect::<Vec<_>>();
    let positions = (0..fields.len())
        .map(Literal::usize_unsuffixed)
        .collect::<Vec<_>>();
    let keys = field_names
        .iter()
        .map(|field| Ident::new(&pascal_case(&plain_name(field)), field.span()))
        .collect::<Vec<_>>();
    let constants = field_names
        .iter()
        .map(|field| Ident::new(&plain_name(field).to_uppercase(), field.span()))
        .collect::<Vec<_>>();

    reject_collisions(&field_names, &keys, "column key")?;
    reject_collisions(&field_names, &constants, "constant")?;

    let key_docs = field_names
        .iter()
        .map(|field| format!("Key of the `{}` column of `{name}`.", plain_name(field)))
        .collect::<Vec<_>>();
    let module_doc = format!("Column keys of `{name}`.");

    Ok(quote! {
        #[doc = #module_doc]
        #vis mod #module {
            #(
                #[doc = #key_docs]
                #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
                pub struct #keys;
            )*
        }

        #(
            // SAFETY: the column is selected from the given storage.
            unsafe impl ::soa_vector::ColumnKey<#name> for #module::#keys {
                type Value = #field_types;

                fn column(
                    storage: &::soa_vector::StorageOf<#name>,
                ) -> &::soa_vector::RawColumn<#field_types> {
                    <::soa_vector::Col<#positions> as ::soa_vector::ColumnKey<#columns>>::column(
                        storage,
                    )
                }
            }
        )*

        #[allow(dead_code)]
        impl #name {
            #(
                #[doc = #key_docs]
                pub const #constants: #module::#keys = #module::#keys;
            )*
        }

        impl ::soa_vector::Row for #name {
            type Columns = #columns;

            fn into_columns(self) -> Self::Columns {
                (#(self.#field_names,)*)
            }

            fn from_columns(columns: Self::Columns) -> Self {
                let (#(#bindings,)*) = columns;
                Self {
                    #(#field_names: #bindings,)*
                }
            }
        }
    })
}

/// Fails if two fields are mapped to the same generated item name.
fn reject_collisions(
    fields: &[&Ident],
    generated: &[Ident],
    kind: &str,
) -> syn::Result<()> {
    let mut seen = HashMap::new();

    for (field, item) in fields.iter().zip(generated) {
        if let Some(previous) = seen.insert(item.to_string(), *field) {
            return Err(syn::Error::new(
                field.span(),
                format!(
                    "fields `{}` and `{}` both map to the {kind} `{item}`",
                    plain_name(previous),
                    plain_name(field)
                ),
            ));
        }
    }

    Ok(())
}

/// Name of a field without the `r#` prefix of raw identifiers.
fn plain_name(field: &Ident) -> String {
    field.to_string().trim_start_matches("r#").to_string()
}

/// Converts a type name to snake case, keeping acronyms together
/// (`HTTPNode` becomes `http_node`).
fn snake_case(name: &str) -> String {
    let characters = name.chars().collect::<Vec<_>>();
    let mut result = String::new();

    for (position, &character) in characters.iter().enumerate() {
        if character.is_uppercase() && position > 0 {
            let previous = characters[position - 1];
            let starts_word = characters
                .get(position + 1)
                .is_some_and(|next| next.is_lowercase());

            if (previous.is_lowercase() || previous.is_numeric())
                || (previous.is_uppercase() && starts_word)
            {
                result.push('_');
            }
        }

        result.extend(character.to_lowercase());
    }

    result
}

fn pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut characters = part.chars();
            characters
                .next()
                .map(|first| first.to_uppercase().chain(characters).collect::<String>())
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn case_conversion() {
        assert_eq!(snake_case("Node"), "node");
        assert_eq!(snake_case("TreeNode"), "tree_node");
        assert_eq!(snake_case("HTTPNode"), "http_node");
        assert_eq!(snake_case("NodeID"), "node_id");
        assert_eq!(snake_case("Tree_Node"), "tree_node");
        assert_eq!(pascal_case("sum_with_parents"), "SumWithParents");
        assert_eq!(pascal_case("value"), "Value");
        assert_eq!(pascal_case("_hidden"), "Hidden");
    }

    #[test]
    fn colliding_keys_are_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Pair {
                foo_bar: u8,
                fooBar: u8,
            }
        };

        let error = expand_row(&input).unwrap_err();
        assert_eq!(
            error.to_string(),
            "fields `foo_bar` and `fooBar` both map to the column key `FooBar`"
        );
    }

    #[test]
    fn colliding_constants_are_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Pair {
                value: u8,
                VALUE: u8,
            }
        };

        let error = expand_row(&input).unwrap_err();
        assert_eq!(
            error.to_string(),
            "fields `value` and `VALUE` both map to the constant `VALUE`"
        );
    }

    #[test]
    fn distinct_fields_expand() {
        let input: DeriveInput = parse_quote! {
            struct HTTPNode {
                parent: u32,
                sum_with_parents: u64,
            }
        };

        let tokens = expand_row(&input).unwrap().to_string();
        assert!(tokens.contains("mod http_node_columns"));
        assert!(tokens.contains("SUM_WITH_PARENTS"));
        assert!(tokens.contains("SumWithParents"));
    }
}
