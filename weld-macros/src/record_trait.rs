use crate::decode_field::FieldMetadata;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ItemStruct;

pub(crate) fn record_trait(item: &ItemStruct, fields: &[FieldMetadata]) -> TokenStream {
    let struct_name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let field_defs = fields.iter().map(|f| {
        let name = &f.name;
        let column = &f.column;
        quote! {
            ::weld::FieldDef { name: #name, column: #column }
        }
    });
    let bindings = fields.iter().map(|f| {
        let name = &f.name;
        let ident = &f.ident;
        quote! {
            ::weld::NamedValue::new(
                #name,
                ::weld::AsValue::as_value(::std::clone::Clone::clone(&self.#ident)),
            )
        }
    });
    let assignments = fields.iter().map(|f| {
        let column = &f.column;
        let ident = &f.ident;
        let ty = &f.ty;
        quote! {
            #column => {
                self.#ident = <#ty as ::weld::AsValue>::try_from_value(value)?;
                Ok(true)
            }
        }
    });
    quote! {
        impl #impl_generics ::weld::Record for #struct_name #ty_generics #where_clause {
            fn fields() -> &'static [::weld::FieldDef] {
                const FIELDS: &[::weld::FieldDef] = &[#(#field_defs),*];
                FIELDS
            }
            fn bindings(&self) -> ::std::vec::Vec<::weld::NamedValue> {
                ::std::vec![#(#bindings),*]
            }
            #[allow(unreachable_patterns)]
            fn set_column(&mut self, column: &str, value: ::weld::Value) -> ::weld::Result<bool> {
                match column {
                    #(#assignments)*
                    _ => {
                        let _ = value;
                        Ok(false)
                    }
                }
            }
        }
    }
}
