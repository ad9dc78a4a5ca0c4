mod decode_field;
mod record_trait;

use decode_field::decode_field;
use proc_macro::TokenStream;
use record_trait::record_trait;
use syn::{Fields, ItemStruct, parse_macro_input};

/// Implements `weld::Record` for a struct with named fields.
///
/// Every field binds to the named token `@field_name` and is decoded from the
/// column with the snake cased field name. Field attributes:
/// - `#[weld(name = "column")]` decodes the field from a different column.
/// - `#[weld(skip)]` leaves the field out of both bindings and decoding.
#[proc_macro_derive(Record, attributes(weld))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let Fields::Named(..) = &item.fields else {
        panic!(
            "Record can only be derived for structs with named fields, `{}` is not",
            item.ident
        );
    };
    let fields = item
        .fields
        .iter()
        .map(decode_field)
        .filter(|v| !v.skip)
        .collect::<Vec<_>>();
    record_trait(&item, &fields).into()
}
