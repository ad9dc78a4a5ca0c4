use convert_case::{Case, Casing};
use quote::ToTokens;
use syn::{Field, Ident, LitStr, Type, parse::ParseBuffer};

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    /// Named token, without the prefix.
    pub(crate) name: String,
    pub(crate) column: String,
    pub(crate) skip: bool,
}

pub(crate) fn decode_field(field: &Field) -> FieldMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Field is expected to have a name");
    let name = ident.to_string().trim_start_matches("r#").to_string();
    // Digits are not word boundaries, `field1` stays `field1`
    let column = if name.chars().any(char::is_uppercase) {
        name.to_case(Case::Snake)
    } else {
        name.clone()
    };
    let mut metadata = FieldMetadata {
        column,
        ident,
        ty: field.ty.clone(),
        name,
        skip: false,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if !meta.path().is_ident("weld") {
            continue;
        }
        let Ok(list) = meta.require_list() else {
            panic!("Error while parsing `weld`, use it like: `#[weld(attribute = value, ...)]`");
        };
        let _ = list.parse_nested_meta(|arg| {
            if arg.path.is_ident("name") {
                let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                    panic!("Error while parsing `name`, use it like: `#[weld(name = \"my_column\")]`");
                };
                metadata.column = v.value();
            } else if arg.path.is_ident("skip") {
                let Err(..) = arg.value() else {
                    // value() is Err for Meta::Path
                    panic!("Error while parsing `skip`, use it like: `#[weld(skip)]`");
                };
                metadata.skip = true;
            } else {
                panic!(
                    "Unknown attribute `{}` inside weld macro",
                    arg.path.to_token_stream()
                );
            }
            Ok(())
        });
    }
    metadata
}
