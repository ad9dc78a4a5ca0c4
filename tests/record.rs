#[cfg(test)]
mod tests {
    use time::macros::date;
    use uuid::Uuid;
    use weld::{FieldDef, NamedValue, Record, Value};

    #[derive(Record, Default, Debug, PartialEq)]
    struct Customer {
        id: Uuid,
        #[weld(name = "full_name")]
        name: String,
        r#type: Option<i16>,
        birthday: Option<time::Date>,
        emails: Vec<String>,
        #[weld(skip)]
        cache: Vec<u8>,
    }

    #[test]
    fn field_descriptors() {
        assert_eq!(
            Customer::fields(),
            &[
                FieldDef {
                    name: "id",
                    column: "id"
                },
                FieldDef {
                    name: "name",
                    column: "full_name"
                },
                FieldDef {
                    name: "type",
                    column: "type"
                },
                FieldDef {
                    name: "birthday",
                    column: "birthday"
                },
                FieldDef {
                    name: "emails",
                    column: "emails"
                },
            ]
        );
    }

    #[test]
    fn bindings_use_field_names() {
        let customer = Customer {
            name: "Ada".into(),
            r#type: Some(2),
            emails: vec!["ada@example.com".into()],
            ..Default::default()
        };
        let bindings = customer.bindings();
        assert_eq!(bindings.len(), 5);
        assert_eq!(
            bindings[1],
            NamedValue::new("name", Value::Varchar(Some("Ada".into())))
        );
        assert_eq!(bindings[2], NamedValue::new("type", Value::Int16(Some(2))));
        assert!(bindings[4].value.is_collection());
    }

    #[test]
    fn set_columns() {
        let mut customer = Customer::default();
        let id = Uuid::parse_str("5e915574-bb30-4430-98cf-c5854f61fbbd").unwrap();
        assert!(customer.set_column("id", Value::Uuid(Some(id))).unwrap());
        assert!(
            customer
                .set_column("full_name", Value::Varchar(Some("Ada".into())))
                .unwrap()
        );
        assert!(customer.set_column("type", Value::Int32(Some(3))).unwrap());
        assert!(
            customer
                .set_column("birthday", Value::Date(Some(date!(1815 - 12 - 10))))
                .unwrap()
        );
        assert!(!customer.set_column("name", Value::Null).unwrap());
        assert!(!customer.set_column("cache", Value::Null).unwrap());
        assert!(
            customer
                .set_column("type", Value::Varchar(Some("three".into())))
                .is_err()
        );
        assert_eq!(customer.id, id);
        assert_eq!(customer.name, "Ada");
        assert_eq!(customer.r#type, Some(3));
        assert_eq!(customer.birthday, Some(date!(1815 - 12 - 10)));
        assert!(customer.cache.is_empty());
    }
}
