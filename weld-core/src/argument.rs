use crate::{AsValue, Literal, Record, Value, snake_case};
use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

/// A value bound to a named token (`@name`).
#[derive(Debug, Clone, PartialEq)]
pub struct NamedValue {
    pub name: Cow<'static, str>,
    pub value: Value,
}

impl NamedValue {
    pub fn new(name: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Named bind values coming from a record or a string keyed map.
///
/// Entry order carries no meaning, values are ordered by where their token
/// first appears in the fragment text.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Aggregate {
    entries: Vec<NamedValue>,
}

impl Aggregate {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn with(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.entries.push(NamedValue::new(name, value));
        self
    }
    /// Token names are the field names of the record.
    pub fn from_record<R: Record + ?Sized>(record: &R) -> Self {
        Self {
            entries: record.bindings(),
        }
    }
    /// Token names are the keys converted to snake case.
    pub fn from_map<'a, K, V>(map: impl IntoIterator<Item = (&'a K, &'a V)>) -> Self
    where
        K: AsRef<str> + ?Sized + 'a,
        V: AsValue + Clone + 'a,
    {
        Self {
            entries: map
                .into_iter()
                .map(|(k, v)| NamedValue::new(snake_case(k.as_ref()), v.clone()))
                .collect(),
        }
    }
    pub fn entries(&self) -> &[NamedValue] {
        &self.entries
    }
    pub fn into_entries(self) -> Vec<NamedValue> {
        self.entries
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One bind source of a fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Bound through a placeholder.
    Value(Value),
    /// Spliced into the text in place of its placeholder.
    Literal(Literal),
    /// Resolves the named tokens of the fragment.
    Aggregate(Aggregate),
}

impl<T: AsValue> From<T> for Argument {
    fn from(value: T) -> Self {
        Argument::Value(value.as_value())
    }
}

impl From<&'static str> for Argument {
    fn from(value: &'static str) -> Self {
        Argument::Value(value.into())
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Value(value)
    }
}

impl From<Literal> for Argument {
    fn from(value: Literal) -> Self {
        Argument::Literal(value)
    }
}

impl From<Aggregate> for Argument {
    fn from(value: Aggregate) -> Self {
        Argument::Aggregate(value)
    }
}

/// Everything accepted as the bind sources of a single fragment.
pub trait Arguments {
    fn into_arguments(self) -> Vec<Argument>;
}

impl Arguments for () {
    fn into_arguments(self) -> Vec<Argument> {
        Vec::new()
    }
}

impl Arguments for Vec<Argument> {
    fn into_arguments(self) -> Vec<Argument> {
        self
    }
}

impl Arguments for Aggregate {
    fn into_arguments(self) -> Vec<Argument> {
        vec![Argument::Aggregate(self)]
    }
}

impl<R: Record> Arguments for &R {
    fn into_arguments(self) -> Vec<Argument> {
        Aggregate::from_record(self).into_arguments()
    }
}

impl<K, V, S> Arguments for &HashMap<K, V, S>
where
    K: AsRef<str>,
    V: AsValue + Clone,
    S: BuildHasher,
{
    fn into_arguments(self) -> Vec<Argument> {
        Aggregate::from_map(self).into_arguments()
    }
}

impl<K, V> Arguments for &BTreeMap<K, V>
where
    K: AsRef<str>,
    V: AsValue + Clone,
{
    fn into_arguments(self) -> Vec<Argument> {
        Aggregate::from_map(self).into_arguments()
    }
}

macro_rules! impl_arguments_tuple {
    ($($T:ident),+) => {
        impl<$($T: Into<Argument>),+> Arguments for ($($T,)+) {
            #[allow(non_snake_case)]
            fn into_arguments(self) -> Vec<Argument> {
                let ($($T,)+) = self;
                vec![$($T.into()),+]
            }
        }
    };
}
impl_arguments_tuple!(A1);
impl_arguments_tuple!(A1, A2);
impl_arguments_tuple!(A1, A2, A3);
impl_arguments_tuple!(A1, A2, A3, A4);
impl_arguments_tuple!(A1, A2, A3, A4, A5);
impl_arguments_tuple!(A1, A2, A3, A4, A5, A6);
impl_arguments_tuple!(A1, A2, A3, A4, A5, A6, A7);
impl_arguments_tuple!(A1, A2, A3, A4, A5, A6, A7, A8);
impl_arguments_tuple!(A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_arguments_tuple!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_arguments_tuple!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);
impl_arguments_tuple!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keys_are_snake_cased() {
        let map = HashMap::from([("userName".to_string(), 1i32)]);
        let aggregate = Aggregate::from_map(&map);
        assert_eq!(aggregate.entries()[0].name, "user_name");
        assert_eq!(aggregate.entries()[0].value, Value::Int32(Some(1)));
    }

    #[test]
    fn tuples_convert_each_element() {
        let args = (1i64, "two", Literal::new("NOW()")).into_arguments();
        assert_eq!(
            args,
            vec![
                Argument::Value(Value::Int64(Some(1))),
                Argument::Value(Value::Varchar(Some("two".into()))),
                Argument::Literal(Literal::new("NOW()")),
            ]
        );
        assert!(().into_arguments().is_empty());
    }
}
