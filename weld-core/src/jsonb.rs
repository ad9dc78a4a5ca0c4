use crate::Result;
use serde::Serialize;

/// JSON object with one member per entry of `map`, ready to be bound to a
/// `jsonb` column.
///
/// ```rust
/// use std::collections::BTreeMap;
/// use weld_core::map_to_jsonb;
/// let scores = BTreeMap::from([("alice", 3), ("bob", 5)]);
/// let json = map_to_jsonb(&scores).unwrap();
/// assert_eq!(json.to_string(), r#"{"alice":3,"bob":5}"#);
/// ```
pub fn map_to_jsonb<K, V>(map: impl IntoIterator<Item = (K, V)>) -> Result<serde_json::Value>
where
    K: ToString,
    V: Serialize,
{
    map.into_iter()
        .map(|(k, v)| Ok((k.to_string(), serde_json::to_value(v)?)))
        .collect::<Result<serde_json::Map<_, _>>>()
        .map(serde_json::Value::Object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AsValue, Value};
    use std::collections::HashMap;

    #[test]
    fn nested_values() {
        let map = HashMap::from([("tags".to_string(), vec!["a", "b"])]);
        let json = map_to_jsonb(&map).unwrap();
        assert_eq!(json["tags"][1], "b");
        assert!(matches!(json.as_value(), Value::Json(Some(..))));
    }

    #[test]
    fn empty_map_is_an_empty_object() {
        let json = map_to_jsonb(HashMap::<String, i32>::new()).unwrap();
        assert_eq!(json.to_string(), "{}");
    }
}
