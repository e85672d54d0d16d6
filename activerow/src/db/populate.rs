use serde::de::DeserializeOwned;

use crate::db::DbError;

/// Loosely typed property bag accepted by the generated `new_instance_from`.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Converts one property into a field value. Absent or null keys fall back
/// to the field's `Default`; a present value that does not convert is an
/// error, not a silent default.
pub fn field_from_map<T>(properties: &Properties, key: &str) -> Result<T, DbError>
where
    T: DeserializeOwned + Default,
{
    match properties.get(key) {
        None | Some(serde_json::Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| DbError::Populate(format!("property `{}`: {}", key, e))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Properties, field_from_map};

    fn properties(value: serde_json::Value) -> Properties {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!("tests pass objects"),
        }
    }

    #[test]
    fn present_keys_convert() {
        let props = properties(json!({"name": "ada", "age": 36}));
        let name: String = field_from_map(&props, "name").unwrap();
        let age: i32 = field_from_map(&props, "age").unwrap();
        assert_eq!(name, "ada");
        assert_eq!(age, 36);
    }

    #[test]
    fn absent_and_null_keys_default() {
        let props = properties(json!({"name": null}));
        let name: String = field_from_map(&props, "name").unwrap();
        let age: i32 = field_from_map(&props, "age").unwrap();
        assert_eq!(name, "");
        assert_eq!(age, 0);
    }

    #[test]
    fn mismatched_values_error() {
        let props = properties(json!({"age": "not a number"}));
        let result: Result<i32, _> = field_from_map(&props, "age");
        assert!(result.is_err());
    }
}
