//! JSON rendering of tokens, commands and diagnostics.

use serde::Serialize;
use serde_json::Value;

/// Whether source locations are kept in the rendered JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locations {
    /// Keep every `location` field.
    Keep,
    /// Remove every `location` field, at any depth.
    #[default]
    Strip,
}

/// Converts `value` to a JSON value.
///
/// # Errors
///
/// Returns an error if `value` cannot be represented as JSON.
pub fn to_json_value<T: Serialize + ?Sized>(
    value: &T,
    locations: Locations,
) -> Result<Value, serde_json::Error> {
    let mut json = serde_json::to_value(value)?;
    if locations == Locations::Strip {
        strip_locations(&mut json);
    }
    Ok(json)
}

/// Renders `value` as indented JSON.
///
/// # Errors
///
/// Returns an error if `value` cannot be represented as JSON.
pub fn to_pretty_json<T: Serialize + ?Sized>(
    value: &T,
    locations: Locations,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&to_json_value(value, locations)?)
}

fn strip_locations(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("location");
            map.values_mut().for_each(strip_locations);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_locations),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::dialect::Dialect;
    use crate::parser::parse_source;

    #[test]
    fn test_strip_removes_nested_locations() {
        let result = parse_source("DELETE FROM db.t WHERE a = 1", Dialect::default());
        let value = to_json_value(&result.commands, Locations::Strip).unwrap();
        assert_eq!(
            value,
            json!([{
                "kind": "delete",
                "table": {"database": "db", "name": "t"},
                "whereCondition": {
                    "kind": "binary",
                    "operator": "=",
                    "leftOperand": {"kind": "column", "name": "a"},
                    "rightOperand": {"kind": "intLiteral", "value": "1"}
                }
            }])
        );
    }

    #[test]
    fn test_keep_preserves_locations() {
        let result = parse_source("USE db", Dialect::default());
        let value = to_json_value(&result.commands[0], Locations::Keep).unwrap();
        assert_eq!(
            value["location"],
            json!({"from": {"line": 1, "column": 0}, "to": {"line": 1, "column": 6}})
        );
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let result = parse_source("USE db", Dialect::default());
        let text = to_pretty_json(&result.commands, Locations::Strip).unwrap();
        assert!(text.starts_with("[\n  {"));
        assert!(text.contains("\"database\": \"db\""));
    }
}
