use serde::Deserialize;

use crate::ir::Node;

/// Contract violations in the input document.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset is not valid JSON: {0}")]
    Json(String),
    #[error("node '{path}' has neither a value nor children")]
    EmptyNode { path: String },
    #[error("node '{path}' has both a value and children")]
    ValueOnInternal { path: String },
    #[error("node '{path}' has a non-numeric value '{raw}'")]
    NonNumericValue { path: String, raw: String },
    #[error("node '{path}' has a negative value {value}")]
    NegativeValue { path: String, value: f64 },
    #[error("node '{path}' has a non-finite value")]
    NonFiniteValue { path: String },
}

/// Raw document shape before contract validation. The upstream movie
/// dataset stores `value` as a JSON string ("936662225"), so the field is
/// deserialized loosely and coerced afterwards.
#[derive(Debug, Deserialize)]
struct RawNode {
    name: String,
    category: Option<String>,
    value: Option<serde_json::Value>,
    children: Option<Vec<RawNode>>,
}

/// Parses a JSON dataset document into the validated tree.
///
/// Strict JSON is tried first; json5 covers hand-edited inputs with
/// trailing commas or comments. Validation fails fast on the first
/// contract violation instead of coercing bad nodes to zero.
pub fn parse_dataset(input: &str) -> Result<Node, DatasetError> {
    let raw: RawNode = match serde_json::from_str(input) {
        Ok(raw) => raw,
        Err(json_err) => {
            json5::from_str(input).map_err(|_| DatasetError::Json(json_err.to_string()))?
        }
    };
    validate(raw, "")
}

fn validate(raw: RawNode, parent_path: &str) -> Result<Node, DatasetError> {
    let path = if parent_path.is_empty() {
        raw.name.clone()
    } else {
        format!("{}/{}", parent_path, raw.name)
    };

    let children = raw.children.unwrap_or_default();
    let value = raw
        .value
        .map(|v| coerce_value(v, &path))
        .transpose()?;

    match (value, children.is_empty()) {
        (Some(_), false) => return Err(DatasetError::ValueOnInternal { path }),
        (None, true) => return Err(DatasetError::EmptyNode { path }),
        _ => {}
    }

    if let Some(value) = value {
        if !value.is_finite() {
            return Err(DatasetError::NonFiniteValue { path });
        }
        if value < 0.0 {
            return Err(DatasetError::NegativeValue { path, value });
        }
    }

    let children = children
        .into_iter()
        .map(|child| validate(child, &path))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Node {
        name: raw.name,
        category: raw.category,
        value,
        children,
    })
}

fn coerce_value(value: serde_json::Value, path: &str) -> Result<f64, DatasetError> {
    match value {
        serde_json::Value::Number(num) => {
            num.as_f64().ok_or_else(|| DatasetError::NonFiniteValue {
                path: path.to_string(),
            })
        }
        serde_json::Value::String(raw) => {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| DatasetError::NonNumericValue {
                    path: path.to_string(),
                    raw,
                })
        }
        other => Err(DatasetError::NonNumericValue {
            path: path.to_string(),
            raw: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_dataset() {
        let input = r#"{
            "name": "Movies",
            "children": [
                {
                    "name": "Action",
                    "children": [
                        {"name": "Avatar", "category": "Action", "value": 760505847}
                    ]
                }
            ]
        }"#;
        let tree = parse_dataset(input).unwrap();
        assert_eq!(tree.name, "Movies");
        assert_eq!(tree.children.len(), 1);
        let leaf = &tree.children[0].children[0];
        assert_eq!(leaf.category.as_deref(), Some("Action"));
        assert_eq!(leaf.value, Some(760505847.0));
    }

    #[test]
    fn coerces_string_values() {
        let input = r#"{"name": "r", "children": [
            {"name": "a", "category": "a", "value": "123456789"}
        ]}"#;
        let tree = parse_dataset(input).unwrap();
        assert_eq!(tree.children[0].value, Some(123456789.0));
    }

    #[test]
    fn accepts_json5_input() {
        let input = "{name: 'r', children: [{name: 'a', category: 'a', value: 5},]}";
        let tree = parse_dataset(input).unwrap();
        assert_eq!(tree.children[0].value, Some(5.0));
    }

    #[test]
    fn rejects_node_without_value_or_children() {
        let input = r#"{"name": "r", "children": [{"name": "hollow"}]}"#;
        let err = parse_dataset(input).unwrap_err();
        assert!(matches!(err, DatasetError::EmptyNode { ref path } if path == "r/hollow"));
    }

    #[test]
    fn rejects_value_on_internal_node() {
        let input = r#"{"name": "r", "value": 3, "children": [
            {"name": "a", "value": 1}
        ]}"#;
        assert!(matches!(
            parse_dataset(input).unwrap_err(),
            DatasetError::ValueOnInternal { .. }
        ));
    }

    #[test]
    fn rejects_negative_value() {
        let input = r#"{"name": "r", "children": [{"name": "a", "value": -2}]}"#;
        assert!(matches!(
            parse_dataset(input).unwrap_err(),
            DatasetError::NegativeValue { value, .. } if value == -2.0
        ));
    }

    #[test]
    fn rejects_non_numeric_string_value() {
        let input = r#"{"name": "r", "children": [{"name": "a", "value": "lots"}]}"#;
        assert!(matches!(
            parse_dataset(input).unwrap_err(),
            DatasetError::NonNumericValue { ref raw, .. } if raw == "lots"
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_dataset("{name:").unwrap_err(),
            DatasetError::Json(_)
        ));
    }
}
