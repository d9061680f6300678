//! Raw documentation dump records, as published by the doc source.
//!
//! Records are kept as `serde_json::Value` until tree construction so every
//! element can hand back its source record untouched. The typed view in
//! [`RawRecord`] only reads the fields the graph understands.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level shape of a documentation dump.
///
/// Any category may be absent or `null`; both read as empty.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawDocs {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub classes: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub typedefs: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub interfaces: Vec<Value>,
}

impl RawDocs {
    /// Total number of top-level records across all categories.
    pub fn len(&self) -> usize {
        self.classes.len() + self.typedefs.len() + self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Source location of a documented symbol.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct RawMeta {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line: u32,
}

/// Typed view over a single raw record.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub meta: Option<RawMeta>,
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "flatten_tokens")]
    pub type_tokens: Vec<String>,
    #[serde(default, deserialize_with = "return_spec")]
    pub returns: Option<RawReturns>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub examples: Vec<String>,
    #[serde(default, deserialize_with = "flatten_tokens")]
    pub extends: Vec<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub variable: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub props: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub methods: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub events: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub params: Vec<Value>,
}

/// Return specification of a method: flattened type tokens plus prose.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawReturns {
    pub types: Vec<String>,
    pub description: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn flatten_tokens<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let mut tokens = Vec::new();
    if let Some(value) = &value {
        flatten_into(value, &mut tokens);
    }
    Ok(tokens)
}

fn return_spec<'de, D>(deserializer: D) -> Result<Option<RawReturns>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };

    // Either `{ types, description }` or a bare (nested) type array.
    let returns = match &value {
        Value::Object(map) => {
            let mut types = Vec::new();
            if let Some(t) = map.get("types") {
                flatten_into(t, &mut types);
            }
            RawReturns {
                types,
                description: map
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }
        }
        other => {
            let mut types = Vec::new();
            flatten_into(other, &mut types);
            RawReturns {
                types,
                description: None,
            }
        }
    };

    Ok(Some(returns))
}

/// Depth-first flattening of nested string arrays. Non-string leaves are dropped.
pub(crate) fn flatten_into(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        _ => {}
    }
}
