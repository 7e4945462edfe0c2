#![deny(unsafe_code)]

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

/// A single cell of a record.
///
/// Deserializes untagged so that plain JSON objects (`{"capacity": 12.5,
/// "country": "Thailand", "region": null}`) load without ceremony.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Numeric view of the value. Text that parses as a number counts.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            Self::Bool(_) | Self::Missing => None,
        }
    }

    /// Text rendering used for equality and substring tests.
    ///
    /// Missing renders as the empty string; integral numbers drop the
    /// trailing `.0`.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Bool(b) => b.to_string(),
            Self::Missing => String::new(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One row of the backing collection.
///
/// Fields keep the order of the source document. Nested objects load as
/// dotted names (`organization.name`) and arrays as comma-separated text.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
#[serde(transparent)]
pub struct Record {
    pub fields: IndexMap<String, FieldValue>,
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, RawValue>::deserialize(deserializer)?;
        let mut fields = IndexMap::with_capacity(raw.len());
        for (name, value) in raw {
            value.flatten_into(&mut fields, name);
        }
        Ok(Self { fields })
    }
}

/// Any JSON-shaped value, before flattening into a [`Record`].
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<RawValue>),
    Object(IndexMap<String, RawValue>),
}

impl RawValue {
    fn flatten_into(self, fields: &mut IndexMap<String, FieldValue>, name: String) {
        match self {
            Self::Object(children) => {
                for (key, child) in children {
                    child.flatten_into(fields, format!("{name}.{key}"));
                }
            }
            other => {
                fields.insert(name, other.into_value());
            }
        }
    }

    fn into_value(self) -> FieldValue {
        match self {
            Self::Null => FieldValue::Missing,
            Self::Bool(b) => FieldValue::Bool(b),
            Self::Number(n) => FieldValue::Number(n),
            Self::Text(s) => FieldValue::Text(s),
            Self::List(items) => join_text(items),
            Self::Object(children) => join_text(children.into_values()),
        }
    }
}

fn join_text(values: impl IntoIterator<Item = RawValue>) -> FieldValue {
    let parts: Vec<String> = values
        .into_iter()
        .map(RawValue::into_value)
        .filter(|value| !value.is_missing())
        .map(|value| value.as_text())
        .collect();
    if parts.is_empty() {
        FieldValue::Missing
    } else {
        FieldValue::Text(parts.join(", "))
    }
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, handy for fixtures.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Value of a field, `Missing` when absent.
    pub fn get(&self, name: &str) -> &FieldValue {
        static MISSING: FieldValue = FieldValue::Missing;
        self.fields.get(name).unwrap_or(&MISSING)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
