//! Caller-supplied request options.
//!
//! `Options` collects query parameters and extra headers for one call.
//! Nothing here knows about allow-lists; filtering happens in
//! `crate::endpoint` once the target endpoint is known.

use std::collections::BTreeMap;

use serde_json::Value;

/// A single query parameter value.
///
/// Values are forwarded verbatim apart from their string rendering: lists
/// are comma-joined and booleans become `true`/`false`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    List(Vec<String>),
}

impl ParamValue {
    /// Render the value as it appears in the query string (before encoding).
    pub fn to_query_value(&self) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Float(f) => f.to_string(),
            ParamValue::List(items) => items.join(","),
        }
    }

    /// Convert a JSON scalar or array of scalars. Objects and nulls have no
    /// query-string form and yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(ParamValue::Str(s.clone())),
            Value::Bool(b) => Some(ParamValue::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(ParamValue::Int(i)),
                None => n.as_f64().map(ParamValue::Float),
            },
            Value::Array(items) => items
                .iter()
                .map(|item| ParamValue::from_json(item).map(|v| v.to_query_value()))
                .collect::<Option<Vec<_>>>()
                .map(ParamValue::List),
            Value::Null | Value::Object(_) => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ParamValue {
    fn from(value: &[&str]) -> Self {
        ParamValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Query parameters and extra headers for a single call.
///
/// Parameters are keyed by name, so setting the same name twice keeps the
/// last value. Iteration order is alphabetical, which keeps built requests
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    params: BTreeMap<String, ParamValue>,
    headers: Vec<(String, String)>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Add a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Tag the request with an `x-opaque-id` header for server-side tracing.
    pub fn opaque_id(self, id: impl Into<String>) -> Self {
        self.header("x-opaque-id", id)
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.headers.is_empty()
    }
}
