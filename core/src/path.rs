//! Path building and required-argument checks.
//!
//! A path segment is `Option<&str>`: `None` and `Some("")` both mean "not
//! supplied" and are dropped, so later segments close up without leaving an
//! empty `//` gap. Present segments are percent-encoded, except that `,`
//! and `*` stay literal so multi-target and wildcard expressions such as
//! `logs-*,metrics` reach the server intact.

use serde_json::Value;

use crate::error::ApiError;

/// True when a path argument counts as not supplied.
pub fn is_absent(segment: Option<&str>) -> bool {
    segment.is_none_or(str::is_empty)
}

/// Percent-encode a single path segment.
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment)
        .replace("%2C", ",")
        .replace("%2A", "*")
}

/// Join the present segments into an absolute path.
///
/// ```
/// use search_sdk::path::make_path;
///
/// assert_eq!(make_path(&[Some("_ingest"), Some("pipeline"), None]), "/_ingest/pipeline");
/// assert_eq!(make_path(&[Some("_component_template"), Some("a b")]), "/_component_template/a%20b");
/// ```
pub fn make_path(segments: &[Option<&str>]) -> String {
    let mut path = String::new();
    for segment in segments.iter().copied().filter(|s| !is_absent(*s)).flatten() {
        path.push('/');
        path.push_str(&encode_segment(segment));
    }
    if path.is_empty() {
        path.push('/');
    }
    path
}

/// Reject a required path argument that is empty.
pub fn require<'a>(name: &'static str, value: &'a str) -> Result<&'a str, ApiError> {
    if value.is_empty() {
        return Err(ApiError::InvalidArgument(name));
    }
    Ok(value)
}

/// Reject a required body that is null, an empty string, or an empty array.
/// An empty object is a legitimate body and passes.
pub fn require_body<'a>(name: &'static str, body: &'a Value) -> Result<&'a Value, ApiError> {
    let absent = match body {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    };
    if absent {
        return Err(ApiError::InvalidArgument(name));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_segments_are_skipped() {
        assert_eq!(make_path(&[Some("_cluster"), Some("state"), None, None]), "/_cluster/state");
        assert_eq!(
            make_path(&[Some("_cluster"), Some("state"), None, Some("logs")]),
            "/_cluster/state/logs"
        );
    }

    #[test]
    fn empty_string_counts_as_absent() {
        assert!(is_absent(None));
        assert!(is_absent(Some("")));
        assert!(!is_absent(Some("x")));
        assert_eq!(make_path(&[Some("_cluster"), Some("health"), Some("")]), "/_cluster/health");
    }

    #[test]
    fn segments_are_percent_encoded() {
        assert_eq!(
            make_path(&[Some("_ingest"), Some("pipeline"), Some("my pipe/v1")]),
            "/_ingest/pipeline/my%20pipe%2Fv1"
        );
    }

    #[test]
    fn commas_and_wildcards_stay_literal() {
        assert_eq!(encode_segment("logs-*,metrics"), "logs-*,metrics");
        assert_eq!(encode_segment("a?b"), "a%3Fb");
    }

    #[test]
    fn no_segments_yields_root() {
        assert_eq!(make_path(&[None]), "/");
    }

    #[test]
    fn require_rejects_empty() {
        assert!(matches!(require("name", ""), Err(ApiError::InvalidArgument("name"))));
        assert_eq!(require("name", "tpl").unwrap(), "tpl");
    }

    #[test]
    fn require_body_rules() {
        assert!(require_body("body", &Value::Null).is_err());
        assert!(require_body("body", &json!("")).is_err());
        assert!(require_body("body", &json!([])).is_err());
        assert!(require_body("body", &json!({})).is_ok());
        assert!(require_body("body", &json!({"persistent": {}})).is_ok());
    }
}
