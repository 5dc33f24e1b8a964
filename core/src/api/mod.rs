//! Endpoint catalog and by-name dispatch.
//!
//! Typed builders live in `cluster` and `ingest`. `build_request` maps a
//! dotted operation name plus a JSON argument object onto those builders,
//! which is how hosts without Rust types (the C ABI, scripted callers)
//! reach the same request descriptors.

pub mod cluster;
pub mod ingest;

use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::params::{Options, ParamValue};

/// Every registered endpoint.
pub const ENDPOINTS: &[Endpoint] = &[
    cluster::HEALTH,
    cluster::PENDING_TASKS,
    cluster::STATE,
    cluster::STATS,
    cluster::REROUTE,
    cluster::GET_SETTINGS,
    cluster::PUT_SETTINGS,
    cluster::REMOTE_INFO,
    cluster::ALLOCATION_EXPLAIN,
    cluster::DELETE_COMPONENT_TEMPLATE,
    cluster::GET_COMPONENT_TEMPLATE,
    cluster::PUT_COMPONENT_TEMPLATE,
    cluster::EXISTS_COMPONENT_TEMPLATE,
    cluster::DELETE_VOTING_CONFIG_EXCLUSIONS,
    cluster::POST_VOTING_CONFIG_EXCLUSIONS,
    ingest::GET_PIPELINE,
    ingest::PUT_PIPELINE,
    ingest::DELETE_PIPELINE,
    ingest::SIMULATE,
    ingest::PROCESSOR_GROK,
    ingest::GEO_IP_STATS,
];

pub fn find_endpoint(name: &str) -> Option<&'static Endpoint> {
    ENDPOINTS.iter().find(|e| e.name == name)
}

/// Build a request for `operation` from a JSON argument object.
///
/// Recognized keys: path arguments by name (`index`, `metric`, `node_id`,
/// `name`, `id`), `body`, `params` (object of scalars or arrays), and
/// `headers` (object of strings). A path argument is a string or a list of
/// strings, which is joined with commas. Any other key fails with
/// `UnknownParameter`. `args` may be `null` for operations that take no
/// arguments.
///
/// ```
/// use search_sdk::api::build_request;
/// use search_sdk::ClientConfig;
/// use serde_json::json;
///
/// let req = build_request(
///     &ClientConfig::default(),
///     "cluster.state",
///     &json!({"index": "foo", "params": {"local": true}}),
/// )
/// .unwrap();
/// assert_eq!(req.path, "/_cluster/state/_all/foo");
/// assert_eq!(req.param("local"), Some("true"));
/// ```
pub fn build_request(config: &ClientConfig, operation: &str, args: &Value) -> Result<HttpRequest, ApiError> {
    let endpoint =
        find_endpoint(operation).ok_or_else(|| ApiError::UnknownOperation(operation.to_string()))?;
    let empty = Map::new();
    let args = match args {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => return Err(ApiError::InvalidArgument("args")),
    };
    if let Some(key) = args.keys().find(|k| !ARG_KEYS.contains(&k.as_str())) {
        return Err(ApiError::UnknownParameter {
            endpoint: endpoint.name,
            param: key.clone(),
        });
    }
    let options = options_from_args(args)?;
    let body = args.get("body").filter(|b| !b.is_null());
    let required_body = body.unwrap_or(&Value::Null);

    let path_args = PATH_ARGS
        .iter()
        .map(|&key| Ok((key, path_arg(args, key)?)))
        .collect::<Result<Vec<_>, ApiError>>()?;
    let arg = |key: &'static str| lookup(&path_args, key);

    match operation {
        "cluster.health" => cluster::build_health(config, arg("index"), &options),
        "cluster.pending_tasks" => cluster::build_pending_tasks(config, &options),
        "cluster.state" => cluster::build_state(config, arg("metric"), arg("index"), &options),
        "cluster.stats" => cluster::build_stats(config, arg("node_id"), &options),
        "cluster.reroute" => cluster::build_reroute(config, body, &options),
        "cluster.get_settings" => cluster::build_get_settings(config, &options),
        "cluster.put_settings" => cluster::build_put_settings(config, required_body, &options),
        "cluster.remote_info" => cluster::build_remote_info(config, &options),
        "cluster.allocation_explain" => cluster::build_allocation_explain(config, body, &options),
        "cluster.delete_component_template" => {
            cluster::build_delete_component_template(config, arg("name").unwrap_or(""), &options)
        }
        "cluster.get_component_template" => {
            cluster::build_get_component_template(config, arg("name"), &options)
        }
        "cluster.put_component_template" => cluster::build_put_component_template(
            config,
            arg("name").unwrap_or(""),
            required_body,
            &options,
        ),
        "cluster.exists_component_template" => {
            cluster::build_exists_component_template(config, arg("name").unwrap_or(""), &options)
        }
        "cluster.delete_voting_config_exclusions" => {
            cluster::build_delete_voting_config_exclusions(config, &options)
        }
        "cluster.post_voting_config_exclusions" => {
            cluster::build_post_voting_config_exclusions(config, &options)
        }
        "ingest.get_pipeline" => ingest::build_get_pipeline(config, arg("id"), &options),
        "ingest.put_pipeline" => {
            ingest::build_put_pipeline(config, arg("id").unwrap_or(""), required_body, &options)
        }
        "ingest.delete_pipeline" => {
            ingest::build_delete_pipeline(config, arg("id").unwrap_or(""), &options)
        }
        "ingest.simulate" => ingest::build_simulate(config, required_body, arg("id"), &options),
        "ingest.processor_grok" => ingest::build_processor_grok(config, &options),
        "ingest.geo_ip_stats" => ingest::build_geo_ip_stats(config, &options),
        other => Err(ApiError::UnknownOperation(other.to_string())),
    }
}

/// Path arguments `build_request` reads by name.
const PATH_ARGS: &[&str] = &["index", "metric", "node_id", "name", "id"];

/// Every top-level key `build_request` accepts.
const ARG_KEYS: &[&str] = &["index", "metric", "node_id", "name", "id", "body", "params", "headers"];

fn lookup<'a>(path_args: &'a [(&'static str, Option<String>)], key: &str) -> Option<&'a str> {
    path_args
        .iter()
        .find(|(k, _)| *k == key)
        .and_then(|(_, v)| v.as_deref())
}

/// A string, or a list of strings joined with commas. Null is absent.
fn path_arg(args: &Map<String, Value>, key: &'static str) -> Result<Option<String>, ApiError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str())
            .collect::<Option<Vec<_>>>()
            .map(|parts| Some(parts.join(",")))
            .ok_or(ApiError::InvalidArgument(key)),
        Some(_) => Err(ApiError::InvalidArgument(key)),
    }
}

fn options_from_args(args: &Map<String, Value>) -> Result<Options, ApiError> {
    let mut options = Options::new();
    if let Some(params) = args.get("params") {
        let params = params.as_object().ok_or(ApiError::InvalidArgument("params"))?;
        for (name, value) in params {
            let value = ParamValue::from_json(value).ok_or(ApiError::InvalidArgument("params"))?;
            options = options.param(name.clone(), value);
        }
    }
    if let Some(headers) = args.get("headers") {
        let headers = headers.as_object().ok_or(ApiError::InvalidArgument("headers"))?;
        for (name, value) in headers {
            let value = value.as_str().ok_or(ApiError::InvalidArgument("headers"))?;
            options = options.header(name.clone(), value);
        }
    }
    Ok(options)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use serde_json::json;

    fn config() -> ClientConfig {
        ClientConfig::default()
    }

    #[test]
    fn endpoint_names_are_unique() {
        for (i, a) in ENDPOINTS.iter().enumerate() {
            for b in &ENDPOINTS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn every_endpoint_is_dispatchable() {
        let args = json!({
            "name": "tpl",
            "id": "p1",
            "body": {"description": "x"},
        });
        for endpoint in ENDPOINTS {
            let req = build_request(&config(), endpoint.name, &args)
                .unwrap_or_else(|e| panic!("{}: {e}", endpoint.name));
            assert_eq!(req.method, endpoint.method, "{}", endpoint.name);
        }
    }

    #[test]
    fn dispatch_matches_typed_builder() {
        let body = json!({"template": {"settings": {"number_of_shards": 1}}});
        let opts = Options::new().param("create", true).opaque_id("abc");
        let typed = cluster::build_put_component_template(&config(), "base", &body, &opts).unwrap();
        let dynamic = build_request(
            &config(),
            "cluster.put_component_template",
            &json!({
                "name": "base",
                "body": body,
                "params": {"create": true},
                "headers": {"x-opaque-id": "abc"},
            }),
        )
        .unwrap();
        assert_eq!(typed, dynamic);
    }

    #[test]
    fn unknown_operation() {
        let err = build_request(&config(), "cluster.nope", &Value::Null).unwrap_err();
        assert!(matches!(err, ApiError::UnknownOperation(name) if name == "cluster.nope"));
    }

    #[test]
    fn missing_required_name_is_invalid_argument() {
        let err = build_request(&config(), "cluster.delete_component_template", &Value::Null).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument("name")));
    }

    #[test]
    fn null_body_counts_as_missing() {
        let err = build_request(&config(), "ingest.simulate", &json!({"body": null})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument("body")));
    }

    #[test]
    fn malformed_params_rejected() {
        let err = build_request(&config(), "cluster.health", &json!({"params": [1]})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument("params")));
        let err = build_request(&config(), "cluster.health", &json!({"params": {"level": {}}})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument("params")));
        let err = build_request(&config(), "cluster.health", &json!(["x"])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument("args")));
    }

    #[test]
    fn list_path_argument_is_comma_joined() {
        let req = build_request(&config(), "cluster.health", &json!({"index": ["logs", "metrics"]})).unwrap();
        assert_eq!(req.path, "/_cluster/health/logs,metrics");
    }

    #[test]
    fn non_string_path_argument_is_invalid() {
        let err = build_request(&config(), "ingest.get_pipeline", &json!({"id": 42})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument("id")));
        let err = build_request(&config(), "cluster.health", &json!({"index": ["logs", 1]})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument("index")));
    }

    #[test]
    fn misspelled_argument_key_is_rejected() {
        let err = build_request(&config(), "cluster.health", &json!({"indx": "logs"})).unwrap_err();
        assert!(matches!(
            err,
            ApiError::UnknownParameter { endpoint: "cluster.health", ref param } if param == "indx"
        ));
    }

    #[test]
    fn find_endpoint_by_name() {
        let endpoint = find_endpoint("ingest.simulate").unwrap();
        assert_eq!(endpoint.method, HttpMethod::Post);
        assert!(endpoint.accepts("verbose"));
        assert!(find_endpoint("ingest.missing").is_none());
    }
}
