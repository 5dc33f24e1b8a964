//! In-memory stand-in for a single-node search cluster.
//!
//! Serves the cluster, component template, voting configuration, and ingest
//! endpoints the SDK targets, with enough validation to exercise error paths.
//! There are no indices or shards; health is always green.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const CLUSTER_NAME: &str = "mock-cluster";
pub const NODE_ID: &str = "mock-node-0";
pub const NODE_NAME: &str = "node-0";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClusterHealth {
    pub cluster_name: String,
    pub status: String,
    pub timed_out: bool,
    pub number_of_nodes: u32,
    pub number_of_data_nodes: u32,
    pub active_primary_shards: u32,
    pub active_shards: u32,
    pub relocating_shards: u32,
    pub initializing_shards: u32,
    pub unassigned_shards: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VotingExclusion {
    pub node_id: String,
    pub node_name: String,
}

#[derive(Debug)]
pub struct ClusterData {
    pub cluster_uuid: Uuid,
    pub persistent: Map<String, Value>,
    pub transient: Map<String, Value>,
    pub component_templates: BTreeMap<String, Value>,
    pub pipelines: BTreeMap<String, Value>,
    pub voting_exclusions: Vec<VotingExclusion>,
}

impl Default for ClusterData {
    fn default() -> Self {
        Self {
            cluster_uuid: Uuid::new_v4(),
            persistent: Map::new(),
            transient: Map::new(),
            component_templates: BTreeMap::new(),
            pipelines: BTreeMap::new(),
            voting_exclusions: Vec::new(),
        }
    }
}

pub type Db = Arc<RwLock<ClusterData>>;

type Params = Query<HashMap<String, String>>;
type Failure = (StatusCode, Json<Value>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(ClusterData::default()));
    Router::new()
        .route("/_cluster/health", get(cluster_health))
        .route("/_cluster/health/{index}", get(index_health))
        .route("/_cluster/pending_tasks", get(pending_tasks))
        .route("/_cluster/state", get(cluster_state))
        .route("/_cluster/state/{metric}", get(cluster_state_metric))
        .route("/_cluster/state/{metric}/{index}", get(cluster_state_metric_index))
        .route("/_cluster/stats", get(cluster_stats))
        .route("/_cluster/stats/nodes/{node_id}", get(node_stats))
        .route("/_cluster/reroute", post(reroute))
        .route("/_cluster/settings", get(get_settings).put(put_settings))
        .route("/_remote/info", get(remote_info))
        .route("/_cluster/allocation/explain", post(allocation_explain))
        .route("/_component_template", get(list_component_templates))
        .route(
            "/_component_template/{name}",
            get(get_component_template)
                .put(put_component_template)
                .delete(delete_component_template),
        )
        .route(
            "/_cluster/voting_config_exclusions",
            post(post_voting_exclusions).delete(delete_voting_exclusions),
        )
        .route("/_ingest/pipeline", get(list_pipelines))
        .route("/_ingest/pipeline/_simulate", post(simulate))
        .route(
            "/_ingest/pipeline/{id}",
            get(get_pipeline).put(put_pipeline).delete(delete_pipeline),
        )
        .route("/_ingest/pipeline/{id}/_simulate", post(simulate_stored))
        .route("/_ingest/processor/grok", get(grok_patterns))
        .route("/_ingest/geoip/stats", get(geoip_stats))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn failure(status: StatusCode, kind: &str, reason: impl Into<String>) -> Failure {
    let reason = reason.into();
    tracing::debug!(status = status.as_u16(), kind, %reason, "request failed");
    (
        status,
        Json(json!({
            "error": {"type": kind, "reason": reason},
            "status": status.as_u16(),
        })),
    )
}

fn parse_body(bytes: &Bytes) -> Result<Option<Value>, Failure> {
    if bytes.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(|e| failure(StatusCode::BAD_REQUEST, "parse_exception", e.to_string()))
}

fn require_body(bytes: &Bytes) -> Result<Value, Failure> {
    parse_body(bytes)?.ok_or_else(|| {
        failure(
            StatusCode::BAD_REQUEST,
            "parse_exception",
            "request body is required",
        )
    })
}

fn flag(params: &HashMap<String, String>, name: &str) -> bool {
    params.get(name).is_some_and(|v| v.is_empty() || v == "true")
}

/// Match a comma-separated expression of names and `prefix*` wildcards.
pub fn matches_expression(expression: &str, name: &str) -> bool {
    expression.split(',').any(|pattern| match pattern {
        "_all" | "*" => true,
        p if p.ends_with('*') => name.starts_with(&p[..p.len() - 1]),
        p => p == name,
    })
}

fn acknowledged() -> Json<Value> {
    Json(json!({"acknowledged": true}))
}

// ---------------------------------------------------------------------------
// Cluster
// ---------------------------------------------------------------------------

fn health_body(params: &HashMap<String, String>) -> Result<Json<ClusterHealth>, Failure> {
    if let Some(status) = params.get("wait_for_status") {
        if !matches!(status.as_str(), "green" | "yellow" | "red") {
            return Err(failure(
                StatusCode::BAD_REQUEST,
                "illegal_argument_exception",
                format!("unknown cluster health status [{status}]"),
            ));
        }
    }
    Ok(Json(ClusterHealth {
        cluster_name: CLUSTER_NAME.to_string(),
        status: "green".to_string(),
        timed_out: false,
        number_of_nodes: 1,
        number_of_data_nodes: 1,
        active_primary_shards: 0,
        active_shards: 0,
        relocating_shards: 0,
        initializing_shards: 0,
        unassigned_shards: 0,
    }))
}

async fn cluster_health(Query(params): Params) -> Result<Json<ClusterHealth>, Failure> {
    health_body(&params)
}

async fn index_health(
    Path(_index): Path<String>,
    Query(params): Params,
) -> Result<Json<ClusterHealth>, Failure> {
    health_body(&params)
}

async fn pending_tasks() -> Json<Value> {
    Json(json!({"tasks": []}))
}

async fn state_body(db: &Db, metric: Option<&str>) -> Json<Value> {
    let data = db.read().await;
    let wanted: Vec<&str> = metric.unwrap_or("_all").split(',').collect();
    let want = |m: &str| wanted.iter().any(|w| *w == "_all" || *w == m);

    let mut state = Map::new();
    state.insert("cluster_name".into(), json!(CLUSTER_NAME));
    state.insert("cluster_uuid".into(), json!(data.cluster_uuid));
    if want("version") {
        state.insert("version".into(), json!(1));
    }
    if want("leader_node") {
        state.insert("leader_node".into(), json!(NODE_ID));
    }
    if want("blocks") {
        state.insert("blocks".into(), json!({}));
    }
    if want("nodes") {
        state.insert("nodes".into(), json!({ NODE_ID: {"name": NODE_NAME} }));
    }
    if want("metadata") {
        let templates: Map<String, Value> = data
            .component_templates
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let pipelines: Vec<Value> = data
            .pipelines
            .iter()
            .map(|(id, config)| json!({"id": id, "config": config}))
            .collect();
        state.insert(
            "metadata".into(),
            json!({
                "cluster_uuid": data.cluster_uuid,
                "cluster_coordination": {"voting_config_exclusions": data.voting_exclusions},
                "component_template": {"component_template": templates},
                "ingest": {"pipeline": pipelines},
                "indices": {},
            }),
        );
    }
    if want("routing_table") {
        state.insert("routing_table".into(), json!({"indices": {}}));
    }
    Json(Value::Object(state))
}

async fn cluster_state(State(db): State<Db>) -> Json<Value> {
    state_body(&db, None).await
}

async fn cluster_state_metric(State(db): State<Db>, Path(metric): Path<String>) -> Json<Value> {
    state_body(&db, Some(&metric)).await
}

async fn cluster_state_metric_index(
    State(db): State<Db>,
    Path((metric, _index)): Path<(String, String)>,
) -> Json<Value> {
    state_body(&db, Some(&metric)).await
}

fn stats_body(cluster_uuid: Uuid, nodes: u32) -> Json<Value> {
    Json(json!({
        "_nodes": {"total": nodes, "successful": nodes, "failed": 0},
        "cluster_name": CLUSTER_NAME,
        "cluster_uuid": cluster_uuid,
        "status": "green",
        "indices": {"count": 0},
        "nodes": {"count": {"total": nodes}},
    }))
}

async fn cluster_stats(State(db): State<Db>) -> Json<Value> {
    stats_body(db.read().await.cluster_uuid, 1)
}

async fn node_stats(State(db): State<Db>, Path(node_id): Path<String>) -> Json<Value> {
    let selected = node_id
        .split(',')
        .any(|n| matches!(n, "_local" | "_all" | NODE_ID | NODE_NAME));
    stats_body(db.read().await.cluster_uuid, u32::from(selected))
}

async fn reroute(Query(params): Params, body: Bytes) -> Result<Json<Value>, Failure> {
    parse_body(&body)?;
    let mut reply = json!({"acknowledged": true});
    if flag(&params, "explain") {
        reply["explanations"] = json!([]);
    }
    Ok(Json(reply))
}

async fn get_settings(State(db): State<Db>) -> Json<Value> {
    let data = db.read().await;
    Json(json!({"persistent": data.persistent, "transient": data.transient}))
}

fn apply_settings(target: &mut Map<String, Value>, update: Option<&Value>) -> Map<String, Value> {
    let mut applied = Map::new();
    if let Some(Value::Object(update)) = update {
        for (key, value) in update {
            if value.is_null() {
                target.remove(key);
            } else {
                target.insert(key.clone(), value.clone());
                applied.insert(key.clone(), value.clone());
            }
        }
    }
    applied
}

async fn put_settings(State(db): State<Db>, body: Bytes) -> Result<Json<Value>, Failure> {
    let body = require_body(&body)?;
    if body.get("persistent").is_none() && body.get("transient").is_none() {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "action_request_validation_exception",
            "no settings to update",
        ));
    }
    let mut data = db.write().await;
    let persistent = apply_settings(&mut data.persistent, body.get("persistent"));
    let transient = apply_settings(&mut data.transient, body.get("transient"));
    tracing::debug!(persistent = persistent.len(), transient = transient.len(), "settings updated");
    Ok(Json(json!({
        "acknowledged": true,
        "persistent": persistent,
        "transient": transient,
    })))
}

async fn remote_info() -> Json<Value> {
    Json(json!({}))
}

async fn allocation_explain(body: Bytes) -> Result<Json<Value>, Failure> {
    match parse_body(&body)? {
        Some(request) => {
            let index = request.get("index").and_then(Value::as_str).unwrap_or("");
            Err(failure(
                StatusCode::NOT_FOUND,
                "index_not_found_exception",
                format!("no such index [{index}]"),
            ))
        }
        None => Err(failure(
            StatusCode::BAD_REQUEST,
            "illegal_argument_exception",
            "unable to find any unassigned shards to explain",
        )),
    }
}

// ---------------------------------------------------------------------------
// Component templates
// ---------------------------------------------------------------------------

fn template_entries<'a>(
    templates: impl Iterator<Item = (&'a String, &'a Value)>,
) -> Json<Value> {
    let entries: Vec<Value> = templates
        .map(|(name, template)| json!({"name": name, "component_template": template}))
        .collect();
    Json(json!({"component_templates": entries}))
}

async fn list_component_templates(State(db): State<Db>) -> Json<Value> {
    let data = db.read().await;
    template_entries(data.component_templates.iter())
}

async fn get_component_template(
    State(db): State<Db>,
    Path(name): Path<String>,
) -> Result<Json<Value>, Failure> {
    let data = db.read().await;
    let matched: Vec<(&String, &Value)> = data
        .component_templates
        .iter()
        .filter(|(n, _)| matches_expression(&name, n))
        .collect();
    if matched.is_empty() {
        return Err(failure(
            StatusCode::NOT_FOUND,
            "resource_not_found_exception",
            format!("component template matching [{name}] not found"),
        ));
    }
    Ok(template_entries(matched.into_iter()))
}

async fn put_component_template(
    State(db): State<Db>,
    Path(name): Path<String>,
    Query(params): Params,
    body: Bytes,
) -> Result<Json<Value>, Failure> {
    let template = require_body(&body)?;
    if !template.get("template").is_some_and(Value::is_object) {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "action_request_validation_exception",
            "template is missing",
        ));
    }
    let mut data = db.write().await;
    if flag(&params, "create") && data.component_templates.contains_key(&name) {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "illegal_argument_exception",
            format!("component template [{name}] already exists"),
        ));
    }
    tracing::debug!(%name, "component template stored");
    data.component_templates.insert(name, template);
    Ok(acknowledged())
}

async fn delete_component_template(
    State(db): State<Db>,
    Path(name): Path<String>,
) -> Result<Json<Value>, Failure> {
    let mut data = db.write().await;
    data.component_templates
        .remove(&name)
        .map(|_| acknowledged())
        .ok_or_else(|| {
            failure(
                StatusCode::NOT_FOUND,
                "resource_not_found_exception",
                format!("component template [{name}] not found"),
            )
        })
}

// ---------------------------------------------------------------------------
// Voting configuration exclusions
// ---------------------------------------------------------------------------

async fn post_voting_exclusions(
    State(db): State<Db>,
    Query(params): Params,
) -> Result<StatusCode, Failure> {
    let exclusions: Vec<VotingExclusion> = match (params.get("node_ids"), params.get("node_names")) {
        (Some(_), Some(_)) => {
            return Err(failure(
                StatusCode::BAD_REQUEST,
                "illegal_argument_exception",
                "node_ids and node_names cannot both be set",
            ))
        }
        (Some(ids), None) => ids
            .split(',')
            .map(|id| VotingExclusion {
                node_id: id.to_string(),
                node_name: if id == NODE_ID { NODE_NAME } else { "_absent_" }.to_string(),
            })
            .collect(),
        (None, Some(names)) => names
            .split(',')
            .map(|name| VotingExclusion {
                node_id: if name == NODE_NAME { NODE_ID } else { "_absent_" }.to_string(),
                node_name: name.to_string(),
            })
            .collect(),
        (None, None) => {
            return Err(failure(
                StatusCode::BAD_REQUEST,
                "illegal_argument_exception",
                "node_ids or node_names must be set",
            ))
        }
    };
    let mut data = db.write().await;
    for exclusion in exclusions {
        if !data.voting_exclusions.contains(&exclusion) {
            data.voting_exclusions.push(exclusion);
        }
    }
    Ok(StatusCode::OK)
}

async fn delete_voting_exclusions(State(db): State<Db>) -> StatusCode {
    db.write().await.voting_exclusions.clear();
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Ingest
// ---------------------------------------------------------------------------

async fn list_pipelines(State(db): State<Db>) -> Json<Value> {
    let data = db.read().await;
    let all: Map<String, Value> = data
        .pipelines
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Json(Value::Object(all))
}

async fn get_pipeline(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Failure> {
    let data = db.read().await;
    let matched: Map<String, Value> = data
        .pipelines
        .iter()
        .filter(|(name, _)| matches_expression(&id, name))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if matched.is_empty() {
        return Err((StatusCode::NOT_FOUND, Json(json!({}))));
    }
    Ok(Json(Value::Object(matched)))
}

fn validate_pipeline(pipeline: &Value) -> Result<(), Failure> {
    if pipeline.get("processors").is_some_and(Value::is_array) {
        return Ok(());
    }
    Err(failure(
        StatusCode::BAD_REQUEST,
        "parse_exception",
        "[processors] required property is missing",
    ))
}

async fn put_pipeline(
    State(db): State<Db>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, Failure> {
    let pipeline = require_body(&body)?;
    validate_pipeline(&pipeline)?;
    tracing::debug!(%id, "pipeline stored");
    db.write().await.pipelines.insert(id, pipeline);
    Ok(acknowledged())
}

async fn delete_pipeline(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Failure> {
    db.write()
        .await
        .pipelines
        .remove(&id)
        .map(|_| acknowledged())
        .ok_or_else(|| {
            failure(
                StatusCode::NOT_FOUND,
                "resource_not_found_exception",
                format!("pipeline [{id}] is missing"),
            )
        })
}

/// Apply the `set` and `remove` processors of `pipeline` to `source`,
/// returning the document after each processor. Other processor types pass
/// the document through unchanged.
pub fn run_processors(pipeline: &Value, source: &Value) -> Vec<(String, Value)> {
    let mut doc = source.clone();
    let mut steps = Vec::new();
    let processors = pipeline
        .get("processors")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    for processor in processors {
        let Some((kind, config)) = processor.as_object().and_then(|p| p.iter().next()) else {
            continue;
        };
        let field = config.get("field").and_then(Value::as_str);
        match (kind.as_str(), field, doc.as_object_mut()) {
            ("set", Some(field), Some(fields)) => {
                let value = config.get("value").cloned().unwrap_or(Value::Null);
                fields.insert(field.to_string(), value);
            }
            ("remove", Some(field), Some(fields)) => {
                fields.remove(field);
            }
            _ => {}
        }
        steps.push((kind.clone(), doc.clone()));
    }
    if steps.is_empty() {
        steps.push(("noop".to_string(), doc));
    }
    steps
}

fn simulate_docs(pipeline: &Value, request: &Value, verbose: bool) -> Result<Json<Value>, Failure> {
    let docs = request.get("docs").and_then(Value::as_array).ok_or_else(|| {
        failure(
            StatusCode::BAD_REQUEST,
            "parse_exception",
            "[docs] required property is missing",
        )
    })?;
    let results: Vec<Value> = docs
        .iter()
        .map(|doc| {
            let source = doc.get("_source").cloned().unwrap_or_else(|| json!({}));
            let index = doc.get("_index").cloned().unwrap_or_else(|| json!("_index"));
            let id = doc.get("_id").cloned().unwrap_or_else(|| json!("_id"));
            let wrap = |source: Value| json!({"_index": index, "_id": id, "_source": source});
            let steps = run_processors(pipeline, &source);
            if verbose {
                let processor_results: Vec<Value> = steps
                    .into_iter()
                    .map(|(kind, doc)| {
                        json!({"processor_type": kind, "status": "success", "doc": wrap(doc)})
                    })
                    .collect();
                json!({"processor_results": processor_results})
            } else {
                let last = steps.into_iter().last().map(|(_, d)| d).unwrap_or(source);
                json!({"doc": wrap(last)})
            }
        })
        .collect();
    Ok(Json(json!({"docs": results})))
}

async fn simulate(Query(params): Params, body: Bytes) -> Result<Json<Value>, Failure> {
    let request = require_body(&body)?;
    let pipeline = request.get("pipeline").cloned().ok_or_else(|| {
        failure(
            StatusCode::BAD_REQUEST,
            "parse_exception",
            "[pipeline] required property is missing",
        )
    })?;
    validate_pipeline(&pipeline)?;
    simulate_docs(&pipeline, &request, flag(&params, "verbose"))
}

async fn simulate_stored(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
    body: Bytes,
) -> Result<Json<Value>, Failure> {
    let request = require_body(&body)?;
    let pipeline = db.read().await.pipelines.get(&id).cloned().ok_or_else(|| {
        failure(
            StatusCode::NOT_FOUND,
            "resource_not_found_exception",
            format!("pipeline [{id}] does not exist"),
        )
    })?;
    simulate_docs(&pipeline, &request, flag(&params, "verbose"))
}

async fn grok_patterns() -> Json<Value> {
    Json(json!({
        "patterns": {
            "WORD": "\\b\\w+\\b",
            "INT": "(?:[+-]?(?:[0-9]+))",
            "IP": "(?:%{IPV6}|%{IPV4})",
            "GREEDYDATA": ".*",
        }
    }))
}

async fn geoip_stats() -> Json<Value> {
    Json(json!({
        "stats": {
            "successful_downloads": 0,
            "failed_downloads": 0,
            "total_download_time": 0,
            "databases_count": 0,
            "skipped_updates": 0,
        },
        "nodes": {},
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_health_serializes_to_json() {
        let Json(health) = health_body(&HashMap::new()).unwrap();
        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["cluster_name"], CLUSTER_NAME);
        assert_eq!(json["status"], "green");
        assert_eq!(json["number_of_nodes"], 1);
    }

    #[test]
    fn health_rejects_unknown_status() {
        let mut params = HashMap::new();
        params.insert("wait_for_status".to_string(), "purple".to_string());
        let (status, _) = health_body(&params).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn expression_matching() {
        assert!(matches_expression("logs", "logs"));
        assert!(matches_expression("a,logs", "logs"));
        assert!(matches_expression("log*", "logs"));
        assert!(matches_expression("*", "anything"));
        assert!(matches_expression("_all", "anything"));
        assert!(!matches_expression("metrics", "logs"));
    }

    #[test]
    fn set_and_remove_processors() {
        let pipeline = json!({"processors": [
            {"set": {"field": "env", "value": "prod"}},
            {"remove": {"field": "tmp"}},
            {"lowercase": {"field": "msg"}},
        ]});
        let steps = run_processors(&pipeline, &json!({"tmp": 1, "msg": "Hi"}));
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].0, "set");
        assert_eq!(steps[0].1, json!({"tmp": 1, "msg": "Hi", "env": "prod"}));
        assert_eq!(steps[2].1, json!({"msg": "Hi", "env": "prod"}));
    }

    #[test]
    fn empty_pipeline_is_noop() {
        let steps = run_processors(&json!({"processors": []}), &json!({"a": 1}));
        assert_eq!(steps, vec![("noop".to_string(), json!({"a": 1}))]);
    }

    #[test]
    fn settings_null_removes_key() {
        let mut target = Map::new();
        target.insert("a".into(), json!(1));
        let applied = apply_settings(&mut target, Some(&json!({"a": null, "b": 2})));
        assert!(!target.contains_key("a"));
        assert_eq!(target["b"], 2);
        assert_eq!(applied.len(), 1);
    }

    #[test]
    fn voting_exclusion_roundtrips_through_json() {
        let exclusion = VotingExclusion {
            node_id: NODE_ID.to_string(),
            node_name: NODE_NAME.to_string(),
        };
        let json = serde_json::to_string(&exclusion).unwrap();
        let back: VotingExclusion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, exclusion);
    }
}
