use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_cluster::{app, ClusterHealth};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- cluster ---

#[tokio::test]
async fn health_is_green() {
    let resp = app()
        .oneshot(empty_request("GET", "/_cluster/health"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let health: ClusterHealth = body_json(resp).await;
    assert_eq!(health.status, "green");
    assert_eq!(health.number_of_nodes, 1);
}

#[tokio::test]
async fn health_rejects_bad_wait_for_status() {
    let resp = app()
        .oneshot(empty_request("GET", "/_cluster/health/logs?wait_for_status=blue"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = body_json(resp).await;
    assert_eq!(err["error"]["type"], "illegal_argument_exception");
}

#[tokio::test]
async fn state_filters_by_metric() {
    let resp = app()
        .oneshot(empty_request("GET", "/_cluster/state/nodes,version"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let state: Value = body_json(resp).await;
    assert!(state.get("nodes").is_some());
    assert!(state.get("version").is_some());
    assert!(state.get("metadata").is_none());
}

#[tokio::test]
async fn state_all_metric_with_index() {
    let resp = app()
        .oneshot(empty_request("GET", "/_cluster/state/_all/logs"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let state: Value = body_json(resp).await;
    assert!(state.get("metadata").is_some());
    assert!(state.get("routing_table").is_some());
}

#[tokio::test]
async fn stats_for_unknown_node_counts_zero() {
    let resp = app()
        .oneshot(empty_request("GET", "/_cluster/stats/nodes/elsewhere"))
        .await
        .unwrap();

    let stats: Value = body_json(resp).await;
    assert_eq!(stats["nodes"]["count"]["total"], 0);
}

#[tokio::test]
async fn put_settings_without_body_is_400() {
    let resp = app()
        .oneshot(empty_request("PUT", "/_cluster/settings"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn allocation_explain_without_unassigned_shards() {
    let resp = app()
        .oneshot(empty_request("POST", "/_cluster/allocation/explain"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn voting_exclusions_need_exactly_one_selector() {
    let resp = app()
        .oneshot(empty_request("POST", "/_cluster/voting_config_exclusions"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app()
        .oneshot(empty_request(
            "POST",
            "/_cluster/voting_config_exclusions?node_ids=a&node_names=b",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- component templates ---

#[tokio::test]
async fn component_template_not_found() {
    let resp = app()
        .oneshot(empty_request("GET", "/_component_template/missing"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn head_component_template_not_found() {
    let resp = app()
        .oneshot(empty_request("HEAD", "/_component_template/missing"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn component_template_requires_template_object() {
    let resp = app()
        .oneshot(json_request("PUT", "/_component_template/base", r#"{"version":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- ingest ---

#[tokio::test]
async fn list_pipelines_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/_ingest/pipeline"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let pipelines: Value = body_json(resp).await;
    assert_eq!(pipelines, json!({}));
}

#[tokio::test]
async fn put_pipeline_without_processors_is_400() {
    let resp = app()
        .oneshot(json_request("PUT", "/_ingest/pipeline/p1", r#"{"description":"x"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn simulate_inline_pipeline() {
    let body = json!({
        "pipeline": {"processors": [{"set": {"field": "env", "value": "prod"}}]},
        "docs": [{"_index": "logs", "_id": "1", "_source": {"msg": "hi"}}],
    });
    let resp = app()
        .oneshot(json_request("POST", "/_ingest/pipeline/_simulate", &body.to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let result: Value = body_json(resp).await;
    assert_eq!(result["docs"][0]["doc"]["_source"], json!({"msg": "hi", "env": "prod"}));
    assert_eq!(result["docs"][0]["doc"]["_index"], "logs");
}

#[tokio::test]
async fn simulate_unknown_stored_pipeline_is_404() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/_ingest/pipeline/missing/_simulate",
            r#"{"docs":[]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn grok_patterns_listed() {
    let resp = app()
        .oneshot(empty_request("GET", "/_ingest/processor/grok"))
        .await
        .unwrap();

    let patterns: Value = body_json(resp).await;
    assert!(patterns["patterns"]["WORD"].is_string());
}

// --- full lifecycles ---

#[tokio::test]
async fn component_template_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            "/_component_template/base",
            r#"{"template":{"settings":{"number_of_shards":1}}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let ack: Value = body_json(resp).await;
    assert_eq!(ack["acknowledged"], true);

    // create again with create=true conflicts
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            "/_component_template/base?create=true",
            r#"{"template":{}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // head
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("HEAD", "/_component_template/base"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());

    // get by wildcard
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/_component_template/ba*"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let found: Value = body_json(resp).await;
    assert_eq!(found["component_templates"][0]["name"], "base");

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/_component_template/base"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // delete again is a 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/_component_template/base"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn settings_and_voting_exclusions_show_in_state() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            "/_cluster/settings",
            r#"{"persistent":{"cluster.routing.allocation.enable":"primaries"}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/_cluster/settings"))
        .await
        .unwrap();
    let settings: Value = body_json(resp).await;
    assert_eq!(
        settings["persistent"]["cluster.routing.allocation.enable"],
        "primaries"
    );

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request(
            "POST",
            "/_cluster/voting_config_exclusions?node_names=node-0",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/_cluster/state/metadata"))
        .await
        .unwrap();
    let state: Value = body_json(resp).await;
    let exclusions = &state["metadata"]["cluster_coordination"]["voting_config_exclusions"];
    assert_eq!(exclusions[0]["node_id"], "mock-node-0");

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/_cluster/voting_config_exclusions"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/_cluster/state/metadata"))
        .await
        .unwrap();
    let state: Value = body_json(resp).await;
    let exclusions = &state["metadata"]["cluster_coordination"]["voting_config_exclusions"];
    assert_eq!(exclusions, &json!([]));
}
