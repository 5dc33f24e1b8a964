//! Helpers that interpret a raw `HttpResponse`.
//!
//! The clients return responses exactly as the transport produced them.
//! Callers that want typed results run them through these functions.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Map non-success status codes to the appropriate `ApiError` variant.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Deserialize a 2xx response body.
pub fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Interpret the response to a HEAD request: 2xx is `true`, 404 is `false`.
pub fn parse_exists(response: HttpResponse) -> Result<bool, ApiError> {
    match check_status(&response) {
        Ok(()) => Ok(true),
        Err(ApiError::NotFound) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Acknowledged, ClusterHealth, HealthStatus};

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn parse_cluster_health() {
        let health: ClusterHealth = parse_json(response(
            200,
            r#"{"cluster_name":"dev","status":"yellow","timed_out":false,"number_of_nodes":1,"number_of_data_nodes":1,"active_primary_shards":3,"active_shards":3,"relocating_shards":0,"initializing_shards":0,"unassigned_shards":3}"#,
        ))
        .unwrap();
        assert_eq!(health.cluster_name, "dev");
        assert_eq!(health.status, HealthStatus::Yellow);
        assert_eq!(health.unassigned_shards, 3);
    }

    #[test]
    fn parse_acknowledged() {
        let ack: Acknowledged = parse_json(response(200, r#"{"acknowledged":true}"#)).unwrap();
        assert!(ack.acknowledged);
    }

    #[test]
    fn parse_json_not_found() {
        let err = parse_json::<Acknowledged>(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_json_server_error() {
        let err = parse_json::<Acknowledged>(response(500, "boom")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, ref body } if body == "boom"));
    }

    #[test]
    fn parse_json_bad_body() {
        let err = parse_json::<Acknowledged>(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn exists_maps_404_to_false() {
        assert!(parse_exists(response(200, "")).unwrap());
        assert!(!parse_exists(response(404, "")).unwrap());
        assert!(matches!(
            parse_exists(response(503, "")),
            Err(ApiError::HttpError { status: 503, .. })
        ));
    }
}
