//! Static endpoint descriptors and option filtering.
//!
//! # Design
//! Each remote operation is one `Endpoint` constant naming its HTTP method
//! and the query options it recognizes. Filtering is a pure function of the
//! descriptor, the caller's `Options`, and the configured
//! `UnknownParamPolicy`, so the same table drives the typed builders, the
//! by-name dispatcher, and the C ABI.

use serde_json::Value;

use crate::config::{ClientConfig, UnknownParamPolicy};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::params::Options;

/// Options every endpoint accepts in addition to its own allow-list.
pub const GLOBAL_PARAMS: &[&str] = &["error_trace", "filter_path", "format", "human", "pretty"];

/// Descriptor for one remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Dotted name, e.g. `cluster.health`.
    pub name: &'static str,
    pub method: HttpMethod,
    /// Recognized option names, excluding `GLOBAL_PARAMS`.
    pub params: &'static [&'static str],
}

impl Endpoint {
    pub fn accepts(&self, param: &str) -> bool {
        self.params.contains(&param) || GLOBAL_PARAMS.contains(&param)
    }

    /// Reduce `options` to the query pairs this endpoint will send.
    pub fn filter_params(
        &self,
        options: &Options,
        policy: UnknownParamPolicy,
    ) -> Result<Vec<(String, String)>, ApiError> {
        let mut accepted = Vec::new();
        for (name, value) in options.params() {
            if !self.accepts(name) {
                match policy {
                    UnknownParamPolicy::Reject => {
                        return Err(ApiError::UnknownParameter {
                            endpoint: self.name,
                            param: name.to_string(),
                        });
                    }
                    UnknownParamPolicy::Drop => {
                        tracing::debug!(endpoint = self.name, param = name, "dropping unrecognized parameter");
                        continue;
                    }
                    UnknownParamPolicy::PassThrough => {}
                }
            }
            accepted.push((name.to_string(), value.to_query_value()));
        }
        Ok(accepted)
    }

    /// Assemble the request descriptor for an already-built `path`.
    pub fn request(
        &self,
        config: &ClientConfig,
        path: String,
        options: &Options,
        body: Option<&Value>,
    ) -> Result<HttpRequest, ApiError> {
        let params = self.filter_params(options, config.unknown_params)?;

        // A per-call header replaces a default of the same name.
        let mut headers: Vec<(String, String)> = config
            .default_headers
            .iter()
            .filter(|(k, _)| !options.headers().iter().any(|(h, _)| h.eq_ignore_ascii_case(k)))
            .cloned()
            .collect();
        headers.extend(options.headers().iter().cloned());

        let body = match body {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => Some(raw.clone()),
            Some(value) => {
                let encoded = serde_json::to_string(value)
                    .map_err(|e| ApiError::SerializationError(e.to_string()))?;
                if !headers.iter().any(|(k, _)| k.eq_ignore_ascii_case("content-type")) {
                    headers.push(("content-type".to_string(), "application/json".to_string()));
                }
                Some(encoded)
            }
        };

        tracing::debug!(endpoint = self.name, method = %self.method, %path, "built request");
        Ok(HttpRequest {
            method: self.method,
            path,
            params,
            headers,
            body,
        })
    }
}
