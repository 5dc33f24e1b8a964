//! Client SDK for a search cluster's HTTP API.
//!
//! # Overview
//! Each remote operation (cluster health, cluster state, settings, component
//! templates, voting configuration exclusions, ingest pipelines) has a
//! builder that validates required arguments, filters the caller's options
//! against the endpoint's allow-list, and produces an `HttpRequest`. A
//! `Transport` performs the round-trip; the clients return its response
//! untouched.
//!
//! # Design
//! - Builders are pure functions of `ClientConfig`, arguments, and
//!   `Options`. No state survives a call.
//! - `Client` (blocking) and `AsyncClient` (async) differ only in the
//!   transport trait they drive.
//! - `api::build_request` reaches every builder by dotted name, which is the
//!   surface the C ABI uses.
//! - Interpreting responses is opt-in through `response`.
//!
//! ```
//! use search_sdk::{Client, HttpRequest, HttpResponse, Options, Transport};
//!
//! struct Echo;
//!
//! impl Transport for Echo {
//!     type Error = std::convert::Infallible;
//!
//!     fn perform_request(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
//!         Ok(HttpResponse { status: 200, headers: Vec::new(), body: request.path })
//!     }
//! }
//!
//! let client = Client::new(Echo);
//! let resp = client.ingest().get_pipeline(None, &Options::new()).unwrap();
//! assert_eq!(resp.body, "/_ingest/pipeline");
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod params;
pub mod path;
pub mod response;
pub mod transport;
pub mod types;

pub use client::{AsyncClient, Client};
pub use config::{ClientConfig, UnknownParamPolicy};
pub use endpoint::Endpoint;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use params::{Options, ParamValue};
pub use response::{parse_exists, parse_json};
pub use transport::{AsyncTransport, Transport};
pub use types::{Acknowledged, ClusterHealth, HealthStatus};
