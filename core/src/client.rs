//! Transport-backed clients.
//!
//! # Design
//! `Client` and `AsyncClient` hold a transport and a `ClientConfig` and
//! nothing else. Every namespaced operation builds a fresh `HttpRequest`,
//! hands it to the transport once, and returns the response untouched.
//! Because no state is shared between calls, a client can be used from many
//! threads or tasks at once as long as its transport allows it.

use crate::api::cluster::{AsyncCluster, Cluster};
use crate::api::ingest::{AsyncIngest, Ingest};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{AsyncTransport, Transport};

/// Blocking client for the cluster API.
#[derive(Debug, Clone)]
pub struct Client<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cluster(&self) -> Cluster<'_, T> {
        Cluster::new(self)
    }

    pub fn ingest(&self) -> Ingest<'_, T> {
        Ingest::new(self)
    }

    /// Send a prepared request through the transport.
    pub fn perform(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, "performing request");
        self.transport.perform_request(request).map_err(|e| {
            tracing::warn!(error = %e, "transport failed");
            ApiError::Transport(Box::new(e))
        })
    }
}

/// Async client for the cluster API.
#[derive(Debug, Clone)]
pub struct AsyncClient<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: AsyncTransport> AsyncClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cluster(&self) -> AsyncCluster<'_, T> {
        AsyncCluster::new(self)
    }

    pub fn ingest(&self) -> AsyncIngest<'_, T> {
        AsyncIngest::new(self)
    }

    /// Send a prepared request through the transport.
    pub async fn perform(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, "performing request");
        self.transport.perform_request(request).await.map_err(|e| {
            tracing::warn!(error = %e, "transport failed");
            ApiError::Transport(Box::new(e))
        })
    }
}
