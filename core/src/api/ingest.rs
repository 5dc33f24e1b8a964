//! Ingest pipeline endpoints.

use serde_json::Value;

use crate::client::{AsyncClient, Client};
use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::params::Options;
use crate::path::{make_path, require, require_body};
use crate::transport::{AsyncTransport, Transport};

pub const GET_PIPELINE: Endpoint = Endpoint {
    name: "ingest.get_pipeline",
    method: HttpMethod::Get,
    params: &["leader_timeout", "summary"],
};

pub const PUT_PIPELINE: Endpoint = Endpoint {
    name: "ingest.put_pipeline",
    method: HttpMethod::Put,
    params: &["leader_timeout", "timeout"],
};

pub const DELETE_PIPELINE: Endpoint = Endpoint {
    name: "ingest.delete_pipeline",
    method: HttpMethod::Delete,
    params: &["leader_timeout", "timeout"],
};

pub const SIMULATE: Endpoint = Endpoint {
    name: "ingest.simulate",
    method: HttpMethod::Post,
    params: &["verbose"],
};

pub const PROCESSOR_GROK: Endpoint = Endpoint {
    name: "ingest.processor_grok",
    method: HttpMethod::Get,
    params: &[],
};

pub const GEO_IP_STATS: Endpoint = Endpoint {
    name: "ingest.geo_ip_stats",
    method: HttpMethod::Get,
    params: &[],
};

pub fn build_get_pipeline(
    config: &ClientConfig,
    id: Option<&str>,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    let path = make_path(&[Some("_ingest"), Some("pipeline"), id]);
    GET_PIPELINE.request(config, path, options, None)
}

pub fn build_put_pipeline(
    config: &ClientConfig,
    id: &str,
    body: &Value,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    let id = require("id", id)?;
    let body = require_body("body", body)?;
    let path = make_path(&[Some("_ingest"), Some("pipeline"), Some(id)]);
    PUT_PIPELINE.request(config, path, options, Some(body))
}

pub fn build_delete_pipeline(
    config: &ClientConfig,
    id: &str,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    let id = require("id", id)?;
    let path = make_path(&[Some("_ingest"), Some("pipeline"), Some(id)]);
    DELETE_PIPELINE.request(config, path, options, None)
}

/// Run documents through a stored pipeline (`id`) or through the pipeline
/// definition inlined in `body`.
pub fn build_simulate(
    config: &ClientConfig,
    body: &Value,
    id: Option<&str>,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    let body = require_body("body", body)?;
    let path = make_path(&[Some("_ingest"), Some("pipeline"), id, Some("_simulate")]);
    SIMULATE.request(config, path, options, Some(body))
}

pub fn build_processor_grok(config: &ClientConfig, options: &Options) -> Result<HttpRequest, ApiError> {
    PROCESSOR_GROK.request(config, "/_ingest/processor/grok".to_string(), options, None)
}

pub fn build_geo_ip_stats(config: &ClientConfig, options: &Options) -> Result<HttpRequest, ApiError> {
    GEO_IP_STATS.request(config, "/_ingest/geoip/stats".to_string(), options, None)
}

/// Ingest operations on a blocking `Client`.
pub struct Ingest<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> Ingest<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    pub fn get_pipeline(&self, id: Option<&str>, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_get_pipeline(self.client.config(), id, options)?)
    }

    pub fn put_pipeline(
        &self,
        id: &str,
        body: &Value,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_put_pipeline(self.client.config(), id, body, options)?)
    }

    pub fn delete_pipeline(&self, id: &str, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_delete_pipeline(self.client.config(), id, options)?)
    }

    pub fn simulate(
        &self,
        body: &Value,
        id: Option<&str>,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_simulate(self.client.config(), body, id, options)?)
    }

    pub fn processor_grok(&self, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_processor_grok(self.client.config(), options)?)
    }

    pub fn geo_ip_stats(&self, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_geo_ip_stats(self.client.config(), options)?)
    }
}

/// Ingest operations on an `AsyncClient`.
pub struct AsyncIngest<'a, T> {
    client: &'a AsyncClient<T>,
}

impl<'a, T: AsyncTransport> AsyncIngest<'a, T> {
    pub(crate) fn new(client: &'a AsyncClient<T>) -> Self {
        Self { client }
    }

    pub async fn get_pipeline(
        &self,
        id: Option<&str>,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_get_pipeline(self.client.config(), id, options)?).await
    }

    pub async fn put_pipeline(
        &self,
        id: &str,
        body: &Value,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_put_pipeline(self.client.config(), id, body, options)?).await
    }

    pub async fn delete_pipeline(&self, id: &str, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_delete_pipeline(self.client.config(), id, options)?).await
    }

    pub async fn simulate(
        &self,
        body: &Value,
        id: Option<&str>,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_simulate(self.client.config(), body, id, options)?).await
    }

    pub async fn processor_grok(&self, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_processor_grok(self.client.config(), options)?).await
    }

    pub async fn geo_ip_stats(&self, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_geo_ip_stats(self.client.config(), options)?).await
    }
}
