//! Cluster-level endpoints: health, state, settings, component templates,
//! and voting configuration exclusions.

use serde_json::Value;

use crate::client::{AsyncClient, Client};
use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::params::Options;
use crate::path::{is_absent, make_path, require, require_body};
use crate::transport::{AsyncTransport, Transport};

pub const HEALTH: Endpoint = Endpoint {
    name: "cluster.health",
    method: HttpMethod::Get,
    params: &[
        "expand_wildcards",
        "level",
        "local",
        "leader_timeout",
        "timeout",
        "wait_for_active_shards",
        "wait_for_events",
        "wait_for_no_initializing_shards",
        "wait_for_no_relocating_shards",
        "wait_for_nodes",
        "wait_for_status",
    ],
};

pub const PENDING_TASKS: Endpoint = Endpoint {
    name: "cluster.pending_tasks",
    method: HttpMethod::Get,
    params: &["local", "leader_timeout"],
};

pub const STATE: Endpoint = Endpoint {
    name: "cluster.state",
    method: HttpMethod::Get,
    params: &[
        "allow_no_indices",
        "expand_wildcards",
        "flat_settings",
        "ignore_unavailable",
        "local",
        "leader_timeout",
        "wait_for_metadata_version",
        "wait_for_timeout",
    ],
};

pub const STATS: Endpoint = Endpoint {
    name: "cluster.stats",
    method: HttpMethod::Get,
    params: &["flat_settings", "timeout"],
};

pub const REROUTE: Endpoint = Endpoint {
    name: "cluster.reroute",
    method: HttpMethod::Post,
    params: &["dry_run", "explain", "leader_timeout", "metric", "retry_failed", "timeout"],
};

pub const GET_SETTINGS: Endpoint = Endpoint {
    name: "cluster.get_settings",
    method: HttpMethod::Get,
    params: &["flat_settings", "include_defaults", "leader_timeout", "timeout"],
};

pub const PUT_SETTINGS: Endpoint = Endpoint {
    name: "cluster.put_settings",
    method: HttpMethod::Put,
    params: &["flat_settings", "leader_timeout", "timeout"],
};

pub const REMOTE_INFO: Endpoint = Endpoint {
    name: "cluster.remote_info",
    method: HttpMethod::Get,
    params: &[],
};

pub const ALLOCATION_EXPLAIN: Endpoint = Endpoint {
    name: "cluster.allocation_explain",
    method: HttpMethod::Post,
    params: &["include_disk_info", "include_yes_decisions"],
};

pub const DELETE_COMPONENT_TEMPLATE: Endpoint = Endpoint {
    name: "cluster.delete_component_template",
    method: HttpMethod::Delete,
    params: &["leader_timeout", "timeout"],
};

pub const GET_COMPONENT_TEMPLATE: Endpoint = Endpoint {
    name: "cluster.get_component_template",
    method: HttpMethod::Get,
    params: &["local", "leader_timeout"],
};

pub const PUT_COMPONENT_TEMPLATE: Endpoint = Endpoint {
    name: "cluster.put_component_template",
    method: HttpMethod::Put,
    params: &["create", "leader_timeout", "timeout"],
};

pub const EXISTS_COMPONENT_TEMPLATE: Endpoint = Endpoint {
    name: "cluster.exists_component_template",
    method: HttpMethod::Head,
    params: &["local", "leader_timeout"],
};

pub const DELETE_VOTING_CONFIG_EXCLUSIONS: Endpoint = Endpoint {
    name: "cluster.delete_voting_config_exclusions",
    method: HttpMethod::Delete,
    params: &["wait_for_removal"],
};

pub const POST_VOTING_CONFIG_EXCLUSIONS: Endpoint = Endpoint {
    name: "cluster.post_voting_config_exclusions",
    method: HttpMethod::Post,
    params: &["node_ids", "node_names", "timeout"],
};

// ---------------------------------------------------------------------------
// Request builders
// ---------------------------------------------------------------------------

pub fn build_health(
    config: &ClientConfig,
    index: Option<&str>,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    let path = make_path(&[Some("_cluster"), Some("health"), index]);
    HEALTH.request(config, path, options, None)
}

pub fn build_pending_tasks(config: &ClientConfig, options: &Options) -> Result<HttpRequest, ApiError> {
    PENDING_TASKS.request(config, "/_cluster/pending_tasks".to_string(), options, None)
}

/// Cluster state, optionally narrowed by metric and index.
///
/// An index without a metric targets the `_all` metric, since the server has
/// no route with an index but no metric segment.
pub fn build_state(
    config: &ClientConfig,
    metric: Option<&str>,
    index: Option<&str>,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    let metric = if !is_absent(index) && is_absent(metric) {
        Some("_all")
    } else {
        metric
    };
    let path = make_path(&[Some("_cluster"), Some("state"), metric, index]);
    STATE.request(config, path, options, None)
}

pub fn build_stats(
    config: &ClientConfig,
    node_id: Option<&str>,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    let path = if is_absent(node_id) {
        "/_cluster/stats".to_string()
    } else {
        make_path(&[Some("_cluster"), Some("stats"), Some("nodes"), node_id])
    };
    STATS.request(config, path, options, None)
}

pub fn build_reroute(
    config: &ClientConfig,
    body: Option<&Value>,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    REROUTE.request(config, "/_cluster/reroute".to_string(), options, body)
}

pub fn build_get_settings(config: &ClientConfig, options: &Options) -> Result<HttpRequest, ApiError> {
    GET_SETTINGS.request(config, "/_cluster/settings".to_string(), options, None)
}

pub fn build_put_settings(
    config: &ClientConfig,
    body: &Value,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    let body = require_body("body", body)?;
    PUT_SETTINGS.request(config, "/_cluster/settings".to_string(), options, Some(body))
}

pub fn build_remote_info(config: &ClientConfig, options: &Options) -> Result<HttpRequest, ApiError> {
    REMOTE_INFO.request(config, "/_remote/info".to_string(), options, None)
}

/// Without a body the server explains the first unassigned shard it finds.
pub fn build_allocation_explain(
    config: &ClientConfig,
    body: Option<&Value>,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    ALLOCATION_EXPLAIN.request(config, "/_cluster/allocation/explain".to_string(), options, body)
}

pub fn build_delete_component_template(
    config: &ClientConfig,
    name: &str,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    let name = require("name", name)?;
    let path = make_path(&[Some("_component_template"), Some(name)]);
    DELETE_COMPONENT_TEMPLATE.request(config, path, options, None)
}

pub fn build_get_component_template(
    config: &ClientConfig,
    name: Option<&str>,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    let path = make_path(&[Some("_component_template"), name]);
    GET_COMPONENT_TEMPLATE.request(config, path, options, None)
}

pub fn build_put_component_template(
    config: &ClientConfig,
    name: &str,
    body: &Value,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    let name = require("name", name)?;
    let body = require_body("body", body)?;
    let path = make_path(&[Some("_component_template"), Some(name)]);
    PUT_COMPONENT_TEMPLATE.request(config, path, options, Some(body))
}

pub fn build_exists_component_template(
    config: &ClientConfig,
    name: &str,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    let name = require("name", name)?;
    let path = make_path(&[Some("_component_template"), Some(name)]);
    EXISTS_COMPONENT_TEMPLATE.request(config, path, options, None)
}

pub fn build_delete_voting_config_exclusions(
    config: &ClientConfig,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    DELETE_VOTING_CONFIG_EXCLUSIONS.request(
        config,
        "/_cluster/voting_config_exclusions".to_string(),
        options,
        None,
    )
}

/// Nodes are selected with the `node_ids` or `node_names` option, not both.
pub fn build_post_voting_config_exclusions(
    config: &ClientConfig,
    options: &Options,
) -> Result<HttpRequest, ApiError> {
    POST_VOTING_CONFIG_EXCLUSIONS.request(
        config,
        "/_cluster/voting_config_exclusions".to_string(),
        options,
        None,
    )
}

// ---------------------------------------------------------------------------
// Blocking namespace
// ---------------------------------------------------------------------------

/// Cluster operations on a blocking `Client`.
pub struct Cluster<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> Cluster<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    pub fn health(&self, index: Option<&str>, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_health(self.client.config(), index, options)?)
    }

    pub fn pending_tasks(&self, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_pending_tasks(self.client.config(), options)?)
    }

    pub fn state(
        &self,
        metric: Option<&str>,
        index: Option<&str>,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_state(self.client.config(), metric, index, options)?)
    }

    pub fn stats(&self, node_id: Option<&str>, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_stats(self.client.config(), node_id, options)?)
    }

    pub fn reroute(&self, body: Option<&Value>, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_reroute(self.client.config(), body, options)?)
    }

    pub fn get_settings(&self, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_get_settings(self.client.config(), options)?)
    }

    pub fn put_settings(&self, body: &Value, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_put_settings(self.client.config(), body, options)?)
    }

    pub fn remote_info(&self, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_remote_info(self.client.config(), options)?)
    }

    pub fn allocation_explain(
        &self,
        body: Option<&Value>,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_allocation_explain(self.client.config(), body, options)?)
    }

    pub fn delete_component_template(
        &self,
        name: &str,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_delete_component_template(self.client.config(), name, options)?)
    }

    pub fn get_component_template(
        &self,
        name: Option<&str>,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_get_component_template(self.client.config(), name, options)?)
    }

    pub fn put_component_template(
        &self,
        name: &str,
        body: &Value,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_put_component_template(self.client.config(), name, body, options)?)
    }

    /// Issues a HEAD request; pair with `response::parse_exists`.
    pub fn exists_component_template(
        &self,
        name: &str,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_exists_component_template(self.client.config(), name, options)?)
    }

    pub fn delete_voting_config_exclusions(&self, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_delete_voting_config_exclusions(self.client.config(), options)?)
    }

    pub fn post_voting_config_exclusions(&self, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_post_voting_config_exclusions(self.client.config(), options)?)
    }
}

// ---------------------------------------------------------------------------
// Async namespace
// ---------------------------------------------------------------------------

/// Cluster operations on an `AsyncClient`.
pub struct AsyncCluster<'a, T> {
    client: &'a AsyncClient<T>,
}

impl<'a, T: AsyncTransport> AsyncCluster<'a, T> {
    pub(crate) fn new(client: &'a AsyncClient<T>) -> Self {
        Self { client }
    }

    pub async fn health(&self, index: Option<&str>, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_health(self.client.config(), index, options)?).await
    }

    pub async fn pending_tasks(&self, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_pending_tasks(self.client.config(), options)?).await
    }

    pub async fn state(
        &self,
        metric: Option<&str>,
        index: Option<&str>,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_state(self.client.config(), metric, index, options)?).await
    }

    pub async fn stats(&self, node_id: Option<&str>, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_stats(self.client.config(), node_id, options)?).await
    }

    pub async fn reroute(&self, body: Option<&Value>, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_reroute(self.client.config(), body, options)?).await
    }

    pub async fn get_settings(&self, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_get_settings(self.client.config(), options)?).await
    }

    pub async fn put_settings(&self, body: &Value, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_put_settings(self.client.config(), body, options)?).await
    }

    pub async fn remote_info(&self, options: &Options) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_remote_info(self.client.config(), options)?).await
    }

    pub async fn allocation_explain(
        &self,
        body: Option<&Value>,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client.perform(build_allocation_explain(self.client.config(), body, options)?).await
    }

    pub async fn delete_component_template(
        &self,
        name: &str,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .perform(build_delete_component_template(self.client.config(), name, options)?)
            .await
    }

    pub async fn get_component_template(
        &self,
        name: Option<&str>,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .perform(build_get_component_template(self.client.config(), name, options)?)
            .await
    }

    pub async fn put_component_template(
        &self,
        name: &str,
        body: &Value,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .perform(build_put_component_template(self.client.config(), name, body, options)?)
            .await
    }

    pub async fn exists_component_template(
        &self,
        name: &str,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .perform(build_exists_component_template(self.client.config(), name, options)?)
            .await
    }

    pub async fn delete_voting_config_exclusions(
        &self,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .perform(build_delete_voting_config_exclusions(self.client.config(), options)?)
            .await
    }

    pub async fn post_voting_config_exclusions(
        &self,
        options: &Options,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .perform(build_post_voting_config_exclusions(self.client.config(), options)?)
            .await
    }
}
