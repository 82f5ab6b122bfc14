//! Typed client for the dashboard API.
//!
//! # Design
//! Each endpoint is a fixed path template plus a declared view model. The
//! `build_*` methods produce the `HttpRequest` without touching the network;
//! the `get_*` methods send it through the fetch wrapper and decode the
//! result. Path segments are inserted verbatim: callers own the legal
//! character set.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::fetch::{Fetcher, JSON_CONTENT_TYPE};
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::{Transport, UreqTransport};
use crate::types::{DashboardViewModel, DatabaseUsageViewModel, ElasticPoolUsageViewModel};

pub fn dashboard_path() -> String {
    "api/dashboard".to_string()
}

pub fn database_usage_path(
    subscription_id: &str,
    resource_group_name: &str,
    server_name: &str,
    database_name: &str,
) -> String {
    format!(
        "api/subscription/{subscription_id}/resource-group/{resource_group_name}/server/{server_name}/database/{database_name}/usage"
    )
}

pub fn elastic_pool_usage_path(
    subscription_id: &str,
    resource_group_name: &str,
    server_name: &str,
    elastic_pool_name: &str,
) -> String {
    format!(
        "api/subscription/{subscription_id}/resource-group/{resource_group_name}/server/{server_name}/elastic-pool/{elastic_pool_name}/usage"
    )
}

/// Blocking client for the dashboard API.
#[derive(Debug, Clone)]
pub struct DashboardClient<T = UreqTransport> {
    fetcher: Fetcher<T>,
}

impl DashboardClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            fetcher: Fetcher::new(config),
        }
    }

    /// Client configured from `DASHBOARD_API_URL` / `DASHBOARD_ACCEPT_LANGUAGE`.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }
}

impl<T: Transport> DashboardClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            fetcher: Fetcher::with_transport(config, transport),
        }
    }

    /// The underlying fetch wrapper, for requests outside the typed API.
    pub fn fetcher(&self) -> &Fetcher<T> {
        &self.fetcher
    }

    pub fn build_get_dashboard(&self) -> HttpRequest {
        self.build_get(&dashboard_path())
    }

    pub fn build_get_database_usage(
        &self,
        subscription_id: &str,
        resource_group_name: &str,
        server_name: &str,
        database_name: &str,
    ) -> HttpRequest {
        self.build_get(&database_usage_path(
            subscription_id,
            resource_group_name,
            server_name,
            database_name,
        ))
    }

    pub fn build_get_elastic_pool_usage(
        &self,
        subscription_id: &str,
        resource_group_name: &str,
        server_name: &str,
        elastic_pool_name: &str,
    ) -> HttpRequest {
        self.build_get(&elastic_pool_usage_path(
            subscription_id,
            resource_group_name,
            server_name,
            elastic_pool_name,
        ))
    }

    pub fn get_dashboard(&self) -> Result<DashboardViewModel, ApiError> {
        self.fetcher.send_json(&self.build_get_dashboard())
    }

    pub fn get_database_usage(
        &self,
        subscription_id: &str,
        resource_group_name: &str,
        server_name: &str,
        database_name: &str,
    ) -> Result<DatabaseUsageViewModel, ApiError> {
        let request = self.build_get_database_usage(
            subscription_id,
            resource_group_name,
            server_name,
            database_name,
        );
        self.fetcher.send_json(&request)
    }

    pub fn get_elastic_pool_usage(
        &self,
        subscription_id: &str,
        resource_group_name: &str,
        server_name: &str,
        elastic_pool_name: &str,
    ) -> Result<ElasticPoolUsageViewModel, ApiError> {
        let request = self.build_get_elastic_pool_usage(
            subscription_id,
            resource_group_name,
            server_name,
            elastic_pool_name,
        );
        self.fetcher.send_json(&request)
    }

    fn build_get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.fetcher.url(path),
            headers: self.fetcher.standard_headers(JSON_CONTENT_TYPE, None),
            body: None,
        }
    }
}
