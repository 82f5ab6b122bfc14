//! View models returned by the dashboard API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates. All of
//! them are plain snapshots: the client never mutates or caches them.

use serde::{Deserialize, Serialize};

/// A database shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseViewModel {
    pub server_name: String,
    pub database_name: String,
}

/// An elastic pool shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ElasticPoolViewModel {
    pub server_name: String,
    pub elastic_pool_name: String,
}

/// A resource group and the databases and pools it contributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupViewModel {
    pub resource_group_name: String,
    pub databases: Vec<DatabaseViewModel>,
    pub elastic_pools: Vec<ElasticPoolViewModel>,
}

/// A subscription. `subscription_id` is a GUID string passed through
/// verbatim into usage URLs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionViewModel {
    pub display_name: String,
    pub subscription_id: String,
    pub resource_groups: Vec<ResourceGroupViewModel>,
}

/// Everything the dashboard needs to lay itself out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewModel {
    pub subscriptions: Vec<SubscriptionViewModel>,
}

/// Storage usage of a single database, in bytes.
///
/// The backend names the fields `databaseSize*`; the short `size*` names are
/// accepted too.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseUsageViewModel {
    #[serde(rename = "databaseSizeUsed", alias = "sizeUsed")]
    pub size_used: u64,
    #[serde(rename = "databaseSizeAllocated", alias = "sizeAllocated")]
    pub size_allocated: u64,
    #[serde(rename = "databaseSizeMax", alias = "sizeMax")]
    pub size_max: u64,
}

/// Storage usage of an elastic pool, in bytes. Used and allocated are summed
/// over the pool's databases; max is the pool's own limit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ElasticPoolUsageViewModel {
    #[serde(rename = "databaseSizeUsed", alias = "sizeUsed")]
    pub size_used: u64,
    #[serde(rename = "databaseSizeAllocated", alias = "sizeAllocated")]
    pub size_allocated: u64,
    #[serde(rename = "databaseSizeMax", alias = "sizeMax")]
    pub size_max: u64,
}

impl DatabaseUsageViewModel {
    pub fn percent_used(&self) -> f64 {
        percent(self.size_used, self.size_max)
    }

    pub fn percent_allocated(&self) -> f64 {
        percent(self.size_allocated, self.size_max)
    }
}

impl ElasticPoolUsageViewModel {
    pub fn percent_used(&self) -> f64 {
        percent(self.size_used, self.size_max)
    }

    pub fn percent_allocated(&self) -> f64 {
        percent(self.size_allocated, self.size_max)
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}
