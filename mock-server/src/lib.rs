use std::{path::Path as FsPath, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

// --- fixture: what the backend would read from its settings and Azure ---

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionFixture>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionFixture {
    pub display_name: String,
    pub subscription_id: String,
    #[serde(default)]
    pub resource_groups: Vec<ResourceGroupFixture>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupFixture {
    pub resource_group_name: String,
    #[serde(default)]
    pub databases: Vec<DatabaseFixture>,
    #[serde(default)]
    pub elastic_pools: Vec<ElasticPoolFixture>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseFixture {
    pub server_name: String,
    pub database_name: String,
    pub size_used: u64,
    pub size_allocated: u64,
    pub size_max: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticPoolFixture {
    pub server_name: String,
    pub elastic_pool_name: String,
    pub max_size_bytes: u64,
    #[serde(default)]
    pub databases: Vec<PooledDatabaseFixture>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PooledDatabaseFixture {
    pub database_name: String,
    pub size_used: u64,
    pub size_allocated: u64,
}

impl Fixture {
    pub fn load(path: impl AsRef<FsPath>) -> std::io::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    fn resource_group(&self, subscription_id: &str, name: &str) -> Option<&ResourceGroupFixture> {
        self.subscriptions
            .iter()
            .find(|s| s.subscription_id == subscription_id)?
            .resource_groups
            .iter()
            .find(|rg| rg.resource_group_name == name)
    }
}

// --- wire shapes served to the client ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseView {
    pub server_name: String,
    pub database_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticPoolView {
    pub server_name: String,
    pub elastic_pool_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupView {
    pub resource_group_name: String,
    pub databases: Vec<DatabaseView>,
    pub elastic_pools: Vec<ElasticPoolView>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionView {
    pub display_name: String,
    pub subscription_id: String,
    pub resource_groups: Vec<ResourceGroupView>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub subscriptions: Vec<SubscriptionView>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageView {
    pub database_size_used: u64,
    pub database_size_allocated: u64,
    pub database_size_max: u64,
}

impl From<&Fixture> for DashboardView {
    fn from(fixture: &Fixture) -> Self {
        Self {
            subscriptions: fixture
                .subscriptions
                .iter()
                .map(|s| SubscriptionView {
                    display_name: s.display_name.clone(),
                    subscription_id: s.subscription_id.clone(),
                    resource_groups: s.resource_groups.iter().map(ResourceGroupView::from).collect(),
                })
                .collect(),
        }
    }
}

impl From<&ResourceGroupFixture> for ResourceGroupView {
    fn from(rg: &ResourceGroupFixture) -> Self {
        Self {
            resource_group_name: rg.resource_group_name.clone(),
            databases: rg
                .databases
                .iter()
                .map(|d| DatabaseView {
                    server_name: d.server_name.clone(),
                    database_name: d.database_name.clone(),
                })
                .collect(),
            elastic_pools: rg
                .elastic_pools
                .iter()
                .map(|p| ElasticPoolView {
                    server_name: p.server_name.clone(),
                    elastic_pool_name: p.elastic_pool_name.clone(),
                })
                .collect(),
        }
    }
}

impl From<&ElasticPoolFixture> for UsageView {
    /// The pool has no usage of its own: sum its databases. Max is the pool's
    /// own limit; the sums are not capped by it.
    fn from(pool: &ElasticPoolFixture) -> Self {
        Self {
            database_size_used: pool.databases.iter().map(|d| d.size_used).sum(),
            database_size_allocated: pool.databases.iter().map(|d| d.size_allocated).sum(),
            database_size_max: pool.max_size_bytes,
        }
    }
}

// --- router ---

#[derive(Clone)]
struct AppState {
    fixture: Arc<Fixture>,
    access_token: Option<Arc<str>>,
}

type UsagePath = Path<(String, String, String, String)>;
type NotFound = (StatusCode, &'static str);

const NOT_FOUND: NotFound = (StatusCode::NOT_FOUND, "not found");

/// Router serving `fixture` without authentication.
pub fn app(fixture: Fixture) -> Router {
    router(fixture, None)
}

/// Router that rejects `/api` calls lacking `Authorization: Bearer <token>`.
pub fn app_with_token(fixture: Fixture, token: &str) -> Router {
    router(fixture, Some(token))
}

fn router(fixture: Fixture, token: Option<&str>) -> Router {
    let state = AppState {
        fixture: Arc::new(fixture),
        access_token: token.map(Arc::from),
    };
    Router::new()
        .route("/api/health", get(health))
        .route("/api/dashboard", get(dashboard))
        .route(
            "/api/subscription/{subscription_id}/resource-group/{resource_group_name}/server/{server_name}/database/{database_name}/usage",
            get(database_usage),
        )
        .route(
            "/api/subscription/{subscription_id}/resource-group/{resource_group_name}/server/{server_name}/elastic-pool/{elastic_pool_name}/usage",
            get(elastic_pool_usage),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

pub async fn run(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.access_token.as_deref() else {
        return next.run(request).await;
    };
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if presented == Some(expected) {
        next.run(request).await
    } else {
        tracing::debug!(uri = %request.uri(), "rejected request without valid bearer token");
        (StatusCode::UNAUTHORIZED, "missing or invalid bearer token").into_response()
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    tracing::debug!(subscriptions = state.fixture.subscriptions.len(), "dashboard");
    Json(DashboardView::from(state.fixture.as_ref()))
}

async fn database_usage(
    State(state): State<AppState>,
    Path((subscription_id, resource_group_name, server_name, database_name)): UsagePath,
) -> Result<Json<UsageView>, NotFound> {
    tracing::debug!(%subscription_id, %resource_group_name, %server_name, %database_name, "database usage");
    let database = state
        .fixture
        .resource_group(&subscription_id, &resource_group_name)
        .and_then(|rg| {
            rg.databases
                .iter()
                .find(|d| d.server_name == server_name && d.database_name == database_name)
        })
        .ok_or(NOT_FOUND)?;
    Ok(Json(UsageView {
        database_size_used: database.size_used,
        database_size_allocated: database.size_allocated,
        database_size_max: database.size_max,
    }))
}

async fn elastic_pool_usage(
    State(state): State<AppState>,
    Path((subscription_id, resource_group_name, server_name, elastic_pool_name)): UsagePath,
) -> Result<Json<UsageView>, NotFound> {
    tracing::debug!(%subscription_id, %resource_group_name, %server_name, %elastic_pool_name, "elastic pool usage");
    let pool = state
        .fixture
        .resource_group(&subscription_id, &resource_group_name)
        .and_then(|rg| {
            rg.elastic_pools
                .iter()
                .find(|p| p.server_name == server_name && p.elastic_pool_name == elastic_pool_name)
        })
        .ok_or(NOT_FOUND)?;
    Ok(Json(UsageView::from(pool)))
}
