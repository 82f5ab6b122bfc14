//! Blocking client core for the Azure SQL usage dashboard.
//!
//! # Overview
//! Calls the dashboard backend (`api/dashboard` and the per-database and
//! per-elastic-pool usage routes) and returns typed view models. Errors are
//! surfaced to the user through an observable toast list.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`);
//!   a `Transport` performs the round-trip, so the build and parse halves are
//!   testable without a network.
//! - `Fetcher` is the generic wrapper: base-URL prefixing, optional bearer
//!   token, JSON-or-text bodies, and a formatted error for non-2xx answers.
//! - `DashboardClient` maps each endpoint to a path and a view model.
//! - `ToastStore` owns the notification queue; `show_error` turns any error
//!   into a warning toast.
//! - View models are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod notify;
pub mod toast;
pub mod transport;
pub mod types;

pub use client::DashboardClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use fetch::Fetcher;
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseBody};
pub use notify::{show_error, ShowErrorExt};
pub use toast::{ToastItem, ToastStore, ToastType};
pub use transport::{Transport, UreqTransport};
pub use types::{
    DashboardViewModel, DatabaseUsageViewModel, DatabaseViewModel, ElasticPoolUsageViewModel,
    ElasticPoolViewModel, ResourceGroupViewModel, SubscriptionViewModel,
};
