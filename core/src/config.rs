//! Client configuration, read once at startup.

/// Base URL of the dashboard API.
pub const API_URL_ENV: &str = "DASHBOARD_API_URL";
/// Locale sent as `Accept-Language`.
pub const ACCEPT_LANGUAGE_ENV: &str = "DASHBOARD_ACCEPT_LANGUAGE";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefixed to every relative request path. Never ends with `/`.
    pub base_url: String,
    pub accept_language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    pub fn with_accept_language(mut self, accept_language: &str) -> Self {
        self.accept_language = accept_language.to_string();
        self
    }

    /// Reads `DASHBOARD_API_URL` and `DASHBOARD_ACCEPT_LANGUAGE`; unset or
    /// blank variables keep the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = match non_blank(API_URL_ENV) {
            Some(url) => Self::new(url.trim()),
            None => Self::default(),
        };
        if let Some(language) = non_blank(ACCEPT_LANGUAGE_ENV) {
            config.accept_language = language.trim().to_string();
        }
        tracing::debug!(base_url = %config.base_url, "loaded client config");
        config
    }
}
