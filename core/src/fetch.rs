//! Generic fetch wrapper: one request in, a parsed body or an `ApiError` out.
//!
//! # Design
//! Split the same way as the typed client: `build_request` produces an
//! `HttpRequest`, the `Transport` runs it, `parse_response` normalizes the
//! `HttpResponse`. Nothing here retries, caches or swallows errors.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, ResponseBody};
use crate::transport::{Transport, UreqTransport};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Issues requests against the configured base API URL.
#[derive(Debug, Clone)]
pub struct Fetcher<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl Fetcher<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolves `path` against the base URL. Fully qualified URLs pass
    /// through untouched; segments are never encoded.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    /// `Content-Type`, `Accept-Language`, `Cache-Control` and, when a token
    /// is given, `Authorization: Bearer`.
    pub fn standard_headers(&self, content_type: &str, token: Option<&str>) -> Vec<(String, String)> {
        let mut headers = vec![
            (
                "Content-Type".to_string(),
                format!("{content_type}; charset=utf-8"),
            ),
            (
                "Accept-Language".to_string(),
                self.config.accept_language.clone(),
            ),
            ("Cache-Control".to_string(), "no-cache".to_string()),
        ];
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        headers
    }

    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
        content_type: &str,
    ) -> Result<HttpRequest, ApiError> {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;

        Ok(HttpRequest {
            method,
            url: self.url(path),
            headers: self.standard_headers(content_type, token),
            body,
        })
    }

    /// Runs a request and returns the body as JSON or text, per the
    /// response's content type.
    pub fn request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
        content_type: &str,
    ) -> Result<ResponseBody, ApiError> {
        let request = self.build_request(method, path, token, body, content_type)?;
        self.send(&request)
    }

    /// Like `request`, decoding the body into `R`.
    pub fn request_json<R, B>(
        &self,
        method: HttpMethod,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let parsed = self.request(method, path, token, body, JSON_CONTENT_TYPE)?;
        decode(parsed)
    }

    /// A plain GET without token or body.
    pub fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.request_json::<R, ()>(HttpMethod::Get, path, None, None)
    }

    pub fn send(&self, request: &HttpRequest) -> Result<ResponseBody, ApiError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        parse_response(response)
    }

    pub fn send_json<R: DeserializeOwned>(&self, request: &HttpRequest) -> Result<R, ApiError> {
        decode(self.send(request)?)
    }
}

/// Turns a raw response into a body, or into `ApiError::Http` for any
/// status outside 200..=299.
pub fn parse_response(response: HttpResponse) -> Result<ResponseBody, ApiError> {
    if !response.is_success() {
        tracing::debug!(status = response.status, "request failed");
        return Err(ApiError::Http {
            status: response.status,
            status_text: response.status_text,
            body: response.body,
        });
    }
    if response.is_json() {
        let value = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        return Ok(ResponseBody::Json(value));
    }
    Ok(ResponseBody::Text(response.body))
}

/// Decodes a parsed body into a view model. Text bodies are tried as JSON
/// too, for backends that omit the content type.
pub fn decode<R: DeserializeOwned>(body: ResponseBody) -> Result<R, ApiError> {
    let result = match body {
        ResponseBody::Json(value) => serde_json::from_value(value),
        ResponseBody::Text(text) => serde_json::from_str(&text),
    };
    result.map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    fn response(status: u16, status_text: &str, content_type: &str, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            status_text: status_text.to_string(),
            headers: vec![("content-type".to_string(), content_type.to_string())],
            body: body.to_string(),
        }
    }

    fn fetcher() -> Fetcher {
        Fetcher::new(ClientConfig::new("http://localhost:3000"))
    }

    #[test]
    fn build_request_sets_standard_headers() {
        let req = fetcher()
            .build_request::<()>(HttpMethod::Get, "api/dashboard", None, None, JSON_CONTENT_TYPE)
            .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/dashboard");
        assert_eq!(req.header("content-type"), Some("application/json; charset=utf-8"));
        assert_eq!(req.header("accept-language"), Some("en-US"));
        assert_eq!(req.header("cache-control"), Some("no-cache"));
        assert_eq!(req.header("authorization"), None);
        assert!(req.body.is_none());
    }

    #[test]
    fn build_request_attaches_token_and_body() {
        let req = fetcher()
            .build_request(
                HttpMethod::Post,
                "/api/echo",
                Some("abc123"),
                Some(&json!({"name": "db1"})),
                "text/plain",
            )
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/echo");
        assert_eq!(req.header("authorization"), Some("Bearer abc123"));
        assert_eq!(req.header("content-type"), Some("text/plain; charset=utf-8"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "db1");
    }

    #[test]
    fn unencodable_body_is_a_serialization_error() {
        let mut body = BTreeMap::new();
        body.insert((1u8, 2u8), 3u8);
        let err = fetcher()
            .build_request(HttpMethod::Post, "api/x", None, Some(&body), JSON_CONTENT_TYPE)
            .unwrap_err();
        assert!(matches!(err, ApiError::Serialization(_)));
        assert_eq!(err.to_string(), "serialization failed: key must be a string");
    }

    #[test]
    fn accept_language_follows_config() {
        let config = ClientConfig::new("http://localhost:3000").with_accept_language("nl-NL");
        let f = Fetcher::new(config);
        assert_eq!(f.config().accept_language, "nl-NL");
        let req = f
            .build_request::<()>(HttpMethod::Get, "api/dashboard", None, None, JSON_CONTENT_TYPE)
            .unwrap();
        assert_eq!(req.header("accept-language"), Some("nl-NL"));
    }

    #[test]
    fn qualified_urls_are_used_verbatim() {
        let f = fetcher();
        assert_eq!(f.url("https://other.example.com/x"), "https://other.example.com/x");
        assert_eq!(f.url("api/a b"), "http://localhost:3000/api/a b");
    }

    #[test]
    fn json_success_returns_parsed_value() {
        let body = parse_response(response(200, "OK", "application/json", r#"{"a":[1,2]}"#)).unwrap();
        assert_eq!(body, ResponseBody::Json(json!({"a": [1, 2]})));
    }

    #[test]
    fn text_success_returns_raw_text() {
        let body = parse_response(response(200, "OK", "text/plain", "ok")).unwrap();
        assert_eq!(body, ResponseBody::Text("ok".to_string()));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_response(response(200, "OK", "application/json", "{")).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
    }

    #[test]
    fn failure_message_includes_body() {
        let err = parse_response(response(404, "Not Found", "text/plain", "not found")).unwrap_err();
        assert_eq!(err.to_string(), "404 Not Found - not found");
    }

    #[test]
    fn failure_message_without_body() {
        let err = parse_response(response(503, "Service Unavailable", "text/plain", "")).unwrap_err();
        assert_eq!(err.to_string(), "503 Service Unavailable");
    }

    #[test]
    fn decode_reports_shape_mismatch() {
        let err = decode::<crate::types::DashboardViewModel>(ResponseBody::Json(json!({"x": 1})))
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
    }

    #[test]
    fn request_goes_through_transport() {
        let seen = RefCell::new(Vec::new());
        let stub = |req: &HttpRequest| {
            seen.borrow_mut().push(req.clone());
            Ok::<_, ApiError>(response(200, "OK", "application/json", r#"{"subscriptions":[]}"#))
        };
        let f = Fetcher::with_transport(ClientConfig::new("http://api"), stub);
        let dashboard: crate::types::DashboardViewModel = f.get("api/dashboard").unwrap();
        assert!(dashboard.subscriptions.is_empty());
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].url, "http://api/api/dashboard");
    }

    #[test]
    fn transport_errors_propagate() {
        let stub = |_: &HttpRequest| {
            Err::<HttpResponse, _>(ApiError::Transport(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))))
        };
        let f = Fetcher::with_transport(ClientConfig::default(), stub);
        let err = f.get::<serde_json::Value>("api/dashboard").unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }
}
