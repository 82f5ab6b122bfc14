//! The seam between request building and the network.
//!
//! # Design
//! `Transport` executes one `HttpRequest` and hands back the `HttpResponse`
//! as data, including 4xx/5xx answers; interpreting the status is the fetch
//! wrapper's job. Only failures that produce no response at all become
//! `ApiError::Transport`. Closures implement the trait so tests can stub the
//! backend without a socket.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, ApiError>,
{
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self(request)
    }
}

/// Blocking transport backed by a shared `ureq` agent.
///
/// No timeout is configured: a call waits as long as the connection does.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status codes are data here, not errors.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = ureq::http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let result = match &request.body {
            Some(body) => builder
                .body(body.as_bytes())
                .map_err(transport_error)
                .and_then(|req| self.agent.run(req).map_err(transport_error)),
            None => builder
                .body(())
                .map_err(transport_error)
                .and_then(|req| self.agent.run(req).map_err(transport_error)),
        };
        let mut response = result?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(transport_error)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

fn transport_error<E>(err: E) -> ApiError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ApiError::Transport(Box::new(err))
}
