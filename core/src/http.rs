//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The fetch wrapper builds
//! `HttpRequest` values and parses `HttpResponse` values; a `Transport`
//! (see `transport.rs`) performs the network round-trip in between. Header
//! lookups are case-insensitive, as on the wire.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
///
/// `status_text` is the reason phrase (`"Not Found"`), which ends up in the
/// message of `ApiError::Http`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the declared content type carries JSON.
    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .map(|value| value.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false)
    }
}

/// A successful response body, decoded according to its content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>) -> HttpResponse {
        HttpResponse {
            status,
            status_text: String::new(),
            headers: content_type
                .map(|value| vec![("Content-Type".to_string(), value.to_string())])
                .unwrap_or_default(),
            body: String::new(),
        }
    }

    #[test]
    fn header_lookup_ignores_case() {
        let resp = response(200, Some("application/json"));
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(resp.header("accept"), None);
    }

    #[test]
    fn json_detection_accepts_parameters() {
        assert!(response(200, Some("application/json; charset=utf-8")).is_json());
        assert!(!response(200, Some("text/plain")).is_json());
        assert!(!response(200, None).is_json());
    }

    #[test]
    fn success_range() {
        assert!(response(200, None).is_success());
        assert!(response(204, None).is_success());
        assert!(!response(301, None).is_success());
        assert!(!response(404, None).is_success());
    }
}
