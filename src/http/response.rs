//! Canonical response produced by the synthesizer.

use std::collections::BTreeMap;

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const CREATED: StatusCode = StatusCode(201);
    pub const METHOD_NOT_ALLOWED: StatusCode = StatusCode(405);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    /// Standard reason phrase, if the code has one.
    pub fn reason(&self) -> Option<&'static str> {
        hyper::StatusCode::from_u16(self.0)
            .ok()
            .and_then(|s| s.canonical_reason())
    }

    /// Status line text such as `"405 Method Not Allowed"`.
    pub fn description(&self) -> String {
        match self.reason() {
            Some(reason) => format!("{} {}", self.0, reason),
            None => self.0.to_string(),
        }
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

/// Transport-independent response: status, headers and a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// HTTP headers, written back verbatim by the responders.
    pub headers: BTreeMap<String, String>,
    /// JSON text.
    pub body: String,
}

impl CanonicalResponse {
    /// Create a response with the given status, headers and JSON body.
    pub fn new(
        status: impl Into<StatusCode>,
        headers: BTreeMap<String, String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            status: status.into(),
            headers,
            body: body.into(),
        }
    }

    /// Get a header value.
    pub fn get_header(&self, key: &str) -> Option<&String> {
        self.headers.get(key)
    }

    /// Parse the body as JSON.
    pub fn json_body<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
