//! Canonical request shared by every transport.

use std::collections::BTreeMap;

/// HTTP methods the synthesizer answers with a success payload.
///
/// Matching is case-sensitive: `"get"` is not `GET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
}

impl Method {
    /// Parse a method exactly as received on the wire.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "DELETE" => Some(Method::Delete),
            "PATCH" => Some(Method::Patch),
            "OPTIONS" => Some(Method::Options),
            _ => None,
        }
    }

    /// Wire form of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport-independent view of one inbound request.
///
/// Built once by a request adapter and handed by value to
/// [`synthesize`](crate::synth::synthesize). Fields are only readable after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    method: String,
    path: String,
    headers: BTreeMap<String, String>,
    query_params: BTreeMap<String, String>,
    body: String,
}

impl CanonicalRequest {
    /// Create a request with no headers, query parameters or body.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: BTreeMap::new(),
            query_params: BTreeMap::new(),
            body: String::new(),
        }
    }

    /// Add a header. An existing value for the same name is kept.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.entry(key.into()).or_insert_with(|| value.into());
        self
    }

    /// Add a query parameter. An existing value for the same name is kept.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params
            .entry(key.into())
            .or_insert_with(|| value.into());
        self
    }

    /// Replace all headers.
    pub fn headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Replace all query parameters.
    pub fn query_params(mut self, query_params: BTreeMap<String, String>) -> Self {
        self.query_params = query_params;
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Method exactly as received.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Decoded URL path, without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All headers, one value per name.
    pub fn header_map(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// All query parameters, one value per name.
    pub fn query_map(&self) -> &BTreeMap<String, String> {
        &self.query_params
    }

    /// Raw body text, empty when none was sent.
    pub fn body_text(&self) -> &str {
        &self.body
    }

    /// Get a header value.
    pub fn get_header(&self, key: &str) -> Option<&String> {
        self.headers.get(key)
    }

    /// Split into owned parts: method, path, headers, query parameters, body.
    pub fn into_parts(
        self,
    ) -> (
        String,
        String,
        BTreeMap<String, String>,
        BTreeMap<String, String>,
        String,
    ) {
        (
            self.method,
            self.path,
            self.headers,
            self.query_params,
            self.body,
        )
    }
}

/// Parse a raw query string (without the leading `?`) into single values.
///
/// The first occurrence of a name wins, later duplicates are dropped. Pairs
/// without `=` map to an empty value and empty segments are skipped.
pub fn parse_query(raw: &str) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params
            .entry(decode_component(key))
            .or_insert_with(|| decode_component(value));
    }
    params
}

/// Percent-decode one query component, treating `+` as a space.
///
/// Components that do not decode to UTF-8 are returned unchanged.
pub fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

/// Percent-decode a URL path. `+` is kept as is.
///
/// Paths that do not decode to UTF-8 are returned unchanged.
pub fn decode_path(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_is_case_sensitive() {
        assert_eq!(Method::parse("GET"), Some(Method::Get));
        assert_eq!(Method::parse("OPTIONS"), Some(Method::Options));
        assert_eq!(Method::parse("get"), None);
        assert_eq!(Method::parse("TRACE"), None);
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_builder_keeps_first_header() {
        let request = CanonicalRequest::new("GET", "/")
            .header("accept", "text/html")
            .header("accept", "application/json");
        assert_eq!(request.get_header("accept"), Some(&"text/html".to_string()));
    }

    #[test]
    fn test_parse_query_first_value_wins() {
        let params = parse_query("a=1&b=2&a=3");
        assert_eq!(params.get("a"), Some(&"1".to_string()));
        assert_eq!(params.get("b"), Some(&"2".to_string()));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_parse_query_decodes_components() {
        let params = parse_query("name=hello+world&path=%2Fitems%2F1&flag");
        assert_eq!(params.get("name"), Some(&"hello world".to_string()));
        assert_eq!(params.get("path"), Some(&"/items/1".to_string()));
        assert_eq!(params.get("flag"), Some(&String::new()));
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/items/a%20b"), "/items/a b");
        assert_eq!(decode_path("/a+b"), "/a+b");
        assert_eq!(decode_path("/bad/%FF"), "/bad/%FF");
    }

    #[test]
    fn test_parse_query_tolerates_garbage() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("&&").is_empty());
        let params = parse_query("bad=%FF");
        assert_eq!(params.get("bad"), Some(&"%FF".to_string()));
    }
}
