//! JSON payloads written into response bodies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of every successful response, including CORS preflight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessPayload {
    pub message: String,
    pub request_type: String,
    pub path: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query_params: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    pub status: u16,
}

/// Body of 405 and 500 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// `"Method Not Allowed"` or `"Internal Server Error"`.
    pub error: String,
    pub message: String,
    pub status: u16,
}
