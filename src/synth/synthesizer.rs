//! The decision core: canonical request in, canonical response out.

use crate::http::{CanonicalRequest, CanonicalResponse, Method, StatusCode};
use crate::synth::error::SynthError;
use crate::synth::payload::{ErrorPayload, SuccessPayload};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, error, info};

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, PATCH, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization";

const PREFLIGHT_MESSAGE: &str = "CORS preflight request handled successfully";

// Written when even the error payload cannot be encoded.
const FALLBACK_ERROR_BODY: &str =
    r#"{"error":"Internal Server Error","message":"Failed to process request","status":500}"#;

/// How a request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `OPTIONS`, answered before method dispatch.
    CorsPreflight,
    /// One of the five echo methods, with its status.
    MethodHandled(StatusCode),
    /// Any other method.
    MethodRejected,
    /// The success payload could not be encoded.
    SerializationFailed,
}

impl Outcome {
    /// Status code answered for this outcome.
    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::CorsPreflight => StatusCode::OK,
            Outcome::MethodHandled(status) => *status,
            Outcome::MethodRejected => StatusCode::METHOD_NOT_ALLOWED,
            Outcome::SerializationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Headers attached to every response regardless of outcome.
pub fn cors_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        (
            "Access-Control-Allow-Origin".to_string(),
            CORS_ALLOW_ORIGIN.to_string(),
        ),
        (
            "Access-Control-Allow-Methods".to_string(),
            CORS_ALLOW_METHODS.to_string(),
        ),
        (
            "Access-Control-Allow-Headers".to_string(),
            CORS_ALLOW_HEADERS.to_string(),
        ),
    ])
}

/// Message and status for each supported method.
fn dispatch(method: &str) -> Result<(&'static str, StatusCode), SynthError> {
    match Method::parse(method) {
        Some(Method::Get) => Ok(("GET request processed successfully", StatusCode::OK)),
        Some(Method::Post) => Ok(("POST request processed successfully", StatusCode::CREATED)),
        Some(Method::Put) => Ok(("PUT request processed successfully", StatusCode::OK)),
        Some(Method::Delete) => Ok(("DELETE request processed successfully", StatusCode::OK)),
        Some(Method::Patch) => Ok(("PATCH request processed successfully", StatusCode::OK)),
        Some(Method::Options) => Ok((PREFLIGHT_MESSAGE, StatusCode::OK)),
        None => Err(SynthError::MethodNotAllowed(method.to_string())),
    }
}

/// Turn a canonical request into its canonical response.
///
/// Infallible: unsupported methods and encoding failures become error
/// payloads with status 405 and 500.
pub fn synthesize(request: CanonicalRequest) -> CanonicalResponse {
    info!(method = %request.method(), path = %request.path(), "Received request");

    let headers = cors_headers();

    if request.method() == Method::Options.as_str() {
        let (method, path, request_headers, _, _) = request.into_parts();
        let payload = SuccessPayload {
            message: PREFLIGHT_MESSAGE.to_string(),
            request_type: Method::Options.as_str().to_string(),
            path,
            method,
            headers: request_headers,
            query_params: BTreeMap::new(),
            body: String::new(),
            status: StatusCode::OK.0,
        };
        return render(&payload, Outcome::CorsPreflight, headers);
    }

    let (message, status) = match dispatch(request.method()) {
        Ok(entry) => entry,
        Err(err) => return reject(&err, headers),
    };

    let (method, path, request_headers, query_params, body) = request.into_parts();
    let payload = SuccessPayload {
        message: message.to_string(),
        request_type: method.clone(),
        path,
        method,
        headers: request_headers,
        query_params,
        body,
        status: status.0,
    };

    render(&payload, Outcome::MethodHandled(status), headers)
}

/// Encode a success payload, falling back to a 500 error payload.
fn render<T: Serialize>(
    payload: &T,
    outcome: Outcome,
    headers: BTreeMap<String, String>,
) -> CanonicalResponse {
    match serde_json::to_string(payload) {
        Ok(body) => {
            debug!(status = outcome.status().0, %body, "Sending response");
            CanonicalResponse::new(outcome.status(), headers, body)
        }
        Err(err) => {
            let err = SynthError::from(err);
            error!("Error marshaling response: {}", err);
            reject(&err, headers)
        }
    }
}

fn reject(err: &SynthError, headers: BTreeMap<String, String>) -> CanonicalResponse {
    let outcome = match err {
        SynthError::MethodNotAllowed(_) => Outcome::MethodRejected,
        SynthError::Serialization(_) => Outcome::SerializationFailed,
    };
    let payload = ErrorPayload::from(err);
    let body = serde_json::to_string(&payload)
        .unwrap_or_else(|_| FALLBACK_ERROR_BODY.to_string());
    debug!(?outcome, %body, "Sending error response");
    CanonicalResponse::new(outcome.status(), headers, body)
}
