//! Event envelope transport: load-balancer target group invocations.
//!
//! When the target group has multi-value headers enabled, requests carry
//! `multiValueHeaders` / `multiValueQueryStringParameters` and the response
//! must answer with `multiValueHeaders` too.

use crate::http::{decode_component, decode_path, CanonicalRequest, CanonicalResponse};
use crate::transport::headers::{first_header_values, to_header_map};
use aws_lambda_events::alb::{AlbTargetGroupRequest, AlbTargetGroupResponse};
use aws_lambda_events::encodings::Body;
use aws_lambda_events::query_map::QueryMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hyper::HeaderMap;
use std::collections::BTreeMap;
use tracing::warn;

/// Whether the target group delivered multi-value maps.
pub fn uses_multi_value(event: &AlbTargetGroupRequest) -> bool {
    !event.multi_value_headers.is_empty()
        || event
            .multi_value_query_string_parameters
            .iter()
            .next()
            .is_some()
}

/// The target group ARN, passed through and never interpreted.
pub fn target_group_arn(event: &AlbTargetGroupRequest) -> &str {
    event
        .request_context
        .elb
        .target_group_arn
        .as_deref()
        .unwrap_or_default()
}

/// Multi-value maps win when present; each name keeps its first value.
impl From<AlbTargetGroupRequest> for CanonicalRequest {
    fn from(event: AlbTargetGroupRequest) -> Self {
        let headers = if event.multi_value_headers.is_empty() {
            first_header_values(&event.headers)
        } else {
            first_header_values(&event.multi_value_headers)
        };

        let query_params = if event.multi_value_query_string_parameters.iter().next().is_some() {
            first_query_values(&event.multi_value_query_string_parameters)
        } else {
            first_query_values(&event.query_string_parameters)
        };

        let body = decoded_body(&event);
        // The load balancer forwards the path still URL-encoded.
        let path = decode_path(event.path.as_deref().unwrap_or_default());

        CanonicalRequest::new(event.http_method.as_str(), path)
            .headers(headers)
            .query_params(query_params)
            .body(body)
    }
}

/// Decoded query parameters, one value per name.
///
/// Components arrive URL-encoded and are decoded like a raw query string.
fn first_query_values(query: &QueryMap) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    for (key, value) in query.iter() {
        params
            .entry(decode_component(key))
            .or_insert_with(|| decode_component(value));
    }
    params
}

fn decoded_body(event: &AlbTargetGroupRequest) -> String {
    let raw = event.body.clone().unwrap_or_default();
    if !event.is_base64_encoded {
        return raw;
    }
    match STANDARD.decode(raw.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => {
            warn!("Body flagged as base64 but failed to decode, keeping raw: {}", err);
            raw
        }
    }
}

/// Wrap a canonical response, mirroring the request's header mode.
pub fn into_alb_response(response: CanonicalResponse, multi_value: bool) -> AlbTargetGroupResponse {
    let header_map = to_header_map(response.headers);
    let (headers, multi_value_headers) = if multi_value {
        (HeaderMap::new(), header_map)
    } else {
        (header_map, HeaderMap::new())
    };

    AlbTargetGroupResponse {
        status_code: i64::from(response.status.0),
        status_description: Some(response.status.description()),
        headers,
        multi_value_headers,
        body: Some(Body::Text(response.body)),
        is_base64_encoded: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StatusCode;

    const SAMPLE_EVENT: &str = r#"{
        "requestContext": {
            "elb": {
                "targetGroupArn": "arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/echo/6d0ecf831eec9f09"
            }
        },
        "httpMethod": "GET",
        "path": "/lambda",
        "queryStringParameters": { "query": "1234ABCD" },
        "headers": {
            "accept": "text/html",
            "host": "lambda-alb-123578498.us-east-1.elb.amazonaws.com",
            "user-agent": "curl/8.4.0"
        },
        "body": "",
        "isBase64Encoded": false
    }"#;

    fn event(json: &str) -> AlbTargetGroupRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_deserialize_sample_event() {
        let event = event(SAMPLE_EVENT);

        assert!(!uses_multi_value(&event));
        assert!(target_group_arn(&event).ends_with("targetgroup/echo/6d0ecf831eec9f09"));

        let canonical = CanonicalRequest::from(event);
        assert_eq!(canonical.method(), "GET");
        assert_eq!(canonical.path(), "/lambda");
        assert_eq!(canonical.query_map().get("query"), Some(&"1234ABCD".to_string()));
        assert_eq!(canonical.get_header("accept"), Some(&"text/html".to_string()));
        assert!(canonical.body_text().is_empty());
    }

    #[test]
    fn test_missing_maps_and_null_body_become_empty() {
        let event = event(
            r#"{"httpMethod":"GET","path":"/","body":null,"requestContext":{"elb":{}},"isBase64Encoded":false}"#,
        );
        assert_eq!(target_group_arn(&event), "");

        let canonical = CanonicalRequest::from(event);
        assert!(canonical.header_map().is_empty());
        assert!(canonical.query_map().is_empty());
        assert!(canonical.body_text().is_empty());
    }

    #[test]
    fn test_multi_value_maps_keep_first_value() {
        let event = event(
            r#"{
                "httpMethod": "GET",
                "path": "/",
                "multiValueHeaders": { "x-trace": ["first", "second"] },
                "multiValueQueryStringParameters": { "tag": ["a%20b", "c"] },
                "requestContext": { "elb": { "targetGroupArn": "arn:opaque" } },
                "isBase64Encoded": false
            }"#,
        );
        assert!(uses_multi_value(&event));

        let canonical = CanonicalRequest::from(event);
        assert_eq!(canonical.get_header("x-trace"), Some(&"first".to_string()));
        assert_eq!(canonical.query_map().get("tag"), Some(&"a b".to_string()));
    }

    #[test]
    fn test_encoded_path_is_decoded() {
        let event = event(
            r#"{"httpMethod":"GET","path":"/items/a%20b","requestContext":{"elb":{}},"isBase64Encoded":false}"#,
        );
        assert_eq!(CanonicalRequest::from(event).path(), "/items/a b");
    }

    #[test]
    fn test_base64_body_is_decoded() {
        let mut event = event(r#"{"httpMethod":"POST","path":"/upload","requestContext":{"elb":{}},"isBase64Encoded":false}"#);
        event.body = Some(STANDARD.encode(r#"{"a":1}"#));
        event.is_base64_encoded = true;

        assert_eq!(CanonicalRequest::from(event).body_text(), r#"{"a":1}"#);
    }

    #[test]
    fn test_base64_non_utf8_body_is_replaced_lossily() {
        let mut event = event(r#"{"httpMethod":"POST","path":"/upload","requestContext":{"elb":{}},"isBase64Encoded":false}"#);
        event.body = Some(STANDARD.encode([b'a', 0xff]));
        event.is_base64_encoded = true;

        assert_eq!(CanonicalRequest::from(event).body_text(), "a\u{FFFD}");
    }

    #[test]
    fn test_invalid_base64_body_kept_raw() {
        let mut event = event(r#"{"httpMethod":"POST","path":"/upload","requestContext":{"elb":{}},"isBase64Encoded":false}"#);
        event.body = Some("not base64!".to_string());
        event.is_base64_encoded = true;

        assert_eq!(CanonicalRequest::from(event).body_text(), "not base64!");
    }

    #[test]
    fn test_response_envelope_single_value() {
        let headers = BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())]);
        let response = CanonicalResponse::new(StatusCode::CREATED, headers, "{}");

        let envelope = into_alb_response(response, false);

        assert_eq!(envelope.status_code, 201);
        assert_eq!(envelope.status_description.as_deref(), Some("201 Created"));
        assert_eq!(envelope.headers.get("content-type").unwrap(), "application/json");
        assert!(envelope.multi_value_headers.is_empty());
        assert!(!envelope.is_base64_encoded);
        assert!(matches!(envelope.body, Some(Body::Text(ref body)) if body == "{}"));
    }

    #[test]
    fn test_response_envelope_multi_value() {
        let headers = BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())]);
        let response = CanonicalResponse::new(StatusCode::OK, headers, "{}");

        let envelope = into_alb_response(response, true);

        assert!(envelope.headers.is_empty());
        assert_eq!(
            envelope.multi_value_headers.get("content-type").unwrap(),
            "application/json"
        );
    }
}
