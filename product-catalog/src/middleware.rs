//! Request tracking middleware
//!
//! Request ID generation and propagation plus masking of sensitive headers in
//! request logs.

use http::HeaderName;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};

use crate::error::{Error, Result};

/// Sensitive headers that should be masked in logs
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-auth-token",
];

/// Parse the configured request ID header name
pub fn request_id_header(name: &str) -> Result<HeaderName> {
    name.parse::<HeaderName>()
        .map_err(|e| Error::Internal(format!("Invalid request ID header '{}': {}", name, e)))
}

/// Create a request ID layer that assigns a UUID to requests lacking one
pub fn request_id_layer(header: HeaderName) -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(header, MakeRequestUuid)
}

/// Create a request ID propagation layer (copies the ID onto the response)
pub fn request_id_propagation_layer(header: HeaderName) -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(header)
}

/// Create a sensitive headers layer
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    let headers = SENSITIVE_HEADERS
        .iter()
        .copied()
        .map(HeaderName::from_static)
        .collect::<Vec<_>>();

    SetSensitiveRequestHeadersLayer::new(headers)
}
