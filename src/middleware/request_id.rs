use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header carrying the request ID in both directions
///
/// Clients (or a proxy in front of the service) may set it to tie their own
/// logs to ours; every response carries it back.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Identifier attached to every log line of one watchlist request
///
/// Stored in the request extensions by [`request_id_middleware`] and read by
/// handlers through `Extension<RequestId>`. It is `Copy`, so handlers can log
/// it from inside `map_err` closures without cloning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Generates a fresh random (v4) request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reads the caller's `x-request-id` header
    ///
    /// Returns `None` when the header is missing, not valid ASCII, or not a
    /// UUID; surrounding whitespace is tolerated. Arbitrary strings are not
    /// propagated, so log fields stay a fixed, predictable shape.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .map(Self)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tags each request with a [`RequestId`]
///
/// A valid incoming `x-request-id` is reused; otherwise a new ID is generated.
/// The ID is inserted into the request extensions before the handler runs and
/// written to the response headers afterwards, including on error responses.
/// This layer must sit outside the trace layer so the span sees the ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers()).unwrap_or_default();

    request.extensions_mut().insert(request_id);

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id.to_string()) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
    }

    response
}

/// Builds the `http_request` span used by `TraceLayer`
///
/// Records the method, the URI and the request ID. Falls back to `"unknown"`
/// when the request-id layer has not run, which only happens if the router is
/// assembled without it.
pub fn make_span_with_request_id(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
