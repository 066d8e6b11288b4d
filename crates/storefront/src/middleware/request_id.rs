//! Request ID middleware for request tracing and correlation.
//!
//! Every request gets an `x-request-id`: the one set by an upstream proxy if
//! present, a fresh UUID v4 otherwise. The ID is written back onto the request
//! (so the trace span can pick it up), tagged in Sentry, and echoed in the
//! response.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Read the request ID from headers, if a valid one is present.
#[must_use]
pub fn request_id_from(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| !id.is_empty())
}

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id =
        request_id_from(request.headers()).map_or_else(|| Uuid::new_v4().to_string(), String::from);

    Span::current().record("request_id", request_id.as_str());

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let header_value = HeaderValue::from_str(&request_id).ok();
    if let Some(value) = &header_value {
        request
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value.clone());
    }

    let mut response = next.run(request).await;

    if let Some(value) = header_value {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn(request_id_middleware))
    }

    #[test]
    fn test_request_id_from_headers() {
        let mut headers = axum::http::HeaderMap::new();
        assert_eq!(request_id_from(&headers), None);

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static(""));
        assert_eq!(request_id_from(&headers), None);

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id_from(&headers), Some("abc-123"));
    }

    #[tokio::test]
    async fn test_generates_request_id() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = request_id_from(response.headers()).unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_keeps_upstream_request_id() {
        let request = Request::builder()
            .uri("/")
            .header(REQUEST_ID_HEADER, "from-proxy")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(request_id_from(response.headers()), Some("from-proxy"));
    }
}
