//! Integration tests for the Luxury storefront.
//!
//! The storefront router is built in-process and driven with
//! `tower::ServiceExt::oneshot`; no server or network is involved.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p luxury-integration-tests
//! ```
//!
//! # Helpers
//!
//! - [`TestApp`] - A storefront backed by the built-in catalog, or by one of
//!   the JSON catalogs under `fixtures/`
//! - [`TestClient`] - One shopper, carrying their session cookie between
//!   requests like a browser would

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::path::Path;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use luxury_storefront::{config::StorefrontConfig, state::AppState};
use tower::ServiceExt;

/// Largest response body the helpers will read.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// A storefront router built from the default configuration.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Build the storefront with the built-in catalog and the repository's
    /// content pages.
    #[must_use]
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Build the storefront with the catalog in `fixtures/<name>`.
    #[must_use]
    pub fn with_catalog(name: &str) -> Self {
        Self::build(Some(name))
    }

    fn build(catalog: Option<&str>) -> Self {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let content_dir = root.join("../storefront/content");
        let static_dir = root.join("../storefront/static");
        let catalog_path = catalog.map(|name| root.join("fixtures").join(name));

        let config = StorefrontConfig::from_lookup(|key| match key {
            "STOREFRONT_CONTENT_DIR" => Some(content_dir.display().to_string()),
            "STOREFRONT_STATIC_DIR" => Some(static_dir.display().to_string()),
            "STOREFRONT_CATALOG_PATH" => catalog_path.as_ref().map(|p| p.display().to_string()),
            _ => None,
        })
        .expect("default configuration is valid");
        let state = AppState::new(config).expect("built-in catalog and content load");

        Self {
            router: luxury_storefront::app(state),
        }
    }

    /// A new shopper without a session.
    #[must_use]
    pub fn client(&self) -> TestClient {
        TestClient {
            router: self.router.clone(),
            cookie: None,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A shopper talking to a [`TestApp`].
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

/// Status, headers and body of a response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The redirect target, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

impl TestClient {
    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self
            .request("GET", uri)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    /// Send a POST request with an urlencoded form body.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");

        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("valid request");
        self.send(request).await
    }

    /// Whether the storefront has handed this shopper a session cookie.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        // Keep only the name=value pair, like a browser sending it back
        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("body fits in memory");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
