//! Integration tests for Campus Eats.
//!
//! The storefront router is built exactly as the binary builds it, but over
//! the in-memory repositories, the bundled catalog and the memory session
//! store, and driven in-process with `tower::ServiceExt::oneshot`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p campus-eats-integration-tests
//! ```

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use campus_eats_storefront::build_router;
use campus_eats_storefront::config::StorefrontConfig;
use campus_eats_storefront::db::MemoryCatalogRepository;
use campus_eats_storefront::state::AppState;

/// A storefront instance with a one-cookie browser.
///
/// Every response's `Set-Cookie` for the session is remembered and sent
/// with the next request, so a `TestApp` behaves like a single visitor.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// A fresh storefront with the bundled catalog and no accounts.
    ///
    /// # Panics
    ///
    /// Panics if the bundled catalog is invalid.
    #[must_use]
    pub fn new() -> Self {
        let catalog = MemoryCatalogRepository::bundled().expect("bundled catalog is valid");
        let state = AppState::in_memory(StorefrontConfig::local(), catalog);
        Self {
            router: build_router(state, MemoryStore::default()),
            cookie: None,
        }
    }

    /// A second visitor on the same server (same stores, no cookie).
    #[must_use]
    pub fn new_visitor(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty());
        self.send(request.expect("valid request")).await
    }

    /// POST an `application/x-www-form-urlencoded` body. Keys may repeat.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body));
        self.send(request.expect("valid request")).await
    }

    pub async fn post_json(&mut self, uri: &str, body: &serde_json::Value) -> TestResponse {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()));
        self.send(request.expect("valid request")).await
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

        let status = response.status();
        let headers = response.headers().clone();
        self.remember_cookie(&headers);

        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn remember_cookie(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else {
                continue;
            };
            let pair = value.split(';').next().unwrap_or_default().trim();
            match pair.split_once('=') {
                Some((_, "")) | None => self.cookie = None,
                Some(_) => self.cookie = Some(pair.to_owned()),
            }
        }
    }
}
