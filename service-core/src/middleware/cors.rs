//! Single-origin CORS.
//!
//! The configured frontend origin is echoed back only when the request's
//! `Origin` header matches it byte for byte. Every `OPTIONS` request is
//! answered here with `204 No Content` and never reaches a handler.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

#[derive(Debug, Clone)]
pub struct CorsConfig {
    allowed_origin: String,
}

impl CorsConfig {
    pub fn new(allowed_origin: impl Into<String>) -> Self {
        Self {
            allowed_origin: allowed_origin.into(),
        }
    }

    pub fn allowed_origin(&self) -> &str {
        &self.allowed_origin
    }

    fn matches(&self, origin: Option<&HeaderValue>) -> bool {
        origin
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value == self.allowed_origin)
    }
}

pub async fn cors_middleware(
    State(config): State<CorsConfig>,
    req: Request,
    next: Next,
) -> Response {
    let origin_allowed = config.matches(req.headers().get(header::ORIGIN));

    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();

    if origin_allowed && let Ok(value) = HeaderValue::from_str(config.allowed_origin()) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.append(header::VARY, HeaderValue::from_static("Origin"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );

    response
}
