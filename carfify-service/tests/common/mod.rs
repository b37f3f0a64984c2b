#![allow(dead_code)]

use axum::{body::Body, http::Request, response::Response, Router};
use carfify_service::config::CarfifyConfig;
use carfify_service::services::{init_metrics, DiagnosisEngine};
use carfify_service::{build_router, AppState, Application};
use std::sync::{Arc, Once};

static METRICS: Once = Once::new();

pub const TEST_ORIGIN: &str = "https://app.carfify.test";

pub fn test_config(port: u16) -> CarfifyConfig {
    CarfifyConfig::with_origin(port, TEST_ORIGIN)
}

/// Router wired exactly like the binary, for `oneshot` tests.
pub fn test_router() -> Router {
    let state = AppState::new(test_config(0), Arc::new(DiagnosisEngine::default()));
    build_router(state)
}

/// Install the Prometheus recorder once per test binary.
pub fn ensure_metrics_initialized() {
    METRICS.call_once(init_metrics);
}

pub fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let app = Application::build(test_config(0))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}
