//! Shared helpers for the API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use api_lib::adapters::SimulatedScriptAdapter;
use api_lib::config::Config;
use api_lib::web::{app_router, state::AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use script_studio_core::ports::{PortError, PortResult, ScriptGenerationService};
use script_studio_core::template::{compose_script, HOOKS};
use script_studio_core::{Plan, Script};
use tokio::sync::Notify;
use tower::ServiceExt;

/// A config for a session starting at `plan` with `scripts_generated`
/// already used, and no simulated latency.
pub fn test_config(plan: Plan, scripts_generated: u32) -> Config {
    Config {
        generation_delay: Duration::ZERO,
        initial_plan: plan,
        initial_scripts_generated: scripts_generated,
        ..Config::default()
    }
}

/// Shared state backed by the simulated generator with zero delay.
pub fn test_state(plan: Plan, scripts_generated: u32) -> Arc<AppState> {
    let config = Arc::new(test_config(plan, scripts_generated));
    let generator = Arc::new(SimulatedScriptAdapter::new(config.generation_delay));
    Arc::new(AppState::new(config, generator))
}

/// Shared state backed by a caller-supplied generator.
pub fn test_state_with(
    plan: Plan,
    scripts_generated: u32,
    generator: Arc<dyn ScriptGenerationService>,
) -> Arc<AppState> {
    Arc::new(AppState::new(
        Arc::new(test_config(plan, scripts_generated)),
        generator,
    ))
}

pub fn build_test_app(state: Arc<AppState>) -> Router {
    app_router(state)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

/// Posts to `uri` with no body and no content type.
pub async fn post_empty(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Posts a single-file multipart form to `uri`.
pub async fn post_file(
    app: &Router,
    uri: &str,
    file_name: &str,
    content_type: &str,
) -> Response<Body> {
    let boundary = "studio-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"video\"; filename=\"{file_name}\"\r\n\
         Content-Type: {content_type}\r\n\
         \r\n\
         not really a video\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A generator that holds every request until [`GatedGenerator::release`]
/// is called, so tests can observe the pending state.
#[derive(Default)]
pub struct GatedGenerator {
    gate: Notify,
}

impl GatedGenerator {
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl ScriptGenerationService for GatedGenerator {
    async fn generate_script(&self, topic: &str) -> PortResult<Script> {
        self.gate.notified().await;
        Ok(compose_script(topic, HOOKS[0], HOOKS[1], &Utc::now()))
    }
}

/// A generator that always fails.
pub struct FailingGenerator;

#[async_trait]
impl ScriptGenerationService for FailingGenerator {
    async fn generate_script(&self, _topic: &str) -> PortResult<Script> {
        Err(PortError::Unexpected("model unavailable".to_string()))
    }
}

/// Polls `GET /session` until its status equals `status`.
pub async fn wait_for_status(app: &Router, status: &str) {
    for _ in 0..200 {
        let json = body_json(get(app, "/session").await).await;
        if json["status"] == status {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("session never reached status '{}'", status);
}
