//! Test helper utilities for webserver integration tests

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use webserver::core::{AnalyticsEngine, Presenter};
use webserver::{EntityStore, MemoryStore, Repository, WebServerState, build_router};

/// Router over a fresh in-memory store
pub fn test_router() -> Router {
    router_with_store(Arc::new(MemoryStore::new()))
}

pub fn router_with_store(store: Arc<dyn EntityStore>) -> Router {
    let state = WebServerState::new(Repository::new(store), AnalyticsEngine::new(), Presenter::default());
    build_router(Arc::new(state))
}

/// Send one request and decode the JSON response (`Null` for empty bodies)
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    send_request(router, request).await
}

pub async fn send_raw(router: &Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send_request(router, request).await
}

async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::GET, uri, None).await
}

pub async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, Method::POST, uri, Some(body)).await
}

pub async fn put(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, Method::PUT, uri, Some(body)).await
}

pub async fn delete(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::DELETE, uri, None).await
}

/// POST and return the created record's id, asserting 201
pub async fn create_id(router: &Router, uri: &str, body: Value) -> String {
    let (status, json) = post(router, uri, body).await;
    assert_eq!(status, StatusCode::CREATED, "create {uri} failed: {json}");
    json["id"].as_str().unwrap().to_string()
}
