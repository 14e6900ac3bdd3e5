//! Shared helpers for agent API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use agentmgt_api_agents::{agents_router, AgentsState};
use agentmgt_auth::{
    encode_hs256, AccessClaims, AccessGate, JwtAccessGate, Scope, ValidationConfig,
    VerificationKey,
};
use agentmgt_store::{AgentStore, CredentialStore};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"agentmgt-integration-test-secret-0123456789";

pub fn test_gate() -> Arc<dyn AccessGate> {
    Arc::new(
        JwtAccessGate::new(
            VerificationKey::Hs256(TEST_SECRET.to_vec()),
            ValidationConfig::default(),
        )
        .expect("gate"),
    )
}

/// Router over fresh in-memory stores.
pub fn test_app() -> Router {
    agents_router(AgentsState::in_memory(test_gate()))
}

/// Router over caller-supplied stores.
pub fn test_app_with_stores(agents: Arc<AgentStore>, credentials: Arc<CredentialStore>) -> Router {
    agents_router(AgentsState::new(test_gate(), agents, credentials))
}

pub fn token_with(scopes: &[Scope]) -> String {
    let claims = AccessClaims::builder()
        .subject("integration-test")
        .scopes(scopes.iter().copied())
        .expires_in_secs(300)
        .build();
    encode_hs256(&claims, TEST_SECRET).expect("encode token")
}

/// Token holding every agent management scope.
pub fn admin_token() -> String {
    token_with(&Scope::ALL)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse { status, body }
}

pub fn agent_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{name} description"),
        "version": "1.0",
    })
}

/// Create an agent and return its id.
pub async fn create_agent(app: &Router, name: &str) -> String {
    let response = send(
        app,
        Method::POST,
        "/agents",
        Some(&admin_token()),
        Some(agent_body(name)),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["id"].as_str().unwrap().to_string()
}

/// Create a credential and return its id.
pub async fn create_credential(
    app: &Router,
    agent_id: &str,
    credential_type: &str,
    details: Value,
) -> String {
    let response = send(
        app,
        Method::POST,
        &format!("/agents/{agent_id}/credentials"),
        Some(&admin_token()),
        Some(json!({"credentialType": credential_type, "credentialDetails": details})),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["credentialId"].as_str().unwrap().to_string()
}

/// Assert a failure payload has the given code and a well-formed trace id.
pub fn assert_error(response: &TestResponse, status: StatusCode, code: &str) {
    assert_eq!(response.status, status, "body: {}", response.body);
    assert_eq!(response.body["code"], code);
    assert!(response.body["message"].is_string());
    assert!(response.body["description"].is_string());
    let trace_id = response.body["traceId"].as_str().expect("traceId");
    assert!(uuid::Uuid::parse_str(trace_id).is_ok());
}
