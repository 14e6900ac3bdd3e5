//! Integration tests for agent management endpoints.

mod common;

use std::collections::HashSet;

use agentmgt_auth::Scope;
use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_create_agent_returns_record() {
    let app = test_app();
    let response = send(
        &app,
        Method::POST,
        "/agents",
        Some(&admin_token()),
        Some(json!({"name": "billing-bot", "description": "handles billing", "version": "1.0"})),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let agent = &response.body;
    assert!(uuid::Uuid::parse_str(agent["id"].as_str().unwrap()).is_ok());
    assert_eq!(agent["name"], "billing-bot");
    assert_eq!(agent["description"], "handles billing");
    assert_eq!(agent["version"], "1.0");
    assert!(agent["url"].is_null());
    assert!(agent["owner"].is_null());
    assert_eq!(agent["createdAt"], agent["updatedAt"]);
}

#[tokio::test]
async fn test_create_agent_missing_version_is_invalid_input() {
    let app = test_app();
    let response = send(
        &app,
        Method::POST,
        "/agents",
        Some(&admin_token()),
        Some(json!({"name": "x", "description": "y"})),
    )
    .await;

    assert_error(&response, StatusCode::BAD_REQUEST, "AGT-60001");
    assert_eq!(response.body["message"], "Invalid Input.");

    let list = send(&app, Method::GET, "/agents", Some(&admin_token()), None).await;
    assert_eq!(list.body, json!([]));
}

#[tokio::test]
async fn test_create_agent_malformed_json_is_invalid_input() {
    let app = test_app();
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/agents")
        .header("authorization", format!("Bearer {}", admin_token()))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"name\": "))
        .unwrap();

    let response = send_request(&app, request).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "AGT-60001");
}

#[tokio::test]
async fn test_get_agent_is_idempotent() {
    let app = test_app();
    let id = create_agent(&app, "reader").await;
    let uri = format!("/agents/{id}");

    let first = send(&app, Method::GET, &uri, Some(&admin_token()), None).await;
    let second = send(&app, Method::GET, &uri, Some(&admin_token()), None).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn test_get_unknown_agent_is_not_found() {
    let app = test_app();
    let response = send(
        &app,
        Method::GET,
        "/agents/nonexistent-id",
        Some(&admin_token()),
        None,
    )
    .await;

    assert_error(&response, StatusCode::NOT_FOUND, "AGT-70001");
    assert_eq!(
        response.body["description"],
        "The agent with the specified ID 'nonexistent-id' does not exist."
    );
}

#[tokio::test]
async fn test_undecodable_path_is_invalid_input() {
    let app = test_app();
    for (method, uri) in [
        (Method::GET, "/agents/%FF"),
        (Method::DELETE, "/agents/%FF"),
        (Method::GET, "/agents/%FF/credentials/%FE"),
    ] {
        let response = send(&app, method, uri, Some(&admin_token()), None).await;
        assert_error(&response, StatusCode::BAD_REQUEST, "AGT-60001");
        assert_eq!(
            response.body["description"],
            "The request path could not be decoded."
        );
    }
}

#[tokio::test]
async fn test_list_returns_agents_in_creation_order() {
    let app = test_app();
    let mut created = Vec::new();
    for name in ["a", "b", "c"] {
        created.push(create_agent(&app, name).await);
    }

    let response = send(&app, Method::GET, "/agents", Some(&admin_token()), None).await;
    assert_eq!(response.status, StatusCode::OK);

    let agents = response.body.as_array().unwrap();
    assert_eq!(agents.len(), 3);
    let listed: HashSet<_> = agents
        .iter()
        .map(|a| a["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(listed, created.into_iter().collect());

    let stamps: Vec<_> = agents
        .iter()
        .map(|a| a["createdAt"].as_str().unwrap().to_string())
        .collect();
    let parsed: Vec<chrono::DateTime<chrono::Utc>> =
        stamps.iter().map(|s| s.parse().unwrap()).collect();
    assert!(parsed.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_created_ids_are_distinct() {
    let app = test_app();
    let mut ids = HashSet::new();
    for i in 0..20 {
        assert!(ids.insert(create_agent(&app, &format!("agent-{i}")).await));
    }
}

#[tokio::test]
async fn test_update_merges_fields() {
    let app = test_app();
    let id = create_agent(&app, "before").await;
    let uri = format!("/agents/{id}");
    let original = send(&app, Method::GET, &uri, Some(&admin_token()), None).await;

    let response = send(
        &app,
        Method::PUT,
        &uri,
        Some(&admin_token()),
        Some(json!({"name": "after", "url": "https://agent.example", "id": "ignored"})),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], id);
    assert_eq!(response.body["name"], "after");
    assert_eq!(response.body["url"], "https://agent.example");
    assert_eq!(response.body["version"], original.body["version"]);
    assert_eq!(response.body["createdAt"], original.body["createdAt"]);

    let before: chrono::DateTime<chrono::Utc> =
        original.body["updatedAt"].as_str().unwrap().parse().unwrap();
    let after: chrono::DateTime<chrono::Utc> =
        response.body["updatedAt"].as_str().unwrap().parse().unwrap();
    assert!(after >= before);
}

#[tokio::test]
async fn test_update_accepts_values_of_any_type() {
    let app = test_app();
    let id = create_agent(&app, "loose").await;
    let uri = format!("/agents/{id}");

    let response = send(
        &app,
        Method::PUT,
        &uri,
        Some(&admin_token()),
        Some(json!({"name": 5})),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "5");

    let response = send(
        &app,
        Method::PUT,
        &uri,
        Some(&admin_token()),
        Some(json!({"version": null})),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["version"], "1.0");
}

#[tokio::test]
async fn test_update_merges_unknown_attributes() {
    let app = test_app();
    let id = create_agent(&app, "painted").await;
    let uri = format!("/agents/{id}");

    let response = send(
        &app,
        Method::PUT,
        &uri,
        Some(&admin_token()),
        Some(json!({"color": "blue"})),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["color"], "blue");
    assert_eq!(response.body["name"], "painted");

    let fetched = send(&app, Method::GET, &uri, Some(&admin_token()), None).await;
    assert_eq!(fetched.body["color"], "blue");
}

#[tokio::test]
async fn test_update_with_empty_payload_is_invalid_input() {
    let app = test_app();
    let id = create_agent(&app, "stable").await;
    let uri = format!("/agents/{id}");
    let original = send(&app, Method::GET, &uri, Some(&admin_token()), None).await;

    let response = send(&app, Method::PUT, &uri, Some(&admin_token()), Some(json!({}))).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "AGT-60001");
    assert_eq!(
        response.body["description"],
        "At least one field must be provided for update."
    );

    let unchanged = send(&app, Method::GET, &uri, Some(&admin_token()), None).await;
    assert_eq!(unchanged.body, original.body);
}

#[tokio::test]
async fn test_update_unknown_agent_is_not_found() {
    let app = test_app();
    let response = send(
        &app,
        Method::PUT,
        &format!("/agents/{}", uuid::Uuid::new_v4()),
        Some(&admin_token()),
        Some(json!({"name": "x"})),
    )
    .await;

    assert_error(&response, StatusCode::NOT_FOUND, "AGT-70001");
}

#[tokio::test]
async fn test_delete_agent() {
    let app = test_app();
    let id = create_agent(&app, "doomed").await;
    let uri = format!("/agents/{id}");

    let response = send(&app, Method::DELETE, &uri, Some(&admin_token()), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_null());

    let response = send(&app, Method::GET, &uri, Some(&admin_token()), None).await;
    assert_error(&response, StatusCode::NOT_FOUND, "AGT-70001");

    let response = send(&app, Method::DELETE, &uri, Some(&admin_token()), None).await;
    assert_error(&response, StatusCode::NOT_FOUND, "AGT-70001");
}

// ============================================================================
// Access control
// ============================================================================

#[tokio::test]
async fn test_missing_token_is_authentication_failure() {
    let app = test_app();
    let response = send(&app, Method::GET, "/agents", None, None).await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "AGT-90001");
    assert_eq!(response.body["message"], "Authentication Failure.");
}

#[tokio::test]
async fn test_garbage_token_is_authentication_failure() {
    let app = test_app();
    let response = send(&app, Method::GET, "/agents", Some("not-a-jwt"), None).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "AGT-90001");
}

#[tokio::test]
async fn test_each_operation_requires_its_scope() {
    let app = test_app();
    let id = create_agent(&app, "scoped").await;
    let agent_uri = format!("/agents/{id}");

    let cases = [
        (Method::GET, "/agents".to_string(), None, Scope::AgentRead),
        (Method::POST, "/agents".to_string(), Some(agent_body("n")), Scope::AgentCreate),
        (Method::GET, agent_uri.clone(), None, Scope::AgentRead),
        (Method::PUT, agent_uri.clone(), Some(json!({"name": "n"})), Scope::AgentUpdate),
        (Method::DELETE, agent_uri.clone(), None, Scope::AgentDelete),
    ];

    for (method, uri, body, required) in cases {
        let others: Vec<Scope> = Scope::ALL.into_iter().filter(|s| *s != required).collect();
        let response = send(&app, method.clone(), &uri, Some(&token_with(&others)), body).await;
        assert_error(&response, StatusCode::UNAUTHORIZED, "AGT-90001");
    }

    // Nothing was mutated by the rejected calls.
    let response = send(&app, Method::GET, &agent_uri, Some(&admin_token()), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "scoped");
}

#[tokio::test]
async fn test_auth_is_checked_before_body_parsing() {
    let app = test_app();
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/agents")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("not json"))
        .unwrap();

    let response = send_request(&app, request).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "AGT-90001");
}

#[tokio::test]
async fn test_create_without_scope_has_no_side_effect() {
    let app = test_app();
    let response = send(
        &app,
        Method::POST,
        "/agents",
        Some(&token_with(&[Scope::AgentRead])),
        Some(agent_body("sneaky")),
    )
    .await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "AGT-90001");

    let list = send(&app, Method::GET, "/agents", Some(&admin_token()), None).await;
    assert_eq!(list.body, json!([]));
}

#[tokio::test]
async fn test_trace_ids_are_fresh_per_failure() {
    let app = test_app();
    let mut seen = HashSet::new();
    for _ in 0..5 {
        let response = send(&app, Method::GET, "/agents/missing", Some(&admin_token()), None).await;
        assert!(seen.insert(response.body["traceId"].as_str().unwrap().to_string()));
    }
}
