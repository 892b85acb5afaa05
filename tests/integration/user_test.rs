//! Integration tests for user accounts and actor resolution.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_register_returns_credential_free_user() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({
                "email": "kim@example.com",
                "password": PASSWORD,
                "name": "Kim",
                "phone": "010-1234-5678",
                "role": "expert",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["role"], "expert");
    assert_eq!(response.data()["is_admin"], false);
    assert!(response.data().get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.register("kim@example.com", "user").await;

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({
                "email": "KIM@example.com",
                "password": PASSWORD,
                "name": "Kim",
                "role": "user",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_weak_password_and_bad_body() {
    let app = TestApp::new();

    let weak = app
        .request(
            "POST",
            "/api/users",
            Some(json!({
                "email": "kim@example.com",
                "password": "short",
                "name": "Kim",
                "role": "user",
            })),
            None,
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);
    assert_eq!(weak.body["error"], "VALIDATION_ERROR");

    let unknown_role = app
        .request(
            "POST",
            "/api/users",
            Some(json!({
                "email": "kim@example.com",
                "password": PASSWORD,
                "name": "Kim",
                "role": "superuser",
            })),
            None,
        )
        .await;
    assert_eq!(unknown_role.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters_by_role() {
    let app = TestApp::new();
    app.register("e1@x.io", "expert").await;
    app.register("e2@x.io", "expert").await;
    app.register("c1@x.io", "company").await;

    let response = app
        .request("GET", "/api/users?role=expert&per_page=10", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["total"], 2);
    assert_eq!(response.data()["per_page"], 10);
    assert_eq!(response.data()["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_profile_update_is_self_or_admin() {
    let app = TestApp::new();
    let me = app.register("me@x.io", "user").await;
    let other = app.register("other@x.io", "user").await;
    let path = format!("/api/users/{me}");

    let denied = app
        .request("PUT", &path, Some(json!({ "name": "Hacker" })), Some(&other))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let ok = app
        .request("PUT", &path, Some(json!({ "name": "Me Again" })), Some(&me))
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.data()["name"], "Me Again");
}

#[tokio::test]
async fn test_actor_header_problems_are_unauthorized() {
    let app = TestApp::new();
    let me = app.register("me@x.io", "user").await;
    let path = format!("/api/users/{me}");
    let body = Some(json!({ "name": "X" }));

    let missing = app.request("PUT", &path, body.clone(), None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let malformed = app
        .request("PUT", &path, body.clone(), Some("not-a-uuid"))
        .await;
    assert_eq!(malformed.status, StatusCode::UNAUTHORIZED);

    let unknown = app
        .request(
            "PUT",
            &path,
            body,
            Some("0190a5b2-0000-7000-8000-000000000000"),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_delete_user_cascades_company() {
    let app = TestApp::new();
    let (owner, company) = app
        .company("owner@x.io", "Acme", "IT", "SMALL", "Seoul")
        .await;

    let deleted = app
        .request("DELETE", &format!("/api/users/{owner}"), None, Some(&owner))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let user = app
        .request("GET", &format!("/api/users/{owner}"), None, None)
        .await;
    assert_eq!(user.status, StatusCode::NOT_FOUND);

    let company = app
        .request("GET", &format!("/api/companies/{company}"), None, None)
        .await;
    assert_eq!(company.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_query_string_uses_error_envelope() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/users?page=abc", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["message"].is_string());

    let response = app.request("GET", "/api/users?role=wizard", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

