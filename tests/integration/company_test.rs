//! Integration tests for company profile management.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, id_of};

fn acme() -> serde_json::Value {
    json!({
        "name": "Acme",
        "industry": "IT",
        "size": "SMALL",
        "address": "Seoul",
    })
}

#[tokio::test]
async fn test_create_requires_actor() {
    let app = TestApp::new();
    let response = app.request("POST", "/api/companies", Some(acme()), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_create_requires_company_role() {
    let app = TestApp::new();
    let expert = app.register("expert@x.io", "expert").await;

    let response = app
        .request("POST", "/api/companies", Some(acme()), Some(&expert))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_one_company_per_user() {
    let app = TestApp::new();
    let owner = app.register("owner@x.io", "company").await;

    let first = app
        .request("POST", "/api/companies", Some(acme()), Some(&owner))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.data()["user_id"], owner.as_str());

    let second = app
        .request("POST", "/api/companies", Some(acme()), Some(&owner))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let app = TestApp::new();
    let owner = app.register("owner@x.io", "company").await;

    let mut body = acme();
    body["name"] = json!("");
    let response = app
        .request("POST", "/api/companies", Some(body), Some(&owner))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_includes_owner() {
    let app = TestApp::new();
    let (owner, company) = app
        .company("owner@x.io", "Acme", "IT", "SMALL", "Seoul")
        .await;

    let response = app
        .request("GET", &format!("/api/companies/{company}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Acme");
    assert_eq!(response.data()["user"]["id"], owner.as_str());
}

#[tokio::test]
async fn test_get_unknown_and_malformed_ids() {
    let app = TestApp::new();

    let missing = app
        .request(
            "GET",
            "/api/companies/0190a5b2-0000-7000-8000-000000000000",
            None,
            None,
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request("GET", "/api/companies/not-a-uuid", None, None)
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_by_owner_and_stranger() {
    let app = TestApp::new();
    let (owner, company) = app
        .company("owner@x.io", "Acme", "IT", "SMALL", "Seoul")
        .await;
    let stranger = app.register("other@x.io", "company").await;
    let path = format!("/api/companies/{company}");

    let denied = app
        .request("PUT", &path, Some(json!({ "size": "LARGE" })), Some(&stranger))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let updated = app
        .request("PUT", &path, Some(json!({ "size": "LARGE" })), Some(&owner))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["size"], "LARGE");
    assert_eq!(updated.data()["name"], "Acme");

    let empty = app.request("PUT", &path, Some(json!({})), Some(&owner)).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_can_delete_any_company() {
    let app = TestApp::new();
    let (_, company) = app
        .company("owner@x.io", "Acme", "IT", "SMALL", "Seoul")
        .await;
    let admin = app.admin().await;
    let path = format!("/api/companies/{company}");

    let response = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);

    let gone = app.request("GET", &path, None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert!(app.search_names("").await.is_empty());
}

#[tokio::test]
async fn test_owner_can_register_again_after_delete() {
    let app = TestApp::new();
    let (owner, company) = app
        .company("owner@x.io", "Acme", "IT", "SMALL", "Seoul")
        .await;

    app.request(
        "DELETE",
        &format!("/api/companies/{company}"),
        None,
        Some(&owner),
    )
    .await;

    let again = app
        .request("POST", "/api/companies", Some(acme()), Some(&owner))
        .await;
    assert_eq!(again.status, StatusCode::CREATED);
    assert_ne!(id_of(again.data()), company);
}
