//! Integration tests for the company search endpoint.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;

use certmatch_core::error::{AppError, ErrorKind};
use certmatch_core::result::AppResult;
use certmatch_core::types::{CompanyId, UserId};
use certmatch_database::store::CompanyStore;
use certmatch_database::{MemoryStore, Stores};
use certmatch_entity::company::{
    Company, CompanyPredicate, CompanyWithOwner, CreateCompany, UpdateCompany,
};

use helpers::TestApp;

async fn seeded() -> TestApp {
    let app = TestApp::new();
    app.company("b@x.io", "Beta Works", "Manufacturing", "LARGE", "Busan Haeundae")
        .await;
    app.company("a@x.io", "Alpha Soft", "IT Services", "SMALL", "Seoul Gangnam")
        .await;
    app.company("c@x.io", "Cobalt", "IT", "SMALL_BUSINESS", "seoul mapo")
        .await;
    app
}

#[tokio::test]
async fn test_no_criteria_lists_everything_by_name() {
    let app = seeded().await;
    assert_eq!(
        app.search_names("").await,
        vec!["Alpha Soft", "Beta Works", "Cobalt"]
    );
}

#[tokio::test]
async fn test_insertion_order_does_not_leak() {
    let app = TestApp::new();
    app.company("b@x.io", "B", "IT", "SMALL", "Seoul").await;
    app.company("a@x.io", "A", "IT", "SMALL", "Seoul").await;
    assert_eq!(app.search_names("").await, vec!["A", "B"]);
}

#[tokio::test]
async fn test_industry_is_case_insensitive_substring() {
    let app = seeded().await;
    assert_eq!(
        app.search_names("?industry=it").await,
        vec!["Alpha Soft", "Cobalt"]
    );
}

#[tokio::test]
async fn test_size_is_exact() {
    let app = seeded().await;
    assert_eq!(app.search_names("?size=SMALL").await, vec!["Alpha Soft"]);
    assert!(app.search_names("?size=small").await.is_empty());
}

#[tokio::test]
async fn test_location_matches_address() {
    let app = seeded().await;
    assert_eq!(
        app.search_names("?location=SEOUL").await,
        vec!["Alpha Soft", "Cobalt"]
    );
}

#[tokio::test]
async fn test_criteria_are_combined() {
    let app = seeded().await;
    assert_eq!(
        app.search_names("?industry=it&location=seoul&size=SMALL_BUSINESS")
            .await,
        vec!["Cobalt"]
    );
}

#[tokio::test]
async fn test_non_ascii_industry() {
    let app = TestApp::new();
    app.company("b@x.io", "B", "제조", "SMALL", "Ulsan").await;
    app.company("a@x.io", "A", "금융업", "SMALL", "Seoul").await;

    // industry=금융
    assert_eq!(
        app.search_names("?industry=%EA%B8%88%EC%9C%B5").await,
        vec!["A"]
    );
}

#[tokio::test]
async fn test_blank_criteria_are_ignored() {
    let app = seeded().await;
    assert_eq!(app.search_names("?industry=&size=%20").await.len(), 3);
}

#[tokio::test]
async fn test_no_match_is_empty_array() {
    let app = seeded().await;
    let response = app
        .request("GET", "/api/companies?industry=aerospace", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data(), &serde_json::json!([]));
}

#[tokio::test]
async fn test_wildcards_are_literal() {
    let app = TestApp::new();
    app.company("a@x.io", "Percent", "100% Organic", "SMALL", "Seoul")
        .await;
    app.company("b@x.io", "Plain", "Organic", "SMALL", "Seoul").await;

    // industry=%
    assert_eq!(app.search_names("?industry=%25").await, vec!["Percent"]);
}

#[tokio::test]
async fn test_results_include_owner_summary() {
    let app = seeded().await;
    let response = app
        .request("GET", "/api/companies?size=SMALL", None, None)
        .await;
    let company = &response.data()[0];

    assert_eq!(company["name"], "Alpha Soft");
    assert_eq!(company["user"]["email"], "a@x.io");
    assert!(company["user"].get("password_hash").is_none());
    assert!(company["user"].get("phone").is_some());
}

#[tokio::test]
async fn test_search_is_repeatable_and_sound() {
    let app = seeded().await;
    let query = "/api/companies?industry=i&location=s";

    let first = app.request("GET", query, None, None).await;
    let second = app.request("GET", query, None, None).await;
    assert_eq!(first.body, second.body);

    for company in first.data().as_array().unwrap() {
        let industry = company["industry"].as_str().unwrap().to_lowercase();
        let address = company["address"].as_str().unwrap().to_lowercase();
        assert!(industry.contains('i'));
        assert!(address.contains('s'));
    }
}

#[tokio::test]
async fn test_repeated_parameter_keeps_first_value() {
    let app = seeded().await;
    assert_eq!(
        app.search_names("?industry=it&industry=manufacturing").await,
        vec!["Alpha Soft", "Cobalt"]
    );
}

#[tokio::test]
async fn test_unknown_parameter_is_ignored() {
    let app = seeded().await;
    assert_eq!(
        app.search_names("?sort=desc&size=SMALL").await,
        vec!["Alpha Soft"]
    );
    assert_eq!(
        app.search_names("?page=abc").await,
        vec!["Alpha Soft", "Beta Works", "Cobalt"]
    );
}

/// Company store whose database has gone away.
#[derive(Debug)]
struct UnreachableCompanies;

fn connection_lost() -> AppError {
    AppError::with_source(
        ErrorKind::Database,
        "Failed to search companies",
        std::io::Error::other("connection reset by peer"),
    )
}

#[async_trait]
impl CompanyStore for UnreachableCompanies {
    async fn create(&self, _: &CreateCompany) -> AppResult<Company> {
        Err(connection_lost())
    }
    async fn find_by_id(&self, _: CompanyId) -> AppResult<Option<CompanyWithOwner>> {
        Err(connection_lost())
    }
    async fn find_by_user(&self, _: UserId) -> AppResult<Option<Company>> {
        Err(connection_lost())
    }
    async fn update(&self, _: CompanyId, _: &UpdateCompany) -> AppResult<Company> {
        Err(connection_lost())
    }
    async fn delete(&self, _: CompanyId) -> AppResult<bool> {
        Err(connection_lost())
    }
    async fn find_many(&self, _: &CompanyPredicate) -> AppResult<Vec<CompanyWithOwner>> {
        Err(connection_lost())
    }
}

#[tokio::test]
async fn test_store_failure_is_query_failed_not_empty() {
    let mut stores = Stores::memory(MemoryStore::new());
    stores.companies = Arc::new(UnreachableCompanies);
    let app = TestApp::with_stores(stores);

    let response = app
        .request("GET", "/api/companies?industry=it", None, None)
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "QUERY_FAILED");
    assert!(response.body.get("data").is_none());
}

