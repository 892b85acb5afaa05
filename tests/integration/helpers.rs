//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use certmatch_api::{AppState, build_app};
use certmatch_core::config::{AppConfig, DatabaseProvider};
use certmatch_database::{MemoryStore, Stores};
use certmatch_entity::user::{CreateUser, UserRole};

/// Password accepted by the default policy.
pub const PASSWORD: &str = "audit2025";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Stores behind the router, for direct setup
    pub stores: Stores,
}

/// Captured response
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        Self::with_stores(Stores::memory(MemoryStore::new()))
    }

    /// Create a test application over the given stores
    pub fn with_stores(stores: Stores) -> Self {
        let mut config = AppConfig::default();
        config.database.provider = DatabaseProvider::Memory;

        let router = build_app(AppState::new(config, stores.clone()));
        Self { router, stores }
    }

    /// Send a request, optionally acting as a user
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        actor: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(actor) = actor {
            req = req.header("x-user-id", actor);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Register a user through the API and return its id
    pub async fn register(&self, email: &str, role: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/users",
                Some(json!({
                    "email": email,
                    "password": PASSWORD,
                    "name": email.split('@').next().unwrap_or(email),
                    "role": role,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        id_of(response.data())
    }

    /// Insert an administrator directly into the store
    pub async fn admin(&self) -> String {
        let user = self
            .stores
            .users
            .create(&CreateUser {
                email: "admin@certmatch.test".to_string(),
                password_hash: "unused".to_string(),
                name: "Admin".to_string(),
                phone: None,
                role: UserRole::User,
                is_admin: true,
            })
            .await
            .expect("Failed to create admin");
        user.id.to_string()
    }

    /// Register a company-role user with a company; returns (owner, company)
    pub async fn company(
        &self,
        email: &str,
        name: &str,
        industry: &str,
        size: &str,
        address: &str,
    ) -> (String, String) {
        let owner = self.register(email, "company").await;
        let response = self
            .request(
                "POST",
                "/api/companies",
                Some(json!({
                    "name": name,
                    "industry": industry,
                    "size": size,
                    "address": address,
                })),
                Some(&owner),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        let company = id_of(response.data());
        (owner, company)
    }

    /// Names of the companies returned by a search query string
    pub async fn search_names(&self, query: &str) -> Vec<String> {
        let response = self
            .request("GET", &format!("/api/companies{query}"), None, None)
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response
            .data()
            .as_array()
            .expect("search returns an array")
            .iter()
            .map(|c| c["name"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

/// The `id` field of a JSON object as a string
pub fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("object has an id").to_string()
}
