//! Integration tests for the application → schedule → contract flow.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

use helpers::{TestApp, id_of};

struct Market {
    app: TestApp,
    owner: String,
    company: String,
    expert: String,
    other_expert: String,
}

async fn market() -> Market {
    let app = TestApp::new();
    let (owner, company) = app
        .company("owner@acme.io", "Acme", "IT", "SMALL", "Seoul")
        .await;
    let expert = app.register("expert@x.io", "expert").await;
    let other_expert = app.register("other@x.io", "expert").await;
    Market {
        app,
        owner,
        company,
        expert,
        other_expert,
    }
}

impl Market {
    async fn apply(&self) -> String {
        let response = self
            .app
            .request(
                "POST",
                "/api/applications",
                Some(json!({
                    "company_id": self.company,
                    "expert_id": self.expert,
                    "certification": "ISO 27001",
                    "message": "Audit next quarter",
                })),
                Some(&self.owner),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        assert_eq!(response.data()["status"], "pending");
        id_of(response.data())
    }

    async fn set_status(&self, kind: &str, id: &str, status: &str, actor: &str) -> StatusCode {
        self.app
            .request(
                "PUT",
                &format!("/api/{kind}/{id}/status"),
                Some(json!({ "status": status })),
                Some(actor),
            )
            .await
            .status
    }

    async fn accepted(&self) -> String {
        let application = self.apply().await;
        let status = self
            .set_status("applications", &application, "accepted", &self.expert)
            .await;
        assert_eq!(status, StatusCode::OK);
        application
    }
}

fn contract_body(application: &str, amount: i64) -> Value {
    json!({
        "application_id": application,
        "amount": amount,
        "start_date": "2025-03-01",
        "end_date": "2025-03-31",
    })
}

#[tokio::test]
async fn test_only_owner_applies_to_real_experts() {
    let m = market().await;

    let stranger = m
        .app
        .request(
            "POST",
            "/api/applications",
            Some(json!({
                "company_id": m.company,
                "expert_id": m.expert,
                "certification": "ISO 9001",
            })),
            Some(&m.other_expert),
        )
        .await;
    assert_eq!(stranger.status, StatusCode::FORBIDDEN);

    let plain = m.app.register("plain@x.io", "user").await;
    let not_expert = m
        .app
        .request(
            "POST",
            "/api/applications",
            Some(json!({
                "company_id": m.company,
                "expert_id": plain,
                "certification": "ISO 9001",
            })),
            Some(&m.owner),
        )
        .await;
    assert_eq!(not_expert.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_listing_is_scoped_to_the_actor() {
    let m = market().await;
    m.apply().await;

    let count = |actor: String| {
        let app = &m.app;
        async move {
            let response = app.request("GET", "/api/applications", None, Some(&actor)).await;
            (response.status, response.data()["total"].clone())
        }
    };

    assert_eq!(count(m.owner.clone()).await, (StatusCode::OK, json!(1)));
    assert_eq!(count(m.expert.clone()).await, (StatusCode::OK, json!(1)));
    assert_eq!(count(m.other_expert.clone()).await, (StatusCode::OK, json!(0)));

    let plain = m.app.register("plain@x.io", "user").await;
    assert_eq!(count(plain).await.0, StatusCode::FORBIDDEN);

    let admin = m.app.admin().await;
    assert_eq!(count(admin).await, (StatusCode::OK, json!(1)));
}

#[tokio::test]
async fn test_application_transitions() {
    let m = market().await;
    let application = m.apply().await;

    assert_eq!(
        m.set_status("applications", &application, "withdrawn", &m.expert)
            .await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        m.set_status("applications", &application, "accepted", &m.owner)
            .await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        m.set_status("applications", &application, "accepted", &m.expert)
            .await,
        StatusCode::OK
    );
    assert_eq!(
        m.set_status("applications", &application, "rejected", &m.expert)
            .await,
        StatusCode::CONFLICT
    );

    let outsider = m
        .app
        .request(
            "GET",
            &format!("/api/applications/{application}"),
            None,
            Some(&m.other_expert),
        )
        .await;
    assert_eq!(outsider.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_schedules_belong_to_participants() {
    let m = market().await;
    let application = m.apply().await;

    let create = |title: &str, starts: &str, ends: &str| {
        json!({
            "application_id": application,
            "title": title,
            "starts_at": starts,
            "ends_at": ends,
            "location": "Seoul HQ",
        })
    };

    let later = m
        .app
        .request(
            "POST",
            "/api/schedules",
            Some(create("On-site audit", "2025-03-10T09:00:00Z", "2025-03-10T18:00:00Z")),
            Some(&m.expert),
        )
        .await;
    assert_eq!(later.status, StatusCode::CREATED);

    let earlier = m
        .app
        .request(
            "POST",
            "/api/schedules",
            Some(create("Kick-off", "2025-03-03T10:00:00Z", "2025-03-03T11:00:00Z")),
            Some(&m.owner),
        )
        .await;
    assert_eq!(earlier.status, StatusCode::CREATED);

    let inverted = m
        .app
        .request(
            "POST",
            "/api/schedules",
            Some(create("Backwards", "2025-03-05T10:00:00Z", "2025-03-05T09:00:00Z")),
            Some(&m.owner),
        )
        .await;
    assert_eq!(inverted.status, StatusCode::BAD_REQUEST);

    let outsider = m
        .app
        .request(
            "POST",
            "/api/schedules",
            Some(create("Crash", "2025-03-05T10:00:00Z", "2025-03-05T11:00:00Z")),
            Some(&m.other_expert),
        )
        .await;
    assert_eq!(outsider.status, StatusCode::FORBIDDEN);

    let listed = m
        .app
        .request(
            "GET",
            &format!("/api/applications/{application}/schedules"),
            None,
            Some(&m.expert),
        )
        .await;
    let titles: Vec<&str> = listed
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Kick-off", "On-site audit"]);

    let schedule = id_of(later.data());
    let moved = m
        .app
        .request(
            "PUT",
            &format!("/api/schedules/{schedule}"),
            Some(json!({ "ends_at": "2025-03-10T08:00:00Z" })),
            Some(&m.owner),
        )
        .await;
    assert_eq!(moved.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_contract_requires_accepted_application() {
    let m = market().await;
    let pending = m.apply().await;

    let response = m
        .app
        .request(
            "POST",
            "/api/contracts",
            Some(contract_body(&pending, 1_000_000)),
            Some(&m.owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_contract_lifecycle() {
    let m = market().await;
    let application = m.accepted().await;

    let by_expert = m
        .app
        .request(
            "POST",
            "/api/contracts",
            Some(contract_body(&application, 5_000_000)),
            Some(&m.expert),
        )
        .await;
    assert_eq!(by_expert.status, StatusCode::FORBIDDEN);

    let negative = m
        .app
        .request(
            "POST",
            "/api/contracts",
            Some(contract_body(&application, -1)),
            Some(&m.owner),
        )
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);

    let drafted = m
        .app
        .request(
            "POST",
            "/api/contracts",
            Some(contract_body(&application, 5_000_000)),
            Some(&m.owner),
        )
        .await;
    assert_eq!(drafted.status, StatusCode::CREATED);
    assert_eq!(drafted.data()["status"], "draft");
    assert_eq!(drafted.data()["expert_id"], m.expert.as_str());
    let contract = id_of(drafted.data());

    let duplicate = m
        .app
        .request(
            "POST",
            "/api/contracts",
            Some(contract_body(&application, 5_000_000)),
            Some(&m.owner),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    assert_eq!(
        m.set_status("contracts", &contract, "signed", &m.expert).await,
        StatusCode::OK
    );

    let delete_signed = m
        .app
        .request(
            "DELETE",
            &format!("/api/contracts/{contract}"),
            None,
            Some(&m.owner),
        )
        .await;
    assert_eq!(delete_signed.status, StatusCode::CONFLICT);

    assert_eq!(
        m.set_status("contracts", &contract, "completed", &m.owner).await,
        StatusCode::OK
    );
    assert_eq!(
        m.set_status("contracts", &contract, "cancelled", &m.owner).await,
        StatusCode::CONFLICT
    );

    let listed = m
        .app
        .request("GET", "/api/contracts?status=completed", None, Some(&m.expert))
        .await;
    assert_eq!(listed.data()["total"], 1);

    let hidden = m
        .app
        .request("GET", "/api/contracts", None, Some(&m.other_expert))
        .await;
    assert_eq!(hidden.data()["total"], 0);
}

#[tokio::test]
async fn test_health_and_unknown_routes() {
    let app = TestApp::new();

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.data()["status"], "ok");

    let detailed = app.request("GET", "/api/health/detailed", None, None).await;
    assert_eq!(detailed.status, StatusCode::OK);
    assert_eq!(detailed.data()["database"]["provider"], "memory");

    let missing = app.request("GET", "/api/nowhere", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "NOT_FOUND");
}
