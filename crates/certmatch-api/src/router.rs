//! Route definitions for the CertMatch HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(company_routes())
        .merge(application_routes())
        .merge(schedule_routes())
        .merge(contract_routes());

    let server = &state.config.server;

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .layer(middleware::timeout::build_timeout_layer(server))
        .layer(middleware::compression::build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&server.cors))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Liveness and backend checks
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Account registration and profile maintenance
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::register),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
}

/// Company profiles and the company search
fn company_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies",
            get(handlers::company::search_companies).post(handlers::company::create_company),
        )
        .route(
            "/companies/{id}",
            get(handlers::company::get_company)
                .put(handlers::company::update_company)
                .delete(handlers::company::delete_company),
        )
}

/// Certification applications
fn application_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/applications",
            get(handlers::application::list_applications)
                .post(handlers::application::create_application),
        )
        .route(
            "/applications/{id}",
            get(handlers::application::get_application)
                .delete(handlers::application::delete_application),
        )
        .route(
            "/applications/{id}/status",
            put(handlers::application::change_application_status),
        )
        .route(
            "/applications/{id}/schedules",
            get(handlers::application::list_application_schedules),
        )
}

/// Interview and audit schedules
fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/schedules",
            post(handlers::schedule::create_schedule),
        )
        .route(
            "/schedules/{id}",
            get(handlers::schedule::get_schedule)
                .put(handlers::schedule::update_schedule)
                .delete(handlers::schedule::delete_schedule),
        )
}

/// Contracts between companies and experts
fn contract_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contracts",
            get(handlers::contract::list_contracts).post(handlers::contract::create_contract),
        )
        .route(
            "/contracts/{id}",
            get(handlers::contract::get_contract).delete(handlers::contract::delete_contract),
        )
        .route(
            "/contracts/{id}/status",
            put(handlers::contract::change_contract_status),
        )
}
