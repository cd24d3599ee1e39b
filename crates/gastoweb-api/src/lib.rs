//! HTTP JSON API server for gastoweb
//!
//! Routes are organized into modules:
//! - routes::dashboard: the monthly snapshot
//! - routes::settings: the salary/budget singleton
//! - routes::monthly_income: per-month income overrides
//! - routes::categories: category list/create
//! - routes::expenses / routes::incomes / routes::reserves: ledger CRUD

pub mod error;
pub mod routes;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use gastoweb_config::Config;
use gastoweb_core::{MetricsEngine, SystemClock};
use gastoweb_store::SqliteStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ApiResult};

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub store: SqliteStore,
    pub engine: Arc<MetricsEngine>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::categories::{api_categories_create, api_categories_list};
    use routes::dashboard::api_dashboard;
    use routes::expenses::{
        api_expenses_create, api_expenses_delete, api_expenses_list, api_expenses_update,
    };
    use routes::incomes::{
        api_incomes_create, api_incomes_delete, api_incomes_list, api_incomes_update,
    };
    use routes::monthly_income::{
        api_monthly_income_delete, api_monthly_income_get, api_monthly_income_list,
        api_monthly_income_put,
    };
    use routes::reserves::{
        api_reserves_create, api_reserves_delete, api_reserves_list, api_reserves_update,
    };
    use routes::settings::{api_settings_get, api_settings_update};

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/dashboard", get(api_dashboard))
        .route(
            "/api/settings",
            get(api_settings_get).put(api_settings_update),
        )
        .route("/api/monthly-income", get(api_monthly_income_list))
        .route(
            "/api/monthly-income/:month",
            get(api_monthly_income_get)
                .put(api_monthly_income_put)
                .delete(api_monthly_income_delete),
        )
        .route(
            "/api/categories",
            get(api_categories_list).post(api_categories_create),
        )
        .route(
            "/api/expenses",
            get(api_expenses_list).post(api_expenses_create),
        )
        .route(
            "/api/expenses/:id",
            axum::routing::put(api_expenses_update).delete(api_expenses_delete),
        )
        .route(
            "/api/incomes",
            get(api_incomes_list).post(api_incomes_create),
        )
        .route(
            "/api/incomes/:id",
            axum::routing::put(api_incomes_update).delete(api_incomes_delete),
        )
        .route(
            "/api/reserves",
            get(api_reserves_list).post(api_reserves_create),
        )
        .route(
            "/api/reserves/:id",
            axum::routing::put(api_reserves_update).delete(api_reserves_delete),
        )
        .fallback(route_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Unknown routes answer with the shared error shape
async fn route_not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found." })),
    )
}

/// Start the HTTP server
///
/// Builds the metrics engine over the store and the system clock, binds
/// the listener, and serves until the process is stopped.
pub async fn start_server(config: Config, store: SqliteStore) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let engine = Arc::new(MetricsEngine::new(
        Arc::new(store.clone()),
        Arc::new(SystemClock),
    ));
    let state = AppState {
        store,
        engine,
        config,
    };
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting gastoweb server on http://{}", addr);

    axum::serve(listener, router).await
}
