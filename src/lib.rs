/*!
 * Quotation management API
 *
 * REST service for sales quotations: per-line pricing, document-level GST
 * aggregation, and revision history per lead, persisted in a denormalized
 * wide-row table.
 */

use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
    routing::{delete, get},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::{OpenApi, ToSchema};

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod models;
pub mod openapi;
pub mod services;

/// Shared state available to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<db::DbPool>,
    pub config: config::AppConfig,
    pub event_sender: Option<Arc<events::EventSender>>,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(
        db: Arc<db::DbPool>,
        config: config::AppConfig,
        event_sender: Option<Arc<events::EventSender>>,
    ) -> Self {
        let services = handlers::AppServices::new(db.clone(), event_sender.clone());
        Self {
            db,
            config,
            event_sender,
            services,
        }
    }
}

// Common query parameters for list endpoints
#[derive(Debug, Deserialize, ToSchema)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    pub limit: Option<u64>,
    pub search: Option<String>,
}

fn default_page() -> u64 {
    1
}

impl ListQuery {
    /// Requested page size, defaulted and capped by configuration.
    pub fn clamped_limit(&self, config: &config::AppConfig) -> u64 {
        self.limit
            .unwrap_or(config.api_default_page_size)
            .clamp(1, config.api_max_page_size)
    }
}

// Common response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// Builds the versioned API router.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/quotations",
            get(handlers::quotations::list_quotations).post(handlers::quotations::create_quotation),
        )
        .route(
            "/quotations/:quot_no",
            get(handlers::quotations::get_quotation)
                .put(handlers::quotations::replace_quotation)
                .delete(handlers::quotations::delete_quotation),
        )
        .route("/companies", get(handlers::companies::list_companies))
        .route(
            "/companies/autocomplete",
            get(handlers::companies::autocomplete_companies),
        )
        .route(
            "/companies/:id",
            delete(handlers::companies::delete_company),
        )
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi_spec))
}

/// Assembles the application with middleware applied.
pub fn create_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config);

    Router::new()
        .nest("/api/v1", api_v1_routes())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(30)))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(config: &config::AppConfig) -> CorsLayer {
    if config.should_allow_permissive_cors() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins: Vec<_> = config
        .cors_allowed_origins
        .as_deref()
        .unwrap_or("")
        .split(',')
        .filter_map(|o| o.trim().parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn api_status() -> ApiResult<Value> {
    let status_data = json!({
        "status": "ok",
        "service": "quotation-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    });
    Ok(Json(ApiResponse::success(status_data)))
}

async fn health_check(State(state): State<AppState>) -> ApiResult<Value> {
    let db_status = match db::check_connection(&state.db).await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };
    let health_data = json!({
        "status": db_status,
        "checks": { "database": db_status },
        "timestamp": Utc::now().to_rfc3339(),
    });
    Ok(Json(ApiResponse::success(health_data)))
}

async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi::ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_caps() {
        let cfg = config::AppConfig::new("sqlite://x".into(), "h".into(), 1, "test".into());
        let q = ListQuery {
            page: 1,
            limit: None,
            search: None,
        };
        assert_eq!(q.clamped_limit(&cfg), 20);
        let q = ListQuery {
            page: 1,
            limit: Some(10_000),
            search: None,
        };
        assert_eq!(q.clamped_limit(&cfg), 100);
        let q = ListQuery {
            page: 1,
            limit: Some(0),
            search: None,
        };
        assert_eq!(q.clamped_limit(&cfg), 1);
    }

    #[test]
    fn success_envelope_carries_data() {
        let resp = ApiResponse::success("ok");
        assert!(resp.success);
        assert_eq!(resp.data, Some("ok"));
        assert!(resp.message.is_none());
    }
}
