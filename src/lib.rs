//! Fleet Operations Dashboard - backend
//!
//! API del dashboard de gestión de flota: vehículos con su derivación de
//! ciclo de vida, contratos, agregado VOR, resumen de compliance y export
//! de informes sobre SQLite.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

/// Construir el router completo de la aplicación. Lo comparten el
/// binario y los tests de integración.
///
/// En desarrollo el CORS es abierto; en cualquier otro entorno solo se
/// permiten los orígenes de la configuración.
pub fn create_app(state: AppState) -> Router {
    let cors = if state.config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.allowed_origins.clone())
    };

    Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/agreement", routes::agreement_routes::create_agreement_router())
        .nest("/api/vor", routes::vor_routes::create_vor_router())
        .nest("/api/analytics", routes::analytics_routes::create_analytics_router())
        .nest("/api/export", routes::export_routes::create_export_router())
        .layer(cors)
        .with_state(state)
}

/// Health check del servicio
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-dashboard",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
