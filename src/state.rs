//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: el pool SQLite de informes, el store de
//! flota inyectado y la configuración de entorno.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::fleet_repository::FleetRepository;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: EnvironmentConfig,
    pub fleet: Arc<dyn FleetRepository>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        config: EnvironmentConfig,
        fleet: Arc<dyn FleetRepository>,
    ) -> Self {
        Self { pool, config, fleet }
    }
}
