//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. El dashboard arranca
//! standalone: toda variable ausente tiene un default razonable.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    /// Ventana por defecto (días) para el agregado de vencimientos
    pub expiry_window_days: i64,
    /// Orígenes CORS permitidos fuera de desarrollo (lista separada
    /// por comas en `ALLOWED_ORIGINS`)
    pub allowed_origins: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://fleet_dashboard.db?mode=rwc".to_string()),
            expiry_window_days: env::var("EXPIRY_WINDOW_DAYS")
                .ok()
                .and_then(|d| d.parse().ok())
                .unwrap_or(30),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
