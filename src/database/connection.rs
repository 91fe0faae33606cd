//! Conexión a SQLite
//!
//! Este módulo abre el fichero SQLite del subsistema de informes, crea el
//! schema si no existe y lo siembra desde el fixture de flota cuando las
//! tablas están vacías.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::database::DatabaseConfig;
use crate::models::agreement::Agreement;
use crate::models::vehicle::Vehicle;
use crate::utils::vehicle_id::normalize_vehicle_id;

pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = config.create_pool().await?;
        ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn new_default() -> Result<Self> {
        Self::new(&DatabaseConfig::default()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Crear las tablas del subsistema de informes si no existen
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicles (
            id TEXT PRIMARY KEY,
            registration TEXT NOT NULL,
            vin TEXT NOT NULL,
            availability_status TEXT NOT NULL,
            health_score INTEGER NOT NULL,
            risk_score INTEGER NOT NULL,
            risk_level TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS agreements (
            contract_number TEXT PRIMARY KEY,
            vehicle_id TEXT NOT NULL,
            stage TEXT NOT NULL,
            status TEXT NOT NULL,
            start_at TEXT NOT NULL,
            end_at TEXT NOT NULL,
            mileage_limit INTEGER NOT NULL,
            current_mileage INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS export_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            report_type TEXT NOT NULL,
            format TEXT NOT NULL,
            record_count INTEGER NOT NULL,
            exported_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Sembrar las tablas de informes desde el dataset de flota.
/// Idempotente: REPLACE sobre la clave primaria. Los IDs de vehículo se
/// canonicalizan al escribir, igual que en el store de flota: el informe
/// y la API hablan del mismo "V003".
pub async fn seed_reports(
    pool: &SqlitePool,
    vehicles: &[Vehicle],
    agreements: &[Agreement],
) -> Result<(), sqlx::Error> {
    for vehicle in vehicles {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO vehicles
                (id, registration, vin, availability_status, health_score, risk_score, risk_level)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(normalize_vehicle_id(&vehicle.id))
        .bind(&vehicle.registration)
        .bind(&vehicle.vin)
        .bind(vehicle.availability_status.as_str())
        .bind(vehicle.health.health_score as i64)
        .bind(vehicle.risk_score as i64)
        .bind(vehicle.risk_level.as_str())
        .execute(pool)
        .await?;
    }

    for agreement in agreements {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO agreements
                (contract_number, vehicle_id, stage, status, start_at, end_at,
                 mileage_limit, current_mileage)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&agreement.contract_number)
        .bind(normalize_vehicle_id(&agreement.vehicle_id))
        .bind(agreement.stage.as_str())
        .bind(agreement.status.as_str())
        .bind(agreement.start_at.to_rfc3339())
        .bind(agreement.end_at.to_rfc3339())
        .bind(agreement.mileage_limit)
        .bind(agreement.current_mileage)
        .execute(pool)
        .await?;
    }

    Ok(())
}
