//! Repositorio de informes sobre SQLite
//!
//! Consultas parametrizadas contra el fichero SQLite pre-sembrado que
//! alimenta el endpoint de export. Sin lógica de negocio: proyecciones
//! planas y un INSERT de auditoría por export completado.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::utils::errors::AppError;

/// Proyección plana de vehículo para el informe
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VehicleReportRow {
    pub id: String,
    pub registration: String,
    pub vin: String,
    pub availability_status: String,
    pub health_score: i64,
    pub risk_score: i64,
    pub risk_level: String,
}

/// Proyección plana de contrato para el informe
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AgreementReportRow {
    pub contract_number: String,
    pub vehicle_id: String,
    pub stage: String,
    pub status: String,
    pub start_at: String,
    pub end_at: String,
    pub mileage_limit: i64,
    pub current_mileage: i64,
}

pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn fetch_vehicles(&self) -> Result<Vec<VehicleReportRow>, AppError> {
        let rows = sqlx::query_as::<_, VehicleReportRow>(
            r#"
            SELECT id, registration, vin, availability_status, health_score, risk_score, risk_level
            FROM vehicles
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::ExportFailed(format!("Error fetching vehicle rows: {}", e)))?;

        Ok(rows)
    }

    pub async fn fetch_agreements(&self) -> Result<Vec<AgreementReportRow>, AppError> {
        let rows = sqlx::query_as::<_, AgreementReportRow>(
            r#"
            SELECT contract_number, vehicle_id, stage, status, start_at, end_at,
                   mileage_limit, current_mileage
            FROM agreements
            ORDER BY contract_number
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::ExportFailed(format!("Error fetching agreement rows: {}", e)))?;

        Ok(rows)
    }

    /// Pares métrica/valor para el informe resumen
    pub async fn fetch_summary(&self) -> Result<Vec<(String, String)>, AppError> {
        let total_vehicles = self.count_vehicles(None).await?;
        let available = self.count_vehicles(Some("Available")).await?;
        let in_workshop = self.count_vehicles(Some("In Workshop")).await?;
        let total_agreements = self.count_agreements(None).await?;
        let active_agreements = self.count_agreements(Some("active")).await?;
        let overdue_agreements = self.count_agreements(Some("overdue")).await?;

        Ok(vec![
            ("Total Vehicles".to_string(), total_vehicles.to_string()),
            ("Available Vehicles".to_string(), available.to_string()),
            ("Vehicles In Workshop".to_string(), in_workshop.to_string()),
            ("Total Agreements".to_string(), total_agreements.to_string()),
            ("Active Agreements".to_string(), active_agreements.to_string()),
            ("Overdue Agreements".to_string(), overdue_agreements.to_string()),
        ])
    }

    async fn count_vehicles(&self, status: Option<&str>) -> Result<i64, AppError> {
        let count: i64 = match status {
            Some(status) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM vehicles WHERE availability_status = ?")
                    .bind(status)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::ExportFailed(format!("Error counting vehicles: {}", e)))?;

        Ok(count)
    }

    async fn count_agreements(&self, status: Option<&str>) -> Result<i64, AppError> {
        let count: i64 = match status {
            Some(status) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM agreements WHERE status = ?")
                    .bind(status)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM agreements")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::ExportFailed(format!("Error counting agreements: {}", e)))?;

        Ok(count)
    }

    /// Registrar el export completado en la tabla de auditoría
    pub async fn record_export(
        &self,
        report_type: &str,
        format: &str,
        record_count: i64,
        exported_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO export_log (report_type, format, record_count, exported_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(report_type)
        .bind(format)
        .bind(record_count)
        .bind(exported_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::ExportFailed(format!("Error recording export: {}", e)))?;

        Ok(())
    }
}
