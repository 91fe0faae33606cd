use axum::{
    http::header,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::dto::export_dto::ExportQuery;
use crate::repositories::report_repository::ReportRepository;
use crate::services::export_service::{
    agreement_row, build_csv, csv_filename, pdf_payload, vehicle_row, ExportFormat, ReportType,
    AGREEMENT_HEADERS, SUMMARY_HEADERS, VEHICLE_HEADERS,
};
use crate::utils::errors::AppError;

pub struct ExportController {
    repository: ReportRepository,
}

impl ExportController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: ReportRepository::new(pool),
        }
    }

    /// Resolver el export completo: validar parámetros, consultar SQLite,
    /// formatear y dejar constancia en el log de auditoría.
    pub async fn export(&self, query: ExportQuery) -> Result<Response, AppError> {
        let format_param = query.format.as_deref().unwrap_or("");
        let format = ExportFormat::parse(format_param)
            .ok_or_else(|| AppError::InvalidExportFormat(format_param.to_string()))?;

        let type_param = query.report_type.as_deref().unwrap_or("");
        let report_type = ReportType::parse(type_param)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown report type '{}'", type_param)))?;

        let (headers, rows): (&[&str], Vec<Vec<String>>) = match report_type {
            ReportType::Summary => {
                let pairs = self.repository.fetch_summary().await?;
                (
                    &SUMMARY_HEADERS,
                    pairs
                        .into_iter()
                        .map(|(metric, value)| vec![metric, value])
                        .collect(),
                )
            }
            ReportType::Vehicles => {
                let vehicles = self.repository.fetch_vehicles().await?;
                (&VEHICLE_HEADERS, vehicles.iter().map(vehicle_row).collect())
            }
            ReportType::Agreements => {
                let agreements = self.repository.fetch_agreements().await?;
                (
                    &AGREEMENT_HEADERS,
                    agreements.iter().map(agreement_row).collect(),
                )
            }
        };

        let now = Utc::now();
        let record_count = rows.len() as i64;

        let response = match format {
            ExportFormat::Csv => {
                let document = build_csv(headers, &rows);
                let filename = csv_filename(report_type, now.date_naive());
                (
                    [
                        (header::CONTENT_TYPE, "text/csv".to_string()),
                        (
                            header::CONTENT_DISPOSITION,
                            format!("attachment; filename=\"{}\"", filename),
                        ),
                    ],
                    document,
                )
                    .into_response()
            }
            // El formato pdf devuelve el payload JSON que renderiza el
            // cliente; el servidor no genera bytes de PDF.
            ExportFormat::Pdf => Json(pdf_payload(report_type, rows)).into_response(),
        };

        let format_label = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        };
        self.repository
            .record_export(report_type.as_str(), format_label, record_count, now)
            .await?;

        tracing::info!(
            "Export completed: type={} format={} records={}",
            report_type.as_str(),
            format_label,
            record_count
        );

        Ok(response)
    }
}
