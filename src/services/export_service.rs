//! Servicio de export de informes
//!
//! Formatea los datasets del informe (summary / vehicles / agreements)
//! como CSV con todas las celdas entrecomilladas, o como el payload JSON
//! que consume el renderizador PDF del cliente. Aquí no se generan bytes
//! de PDF: eso es del lado cliente.

use serde_json::{json, Value};

use crate::repositories::report_repository::{AgreementReportRow, VehicleReportRow};
use crate::utils::timestamps::parse_timestamp;

/// Tipo de informe solicitado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Summary,
    Vehicles,
    Agreements,
}

impl ReportType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "summary" => Some(Self::Summary),
            "vehicles" => Some(Self::Vehicles),
            "agreements" => Some(Self::Agreements),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Vehicles => "vehicles",
            Self::Agreements => "agreements",
        }
    }
}

/// Formato de salida del export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "csv" => Some(Self::Csv),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Entrecomillar una celda, doblando las comillas internas
fn csv_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Construir el documento CSV: fila de cabecera + filas de datos,
/// todas las celdas entre comillas dobles.
pub fn build_csv(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| csv_cell(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        lines.push(
            row.iter()
                .map(|cell| csv_cell(cell))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

pub const VEHICLE_HEADERS: [&str; 7] = [
    "Vehicle ID",
    "Registration",
    "VIN",
    "Status",
    "Health Score",
    "Risk Score",
    "Risk Level",
];

pub const AGREEMENT_HEADERS: [&str; 8] = [
    "Contract Number",
    "Vehicle ID",
    "Stage",
    "Status",
    "Start",
    "End",
    "Mileage Limit",
    "Current Mileage",
];

pub const SUMMARY_HEADERS: [&str; 2] = ["Metric", "Value"];

pub fn vehicle_row(row: &VehicleReportRow) -> Vec<String> {
    vec![
        row.id.clone(),
        row.registration.clone(),
        row.vin.clone(),
        row.availability_status.clone(),
        row.health_score.to_string(),
        row.risk_score.to_string(),
        row.risk_level.clone(),
    ]
}

/// Renderizar una columna de fecha del informe. Las fechas llegan como
/// TEXT desde SQLite; un valor no parseable pasa por el centinela y sale
/// como celda vacía, nunca como texto basura en el informe.
fn render_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.date_naive().to_string())
        .unwrap_or_default()
}

pub fn agreement_row(row: &AgreementReportRow) -> Vec<String> {
    vec![
        row.contract_number.clone(),
        row.vehicle_id.clone(),
        row.stage.clone(),
        row.status.clone(),
        render_date(&row.start_at),
        render_date(&row.end_at),
        row.mileage_limit.to_string(),
        row.current_mileage.to_string(),
    ]
}

/// Payload JSON para el renderizador PDF del cliente
pub fn pdf_payload(report_type: ReportType, rows: Vec<Vec<String>>) -> Value {
    match report_type {
        ReportType::Summary => json!({ "summary": rows }),
        ReportType::Vehicles => json!({ "vehicles": rows }),
        ReportType::Agreements => json!({ "agreements": rows }),
    }
}

/// Nombre del fichero adjunto: `<type>-report-<fecha ISO>.csv`
pub fn csv_filename(report_type: ReportType, date: chrono::NaiveDate) -> String {
    format!("{}-report-{}.csv", report_type.as_str(), date)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parser mínimo para el round-trip: celdas entrecomilladas separadas
    /// por coma, comillas internas dobladas.
    fn parse_csv(document: &str) -> Vec<Vec<String>> {
        document
            .lines()
            .map(|line| {
                let mut cells = Vec::new();
                let mut current = String::new();
                let mut in_quotes = false;
                let mut chars = line.chars().peekable();
                while let Some(c) = chars.next() {
                    match c {
                        '"' if in_quotes => {
                            if chars.peek() == Some(&'"') {
                                chars.next();
                                current.push('"');
                            } else {
                                in_quotes = false;
                            }
                        }
                        '"' => in_quotes = true,
                        ',' if !in_quotes => {
                            cells.push(std::mem::take(&mut current));
                        }
                        other => current.push(other),
                    }
                }
                cells.push(current);
                cells
            })
            .collect()
    }

    fn fixture_rows() -> Vec<Vec<String>> {
        vec![
            vec![
                "V001".into(),
                "LR24 ABC".into(),
                "WVWZZZ1KZAW000001".into(),
                "Available".into(),
                "92".into(),
                "12".into(),
                "low".into(),
            ],
            vec![
                "V002".into(),
                "LR24 DEF".into(),
                "WVWZZZ1KZAW000002".into(),
                "In Workshop".into(),
                "61".into(),
                "48".into(),
                "medium".into(),
            ],
            vec![
                "V003".into(),
                "LR24 \"GHI\"".into(),
                "WVWZZZ1KZAW000003".into(),
                "Awaiting Parts".into(),
                "55, approx".into(),
                "77".into(),
                "high".into(),
            ],
        ]
    }

    #[test]
    fn csv_round_trip_preserves_rows_and_cells() {
        let rows = fixture_rows();
        let document = build_csv(&VEHICLE_HEADERS, &rows);

        let parsed = parse_csv(&document);
        assert_eq!(parsed.len(), rows.len() + 1);
        assert_eq!(parsed[0], VEHICLE_HEADERS.to_vec());
        for (parsed_row, original) in parsed[1..].iter().zip(rows.iter()) {
            assert_eq!(parsed_row, original);
        }
    }

    #[test]
    fn every_cell_is_double_quoted() {
        let document = build_csv(&SUMMARY_HEADERS, &[vec!["Total Vehicles".into(), "3".into()]]);
        for line in document.lines() {
            assert!(line.starts_with('"') && line.ends_with('"'));
        }
        assert_eq!(document, "\"Metric\",\"Value\"\n\"Total Vehicles\",\"3\"");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let document = build_csv(&["Name"], &[vec!["the \"special\" one".into()]]);
        assert!(document.contains("\"the \"\"special\"\" one\""));
    }

    #[test]
    fn agreement_dates_render_iso_and_garbage_renders_empty() {
        let row = AgreementReportRow {
            contract_number: "AGR-2026-0117".into(),
            vehicle_id: "V003".into(),
            stage: "Collected".into(),
            status: "active".into(),
            start_at: "2026-07-23T09:00:00+00:00".into(),
            end_at: "definitely-not-a-date".into(),
            mileage_limit: 8_000,
            current_mileage: 19_900,
        };

        let cells = agreement_row(&row);
        assert_eq!(cells[4], "2026-07-23");
        // una fecha corrupta sale como celda vacía, nunca texto basura
        assert_eq!(cells[5], "");
    }

    #[test]
    fn pdf_payload_keys_follow_report_type() {
        let rows = vec![vec!["Total Vehicles".to_string(), "3".to_string()]];
        assert!(pdf_payload(ReportType::Summary, rows.clone())
            .get("summary")
            .is_some());
        assert!(pdf_payload(ReportType::Vehicles, rows.clone())
            .get("vehicles")
            .is_some());
        assert!(pdf_payload(ReportType::Agreements, rows).get("agreements").is_some());
    }

    #[test]
    fn filename_embeds_type_and_iso_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        assert_eq!(
            csv_filename(ReportType::Vehicles, date),
            "vehicles-report-2026-08-29.csv"
        );
    }

    #[test]
    fn report_type_and_format_parse_strictly() {
        assert_eq!(ReportType::parse("summary"), Some(ReportType::Summary));
        assert_eq!(ReportType::parse("xlsx"), None);
        assert_eq!(ExportFormat::parse("csv"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::parse("docx"), None);
    }
}
