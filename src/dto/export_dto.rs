use serde::Deserialize;

// Query del endpoint de export: ambos parámetros son obligatorios y se
// validan contra los valores cerrados del contrato.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub format: Option<String>,
}
