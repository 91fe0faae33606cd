use serde::{Deserialize, Serialize};

use crate::models::agreement::{Agreement, Breach, Penalty};

// Filtros para el listado de contratos
#[derive(Debug, Deserialize)]
pub struct AgreementFilters {
    pub stage: Option<String>,
    pub status: Option<String>,
}

// Response de contrato
#[derive(Debug, Serialize)]
pub struct AgreementResponse {
    pub id: String,
    pub contract_number: String,
    pub vehicle_id: String,
    pub stage: String,
    pub status: String,
    pub start_at: String,
    pub end_at: String,
    pub compliant: bool,
    pub penalties: Vec<Penalty>,
    pub breaches: Vec<Breach>,
    pub mileage_limit: i64,
    pub mileage_at_start: i64,
    pub current_mileage: i64,
    pub mileage_at_return: Option<i64>,
    pub mileage_overage: Option<i64>,
}

impl From<Agreement> for AgreementResponse {
    fn from(agreement: Agreement) -> Self {
        let compliant = agreement.is_compliant();
        Self {
            id: agreement.id.to_string(),
            contract_number: agreement.contract_number,
            vehicle_id: agreement.vehicle_id,
            stage: agreement.stage.as_str().to_string(),
            status: agreement.status.as_str().to_string(),
            start_at: agreement.start_at.to_rfc3339(),
            end_at: agreement.end_at.to_rfc3339(),
            compliant,
            penalties: agreement.penalties,
            breaches: agreement.breaches,
            mileage_limit: agreement.mileage_limit,
            mileage_at_start: agreement.mileage_at_start,
            current_mileage: agreement.current_mileage,
            mileage_at_return: agreement.mileage_at_return,
            mileage_overage: agreement.mileage_overage,
        }
    }
}
