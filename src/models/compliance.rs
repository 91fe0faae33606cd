//! Modelos de compliance
//!
//! Agregados de cumplimiento contractual que consume el dashboard.
//! Forma análoga al resumen diario de analytics: una pasada de reduce
//! sobre la colección de contratos.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Resumen de cumplimiento de la flota de contratos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total_agreements: usize,
    pub compliant_count: usize,
    /// Redondeado a entero; 100 por definición cuando no hay contratos.
    pub compliance_percent: u32,
    /// Totales de penalizaciones pendientes agrupados por divisa.
    /// Nunca se suman importes de divisas distintas.
    pub pending_penalty_totals: BTreeMap<String, Decimal>,
    pub unresolved_breach_count: usize,
    pub critical_breach_count: usize,
    pub expiring_soon: Vec<ExpiringAgreement>,
    pub mileage_overage_count: usize,
}

/// Contrato que vence dentro de la ventana consultada
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiringAgreement {
    pub agreement_id: Uuid,
    pub contract_number: String,
    pub vehicle_id: String,
    pub end_at: chrono::DateTime<chrono::Utc>,
    pub days_remaining: i64,
}
