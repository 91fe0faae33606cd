//! Modelo de Agreement
//!
//! Este módulo contiene el contrato de alquiler con sus etapas ordenadas,
//! penalizaciones, incumplimientos y campos de kilometraje.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Etapa del contrato - enum ordenado, se rellena monótonamente
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum AgreementStage {
    Created,
    Prepared,
    Signed,
    Collected,
    Returned,
    DamageCheckCompleted,
    Closed,
}

impl AgreementStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Prepared => "Prepared",
            Self::Signed => "Signed",
            Self::Collected => "Collected",
            Self::Returned => "Returned",
            Self::DamageCheckCompleted => "DamageCheckCompleted",
            Self::Closed => "Closed",
        }
    }
}

/// Estado operativo del contrato
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AgreementStatus {
    Active,
    Overdue,
    Completed,
}

impl AgreementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Overdue => "overdue",
            Self::Completed => "completed",
        }
    }
}

/// Timestamps por etapa del contrato. Invariante esperado (no forzado aquí):
/// el timestamp de una etapa posterior nunca precede al de una anterior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgreementTimestamps {
    pub created_at: Option<DateTime<Utc>>,
    pub prepared_at: Option<DateTime<Utc>>,
    pub signed_at: Option<DateTime<Utc>>,
    pub collected_at: Option<DateTime<Utc>>,
    pub returned_at: Option<DateTime<Utc>>,
    pub damage_check_completed_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Estado de una penalización
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PenaltyStatus {
    Pending,
    Paid,
    Waived,
    Disputed,
}

/// Penalización registrada contra el contrato
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Penalty {
    pub penalty_type: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: PenaltyStatus,
    pub date: NaiveDate,
}

/// Severidad de un incumplimiento
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BreachSeverity {
    Minor,
    Moderate,
    Major,
    Critical,
}

/// Incumplimiento de términos del contrato
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breach {
    pub breach_type: String,
    pub severity: BreachSeverity,
    pub resolved: bool,
    pub description: String,
}

/// Agreement principal - contrato de alquiler sobre un vehículo.
/// `vehicle_id` es referencia, no ownership: varios contratos pueden
/// apuntar históricamente al mismo vehículo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agreement {
    pub id: Uuid,
    pub contract_number: String,
    pub vehicle_id: String,
    pub stage: AgreementStage,
    pub status: AgreementStatus,
    pub timestamps: AgreementTimestamps,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub penalties: Vec<Penalty>,
    pub breaches: Vec<Breach>,
    pub mileage_limit: i64,
    pub mileage_at_start: i64,
    pub current_mileage: i64,
    pub mileage_at_return: Option<i64>,
    pub mileage_overage: Option<i64>,
}

impl Agreement {
    /// Un contrato es conforme si no tiene incumplimientos o si todos
    /// están resueltos.
    pub fn is_compliant(&self) -> bool {
        self.breaches.iter().all(|b| b.resolved)
    }
}
