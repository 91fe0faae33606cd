//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle con su estado de disponibilidad,
//! los timestamps de etapa del flujo operativo y el registro de salud.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Estado de disponibilidad del vehículo - enum cerrado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AvailabilityStatus {
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "On Hire")]
    OnHire,
    #[serde(rename = "In Workshop")]
    InWorkshop,
    #[serde(rename = "Awaiting Valet")]
    AwaitingValet,
    #[serde(rename = "Awaiting Documents")]
    AwaitingDocuments,
    #[serde(rename = "Awaiting Allocation")]
    AwaitingAllocation,
    #[serde(rename = "Awaiting Parts")]
    AwaitingParts,
    #[serde(rename = "With Partner")]
    WithPartner,
    #[serde(rename = "Delivering")]
    Delivering,
}

impl AvailabilityStatus {
    /// Parsear desde el texto almacenado en la base de datos / fixtures.
    /// Devuelve None para valores desconocidos en lugar de fallar.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Available" => Some(Self::Available),
            "On Hire" => Some(Self::OnHire),
            "In Workshop" => Some(Self::InWorkshop),
            "Awaiting Valet" => Some(Self::AwaitingValet),
            "Awaiting Documents" => Some(Self::AwaitingDocuments),
            "Awaiting Allocation" => Some(Self::AwaitingAllocation),
            "Awaiting Parts" => Some(Self::AwaitingParts),
            "With Partner" => Some(Self::WithPartner),
            "Delivering" => Some(Self::Delivering),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::OnHire => "On Hire",
            Self::InWorkshop => "In Workshop",
            Self::AwaitingValet => "Awaiting Valet",
            Self::AwaitingDocuments => "Awaiting Documents",
            Self::AwaitingAllocation => "Awaiting Allocation",
            Self::AwaitingParts => "Awaiting Parts",
            Self::WithPartner => "With Partner",
            Self::Delivering => "Delivering",
        }
    }
}

/// Timestamps de etapa del flujo return → inspection → workshop/valet → ready.
/// Append-only: una vez fijado un timestamp no se limpia, solo lo supera
/// el de una etapa posterior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageTimestamps {
    pub returned_at: Option<DateTime<Utc>>,
    pub inspected_at: Option<DateTime<Utc>>,
    pub workshop_in_at: Option<DateTime<Utc>>,
    pub parts_requested_at: Option<DateTime<Utc>>,
    pub valeted_at: Option<DateTime<Utc>>,
}

/// Registro de salud del vehículo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleHealth {
    pub health_score: u8,
    pub battery_health: u8,
    pub mot_expiry: NaiveDate,
    pub last_ota: NaiveDate,
    pub fault_codes: Vec<String>,
}

/// Nivel de riesgo cacheado en el registro (no lo recalcula este núcleo)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Vehicle principal de la flota.
/// `id` es el código de flota canónico ("V001"); la normalización de
/// variantes con prefijo ("BYD-V001") ocurre una sola vez en el store,
/// nunca en los puntos de consumo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub vin: String,
    pub registration: String,
    pub availability_status: AvailabilityStatus,
    pub stage_timestamps: StageTimestamps,
    pub health: VehicleHealth,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
}
