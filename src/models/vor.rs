//! Modelos de VOR (Vehicle Off Road)
//!
//! Vocabulario derivado del ciclo de vida del vehículo: etapa actual,
//! severidad y el registro marcado que produce el agregador de flota.
//! La severidad se deriva en cada pasada, nunca se persiste.

use serde::{Deserialize, Serialize};

/// Etapa actual del flujo operativo del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Stage {
    #[serde(rename = "In Workshop")]
    InWorkshop,
    #[serde(rename = "Awaiting Documents")]
    AwaitingDocuments,
    #[serde(rename = "Awaiting Valet")]
    AwaitingValet,
    #[serde(rename = "Awaiting Parts")]
    AwaitingParts,
    #[serde(rename = "Available")]
    Available,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InWorkshop => "In Workshop",
            Self::AwaitingDocuments => "Awaiting Documents",
            Self::AwaitingValet => "Awaiting Valet",
            Self::AwaitingParts => "Awaiting Parts",
            Self::Available => "Available",
        }
    }
}

/// Severidad derivada. El orden del enum es el orden de urgencia:
/// Ok < Warning < Critical (ordinal, no alfabético).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

/// Vehículo marcado por el agregador: etapa, duración en la etapa y
/// severidad, más los campos de presentación que pasan tal cual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlaggedVehicle {
    pub vehicle_id: String,
    pub registration: String,
    pub vin: String,
    pub stage: Stage,
    pub duration_seconds: Option<i64>,
    pub severity: Severity,
}
