use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{StageTimestamps, Vehicle, VehicleHealth};
use crate::models::vor::{Severity, Stage};

// Filtros para el listado de vehículos
#[derive(Debug, Deserialize)]
pub struct VehicleFilters {
    pub status: Option<String>,
    pub flagged_only: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

// Request para actualizar el estado de disponibilidad
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleStatusRequest {
    #[validate(length(min = 1, max = 40))]
    pub availability_status: String,
    pub notes: Option<String>,
}

// Response de vehículo con su derivación de ciclo de vida
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: String,
    pub registration: String,
    pub vin: String,
    pub availability_status: String,
    pub stage: Stage,
    pub duration_seconds: Option<i64>,
    pub severity: Severity,
    pub stage_timestamps: StageTimestamps,
    pub health: VehicleHealth,
    pub risk_score: u8,
    pub risk_level: String,
}

impl VehicleResponse {
    pub fn from_vehicle(
        vehicle: Vehicle,
        stage: Stage,
        duration_seconds: Option<i64>,
        severity: Severity,
    ) -> Self {
        Self {
            id: vehicle.id,
            registration: vehicle.registration,
            vin: vehicle.vin,
            availability_status: vehicle.availability_status.as_str().to_string(),
            stage,
            duration_seconds,
            severity,
            stage_timestamps: vehicle.stage_timestamps,
            health: vehicle.health,
            risk_score: vehicle.risk_score,
            risk_level: vehicle.risk_level.as_str().to_string(),
        }
    }
}
