use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::dto::api::ApiResponse;
use crate::dto::vehicle_dto::{UpdateVehicleStatusRequest, VehicleFilters, VehicleResponse};
use crate::models::vehicle::AvailabilityStatus;
use crate::models::vor::Severity;
use crate::repositories::fleet_repository::FleetRepository;
use crate::services::lifecycle_service::{classify, resolve_stage, seconds_in_stage};
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct VehicleController {
    store: Arc<dyn FleetRepository>,
}

impl VehicleController {
    pub fn new(store: Arc<dyn FleetRepository>) -> Self {
        Self { store }
    }

    /// Listado con la derivación de ciclo de vida adjunta a cada vehículo.
    /// Los filtros se aplican después de derivar: `flagged_only` depende
    /// de la severidad calculada.
    pub async fn list(&self, filters: VehicleFilters) -> Result<Vec<VehicleResponse>, AppError> {
        let now = Utc::now();
        let vehicles = self.store.list_vehicles().await;

        let mut responses: Vec<VehicleResponse> = vehicles
            .into_iter()
            .filter(|v| match filters.status.as_deref() {
                Some(status) => v.availability_status.as_str() == status,
                None => true,
            })
            .map(|v| {
                let stage = resolve_stage(&v);
                let duration = seconds_in_stage(stage, &v.stage_timestamps, now);
                let severity = classify(stage, duration);
                VehicleResponse::from_vehicle(v, stage, duration, severity)
            })
            .collect();

        if filters.flagged_only.unwrap_or(false) {
            responses.retain(|r| r.severity != Severity::Ok);
        }

        let offset = filters.offset.unwrap_or(0);
        let responses: Vec<VehicleResponse> = responses
            .into_iter()
            .skip(offset)
            .take(filters.limit.unwrap_or(usize::MAX))
            .collect();

        Ok(responses)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<VehicleResponse, AppError> {
        let now = Utc::now();
        let vehicle = self
            .store
            .get_vehicle(id)
            .await
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        let stage = resolve_stage(&vehicle);
        let duration = seconds_in_stage(stage, &vehicle.stage_timestamps, now);
        let severity = classify(stage, duration);

        Ok(VehicleResponse::from_vehicle(vehicle, stage, duration, severity))
    }

    pub async fn update_status(
        &self,
        id: &str,
        request: UpdateVehicleStatusRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let status = AvailabilityStatus::parse(&request.availability_status).ok_or_else(|| {
            bad_request_error(&format!(
                "Unknown availability status '{}'",
                request.availability_status
            ))
        })?;

        let now = Utc::now();
        let vehicle = self.store.update_vehicle_status(id, status, now).await?;

        let stage = resolve_stage(&vehicle);
        let duration = seconds_in_stage(stage, &vehicle.stage_timestamps, now);
        let severity = classify(stage, duration);

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from_vehicle(vehicle, stage, duration, severity),
            "Vehicle status updated".to_string(),
        ))
    }
}
