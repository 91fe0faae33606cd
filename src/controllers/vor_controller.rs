use chrono::Utc;
use std::sync::Arc;

use crate::dto::vor_dto::{VorQuery, VorResponse};
use crate::repositories::fleet_repository::FleetRepository;
use crate::services::vor_service::aggregate;
use crate::utils::errors::AppError;

pub struct VorController {
    store: Arc<dyn FleetRepository>,
}

impl VorController {
    pub fn new(store: Arc<dyn FleetRepository>) -> Self {
        Self { store }
    }

    /// Agregado VOR de toda la flota. El truncado top-N es decisión del
    /// consumidor; el conteo devuelto es siempre el total marcado.
    pub async fn flagged(&self, query: VorQuery) -> Result<VorResponse, AppError> {
        let now = Utc::now();
        let vehicles = self.store.list_vehicles().await;

        let mut flagged = aggregate(&vehicles, now);
        let flagged_count = flagged.len();

        if let Some(top) = query.top {
            flagged.truncate(top);
        }

        Ok(VorResponse {
            flagged_count,
            vehicles: flagged,
        })
    }
}
