use std::sync::Arc;
use uuid::Uuid;

use crate::dto::agreement_dto::{AgreementFilters, AgreementResponse};
use crate::repositories::fleet_repository::FleetRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct AgreementController {
    store: Arc<dyn FleetRepository>,
}

impl AgreementController {
    pub fn new(store: Arc<dyn FleetRepository>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filters: AgreementFilters) -> Result<Vec<AgreementResponse>, AppError> {
        let agreements = self.store.list_agreements().await;

        let responses = agreements
            .into_iter()
            .filter(|a| match filters.stage.as_deref() {
                Some(stage) => a.stage.as_str() == stage,
                None => true,
            })
            .filter(|a| match filters.status.as_deref() {
                Some(status) => a.status.as_str() == status,
                None => true,
            })
            .map(AgreementResponse::from)
            .collect();

        Ok(responses)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<AgreementResponse, AppError> {
        let agreement = self
            .store
            .get_agreement(id)
            .await
            .ok_or_else(|| not_found_error("Agreement", &id.to_string()))?;

        Ok(AgreementResponse::from(agreement))
    }
}
