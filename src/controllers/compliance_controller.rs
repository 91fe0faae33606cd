use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::dto::compliance_dto::ComplianceQuery;
use crate::models::compliance::ComplianceSummary;
use crate::repositories::fleet_repository::FleetRepository;
use crate::services::compliance_service::summarize;
use crate::utils::errors::AppError;

pub struct ComplianceController {
    store: Arc<dyn FleetRepository>,
    default_window_days: i64,
}

impl ComplianceController {
    pub fn new(store: Arc<dyn FleetRepository>, default_window_days: i64) -> Self {
        Self {
            store,
            default_window_days,
        }
    }

    pub async fn summary(&self, query: ComplianceQuery) -> Result<ComplianceSummary, AppError> {
        query.validate()?;
        let window_days = query.window_days.unwrap_or(self.default_window_days);

        let agreements = self.store.list_agreements().await;
        Ok(summarize(&agreements, Utc::now(), window_days))
    }
}
