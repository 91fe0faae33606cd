use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::compliance_controller::ComplianceController;
use crate::dto::compliance_dto::ComplianceQuery;
use crate::models::compliance::ComplianceSummary;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_analytics_router() -> Router<AppState> {
    Router::new().route("/compliance", get(compliance_summary))
}

async fn compliance_summary(
    State(state): State<AppState>,
    Query(query): Query<ComplianceQuery>,
) -> Result<Json<ComplianceSummary>, AppError> {
    let controller =
        ComplianceController::new(state.fleet.clone(), state.config.expiry_window_days);
    let response = controller.summary(query).await?;
    Ok(Json(response))
}
