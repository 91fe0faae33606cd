use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::agreement_controller::AgreementController;
use crate::dto::agreement_dto::{AgreementFilters, AgreementResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_agreement_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_agreements))
        .route("/:id", get(get_agreement))
}

async fn list_agreements(
    State(state): State<AppState>,
    Query(filters): Query<AgreementFilters>,
) -> Result<Json<Vec<AgreementResponse>>, AppError> {
    let controller = AgreementController::new(state.fleet.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_agreement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AgreementResponse>, AppError> {
    let controller = AgreementController::new(state.fleet.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}
