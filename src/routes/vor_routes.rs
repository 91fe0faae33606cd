use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::vor_controller::VorController;
use crate::dto::vor_dto::{VorQuery, VorResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vor_router() -> Router<AppState> {
    Router::new().route("/", get(list_flagged))
}

async fn list_flagged(
    State(state): State<AppState>,
    Query(query): Query<VorQuery>,
) -> Result<Json<VorResponse>, AppError> {
    let controller = VorController::new(state.fleet.clone());
    let response = controller.flagged(query).await?;
    Ok(Json(response))
}
