use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Router,
};

use crate::controllers::export_controller::ExportController;
use crate::dto::export_dto::ExportQuery;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_export_router() -> Router<AppState> {
    Router::new().route("/", get(export_report))
}

async fn export_report(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let controller = ExportController::new(state.pool.clone());
    controller.export(query).await
}
