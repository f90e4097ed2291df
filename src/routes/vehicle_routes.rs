use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::VehicleStatusResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new().route("/:id/status", get(get_vehicle_status))
}

async fn get_vehicle_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleStatusResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone(), &state.config);
    let response = controller.get_status(id).await?;
    Ok(Json(response))
}
