use crate::controllers::notification_controller::NotificationController;
use crate::dto::notification_dto::{ApiResponse, NotificationResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use uuid::Uuid;

// TODO: extraer user_id del JWT cuando la capa de auth externa exponga el
// middleware; por ahora el user_id viaja en el path
pub fn create_notification_router() -> Router<AppState> {
    Router::new()
        .route("/:user_id", get(list_notifications))
        .route("/read/:id", put(mark_notification_read))
        .route("/read-all/:user_id", put(mark_all_notifications_read))
        .route("/clear/:user_id", delete(clear_notifications))
}

async fn list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<NotificationResponse>>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.list(user_id).await?;
    Ok(Json(response))
}

async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.mark_read(id).await?;
    Ok(Json(response))
}

async fn mark_all_notifications_read(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.mark_all_read(user_id).await?;
    Ok(Json(response))
}

async fn clear_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.clear_all(user_id).await?;
    Ok(Json(response))
}
