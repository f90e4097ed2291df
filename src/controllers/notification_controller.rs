//! Controller de notificaciones
//!
//! Camino de lectura de la API: listar, marcar leídas y limpiar. El
//! scheduler crea las notificaciones pero jamás pasa por acá; este
//! controller jamás crea notificaciones.

use crate::dto::notification_dto::{ApiResponse, NotificationResponse};
use crate::repositories::notification_repository::NotificationRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct NotificationController {
    repository: NotificationRepository,
}

impl NotificationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: NotificationRepository::new(pool),
        }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<NotificationResponse>, AppError> {
        let notifications = self.repository.list_for_user(user_id).await?;

        let response = notifications
            .into_iter()
            .map(|n| NotificationResponse {
                id: n.id,
                user_id: n.user_id,
                vehicle_id: n.vehicle_id,
                threshold: n.threshold,
                message: n.message,
                read: n.read,
                created_at: n.created_at,
            })
            .collect();

        Ok(response)
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        self.repository.mark_read(id).await?;
        Ok(ApiResponse::message_only(
            "Notificación marcada como leída".to_string(),
        ))
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let updated = self.repository.mark_all_read(user_id).await?;
        Ok(ApiResponse::message_only(format!(
            "{} notificaciones marcadas como leídas",
            updated
        )))
    }

    pub async fn clear_all(&self, user_id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let deleted = self.repository.clear_all(user_id).await?;
        Ok(ApiResponse::message_only(format!(
            "{} notificaciones eliminadas",
            deleted
        )))
    }
}
