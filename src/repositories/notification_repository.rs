//! Repositorio de notificaciones
//!
//! Camino de lectura consumido por la capa de API. La creación de
//! notificaciones vive en reminder_state_repository (dentro de la misma
//! transacción que el avance de estado); aquí solo se listan y se mutan
//! los flags de lectura, que el scheduler jamás toca.

use crate::models::notification::Notification;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;

pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Notificaciones de un usuario, más recientes primero
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Marcar una notificación como leída. Idempotente: marcar una ya
    /// leída no es un error.
    pub async fn mark_read(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE notifications SET read = true WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Notification", &id.to_string()));
        }

        Ok(())
    }

    /// Marcar todas las notificaciones de un usuario como leídas
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE notifications SET read = true WHERE user_id = $1 AND read = false",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Borrar todas las notificaciones de un usuario
    pub async fn clear_all(&self, user_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM notifications WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
