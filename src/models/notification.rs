//! Modelo de Notification
//!
//! Mapea a la tabla notifications. Las notificaciones las crea únicamente
//! el motor de recordatorios; el flag de lectura lo muta únicamente la
//! capa de API (nunca el scheduler).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub threshold: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
