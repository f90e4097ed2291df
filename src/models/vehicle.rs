//! Modelo de Vehicle
//!
//! Mapea a la tabla vehicles del schema PostgreSQL. El motor de
//! recordatorios solo LEE este modelo; el CRUD de vehículos vive en la
//! capa de API externa y nunca pasa por el scheduler.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - una fila por vehículo registrado por un propietario
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub license_plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    /// Fecha del último servicio registrado; también es la clave del ciclo
    /// de servicio vigente (ver reminder_states.service_cycle_key)
    pub last_service_date: NaiveDate,
    /// Intervalo de recordatorio en meses; NULL usa el default de configuración
    pub reminder_months: Option<i32>,
    pub vehicle_status: String,
    pub created_at: DateTime<Utc>,
}
