//! Repositorio del estado de recordatorios
//!
//! Una fila por vehículo con el último umbral ya notificado. La transición
//! de estado y la inserción de la notificación ocurren en la misma
//! transacción: o se aplican juntas o ninguna, y el upsert condicional
//! garantiza como máximo una notificación por umbral por ciclo aunque dos
//! scans llegaran a solaparse.

use crate::models::reminder::{ReminderState, ReminderThreshold};
use crate::models::vehicle::Vehicle;
use crate::services::reminder_scheduler::ReminderSink;
use crate::utils::errors::ScanError;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct ReminderStateRepository {
    pool: PgPool,
}

impl ReminderStateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_state(&self, vehicle_id: Uuid) -> Result<Option<ReminderState>, sqlx::Error> {
        sqlx::query_as::<_, ReminderState>(
            "SELECT * FROM reminder_states WHERE vehicle_id = $1",
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Avanzar el estado del vehículo al umbral dado y materializar la
    /// notificación correspondiente, atómicamente.
    ///
    /// El upsert solo aplica cuando el ciclo de servicio cambió o la
    /// urgencia aumenta estrictamente; si otra pasada ya registró un umbral
    /// igual o más urgente para el mismo ciclo, no inserta nada y devuelve
    /// false.
    pub async fn record_transition(
        &self,
        vehicle: &Vehicle,
        threshold: ReminderThreshold,
        cycle_key: NaiveDate,
        next_service_date: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let advanced: Option<(Uuid,)> = sqlx::query_as(
            r#"
            INSERT INTO reminder_states
                (vehicle_id, last_notified_threshold, last_notified_rank, service_cycle_key, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (vehicle_id) DO UPDATE SET
                last_notified_threshold = EXCLUDED.last_notified_threshold,
                last_notified_rank = EXCLUDED.last_notified_rank,
                service_cycle_key = EXCLUDED.service_cycle_key,
                updated_at = EXCLUDED.updated_at
            WHERE reminder_states.service_cycle_key IS DISTINCT FROM EXCLUDED.service_cycle_key
               OR reminder_states.last_notified_rank < EXCLUDED.last_notified_rank
            RETURNING vehicle_id
            "#,
        )
        .bind(vehicle.id)
        .bind(threshold.as_str())
        .bind(threshold.rank())
        .bind(cycle_key)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?;

        if advanced.is_none() {
            // Otra pasada ganó la carrera para este umbral
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, vehicle_id, threshold, message, read, created_at)
            VALUES ($1, $2, $3, $4, $5, false, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle.owner_id)
        .bind(vehicle.id)
        .bind(threshold.as_str())
        .bind(threshold.message(&vehicle.license_plate, next_service_date))
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}

#[async_trait]
impl ReminderSink for ReminderStateRepository {
    async fn get_state(&self, vehicle_id: Uuid) -> Result<Option<ReminderState>, ScanError> {
        ReminderStateRepository::get_state(self, vehicle_id)
            .await
            .map_err(|e| ScanError::TransientStore(e.to_string()))
    }

    async fn record_transition(
        &self,
        vehicle: &Vehicle,
        threshold: ReminderThreshold,
        cycle_key: NaiveDate,
        next_service_date: NaiveDate,
    ) -> Result<bool, ScanError> {
        ReminderStateRepository::record_transition(self, vehicle, threshold, cycle_key, next_service_date)
            .await
            .map_err(|e| ScanError::TransientStore(e.to_string()))
    }
}
