//! Repositorio de vehículos
//!
//! El motor de recordatorios solo LEE de esta tabla: el CRUD de vehículos
//! pertenece a la capa de API externa. La paginación por keyset acota la
//! memoria del scan incluso con flotas muy grandes.

use crate::models::vehicle::Vehicle;
use crate::services::reminder_scheduler::VehicleSource;
use crate::utils::errors::{AppError, ScanError};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Página de vehículos activos pendientes de chequeo, ordenados por id.
    /// Devuelve el cursor para la página siguiente, o None al agotar la flota.
    pub async fn list_needing_check(
        &self,
        cursor: Option<Uuid>,
        limit: i64,
    ) -> Result<(Vec<Vehicle>, Option<Uuid>), sqlx::Error> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE vehicle_status = 'active'
              AND ($1::uuid IS NULL OR id > $1)
            ORDER BY id
            LIMIT $2
            "#,
        )
        .bind(cursor)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let next_cursor = if vehicles.len() as i64 == limit {
            vehicles.last().map(|v| v.id)
        } else {
            None
        };

        Ok((vehicles, next_cursor))
    }
}

#[async_trait]
impl VehicleSource for VehicleRepository {
    async fn list_needing_check(
        &self,
        cursor: Option<Uuid>,
        limit: i64,
    ) -> Result<(Vec<Vehicle>, Option<Uuid>), ScanError> {
        VehicleRepository::list_needing_check(self, cursor, limit)
            .await
            .map_err(|e| ScanError::RepositoryUnavailable(e.to_string()))
    }
}
