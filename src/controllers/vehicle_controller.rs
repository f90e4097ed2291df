//! Controller de vehículos
//!
//! Solo expone la vista derivada de estado de servicio. El CRUD de
//! vehículos pertenece a la capa externa y no pasa por este backend.

use crate::config::environment::EnvironmentConfig;
use crate::dto::vehicle_dto::VehicleStatusResponse;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::status_calculator::{compute_status, ReminderWindows};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct VehicleController {
    repository: VehicleRepository,
    windows: ReminderWindows,
    default_reminder_months: i32,
}

impl VehicleController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
            windows: ReminderWindows {
                due_soon_days: config.reminder_due_soon_days,
                upcoming_days: config.reminder_upcoming_days,
            },
            default_reminder_months: config.default_reminder_months,
        }
    }

    /// Estado de servicio derivado: el mismo cálculo de fechas que usa el
    /// scheduler, reproducible porque no depende de estado guardado
    pub async fn get_status(&self, id: Uuid) -> Result<VehicleStatusResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let months = vehicle.reminder_months.unwrap_or(self.default_reminder_months);
        let status = compute_status(
            vehicle.last_service_date,
            months,
            Utc::now().date_naive(),
            self.windows,
        )
        .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(VehicleStatusResponse {
            vehicle_id: vehicle.id,
            license_plate: vehicle.license_plate,
            last_service_date: vehicle.last_service_date,
            next_service_date: status.next_service_date,
            days_until: status.days_until,
            threshold: status.threshold.as_str().to_string(),
            status_label: status.threshold.label().to_string(),
        })
    }
}
