use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

// Vista derivada del estado de servicio de un vehículo.
// Puramente recalculada desde last_service_date + reminder_months;
// el mismo cómputo de fechas que usa el scheduler, nunca estado guardado.
#[derive(Debug, Serialize)]
pub struct VehicleStatusResponse {
    pub vehicle_id: Uuid,
    pub license_plate: String,
    pub last_service_date: NaiveDate,
    pub next_service_date: NaiveDate,
    pub days_until: i64,
    pub threshold: String,
    pub status_label: String,
}
