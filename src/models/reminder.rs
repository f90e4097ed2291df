//! Modelo de recordatorios de servicio
//!
//! Este módulo contiene el enum ReminderThreshold (niveles de urgencia)
//! y el struct ReminderState que mapea a la tabla reminder_states.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Nivel de urgencia de un recordatorio, ordenado de menor a mayor urgencia.
///
/// El orden de las variantes es significativo: un recordatorio solo se
/// dispara cuando la urgencia aumenta estrictamente dentro del mismo ciclo
/// de servicio (None → Upcoming → Due7 → Due3 → Overdue).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReminderThreshold {
    /// Sin umbral registrado todavía
    None,
    /// Faltan más de 7 días para el próximo servicio
    Upcoming,
    /// Faltan entre 4 y 7 días
    Due7,
    /// Faltan entre 0 y 3 días
    Due3,
    /// La fecha de servicio ya pasó
    Overdue,
}

impl ReminderThreshold {
    /// Representación textual estable, usada como columna TEXT en Postgres
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderThreshold::None => "none",
            ReminderThreshold::Upcoming => "upcoming",
            ReminderThreshold::Due7 => "due_7",
            ReminderThreshold::Due3 => "due_3",
            ReminderThreshold::Overdue => "overdue",
        }
    }

    /// Rango numérico de urgencia, espejado en la columna last_notified_rank
    /// para que Postgres pueda comparar urgencias dentro del upsert condicional
    pub fn rank(&self) -> i16 {
        match self {
            ReminderThreshold::None => 0,
            ReminderThreshold::Upcoming => 1,
            ReminderThreshold::Due7 => 2,
            ReminderThreshold::Due3 => 3,
            ReminderThreshold::Overdue => 4,
        }
    }

    /// Parsear desde la representación de base de datos.
    /// Un valor desconocido se trata como None (baseline más bajo).
    pub fn parse(value: &str) -> Self {
        match value {
            "upcoming" => ReminderThreshold::Upcoming,
            "due_7" => ReminderThreshold::Due7,
            "due_3" => ReminderThreshold::Due3,
            "overdue" => ReminderThreshold::Overdue,
            _ => ReminderThreshold::None,
        }
    }

    /// Etiqueta visible para el usuario (misma que usa el badge del frontend)
    pub fn label(&self) -> &'static str {
        match self {
            ReminderThreshold::None => "No service scheduled",
            ReminderThreshold::Upcoming => "Upcoming",
            ReminderThreshold::Due7 => "Service in 7 days",
            ReminderThreshold::Due3 => "Service in 3 days",
            ReminderThreshold::Overdue => "Overdue",
        }
    }

    /// Texto de la notificación que se materializa para el propietario
    pub fn message(&self, license_plate: &str, next_service_date: NaiveDate) -> String {
        match self {
            ReminderThreshold::Overdue => format!(
                "Service overdue for {}: it was scheduled for {}",
                license_plate, next_service_date
            ),
            ReminderThreshold::Due3 => format!(
                "Service due in 3 days or less for {}: scheduled for {}",
                license_plate, next_service_date
            ),
            ReminderThreshold::Due7 => format!(
                "Service due within 7 days for {}: scheduled for {}",
                license_plate, next_service_date
            ),
            ReminderThreshold::Upcoming | ReminderThreshold::None => format!(
                "Upcoming service for {}: scheduled for {}",
                license_plate, next_service_date
            ),
        }
    }
}

/// Estado de recordatorio por vehículo - mapea a la tabla reminder_states.
///
/// Una fila por vehículo: registra el último umbral ya notificado y la
/// clave del ciclo de servicio (la last_service_date vigente). Si la clave
/// cambia, el propietario hizo el servicio y empieza un ciclo nuevo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReminderState {
    pub vehicle_id: Uuid,
    pub last_notified_threshold: String,
    pub last_notified_rank: i16,
    pub service_cycle_key: NaiveDate,
    pub updated_at: DateTime<Utc>,
}

impl ReminderState {
    pub fn threshold(&self) -> ReminderThreshold {
        ReminderThreshold::parse(&self.last_notified_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_ordering() {
        assert!(ReminderThreshold::None < ReminderThreshold::Upcoming);
        assert!(ReminderThreshold::Upcoming < ReminderThreshold::Due7);
        assert!(ReminderThreshold::Due7 < ReminderThreshold::Due3);
        assert!(ReminderThreshold::Due3 < ReminderThreshold::Overdue);
    }

    #[test]
    fn test_rank_follows_ordering() {
        let all = [
            ReminderThreshold::None,
            ReminderThreshold::Upcoming,
            ReminderThreshold::Due7,
            ReminderThreshold::Due3,
            ReminderThreshold::Overdue,
        ];
        for pair in all.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn test_parse_roundtrip() {
        for t in [
            ReminderThreshold::None,
            ReminderThreshold::Upcoming,
            ReminderThreshold::Due7,
            ReminderThreshold::Due3,
            ReminderThreshold::Overdue,
        ] {
            assert_eq!(ReminderThreshold::parse(t.as_str()), t);
        }
        // Valores desconocidos caen al baseline más bajo
        assert_eq!(ReminderThreshold::parse("garbage"), ReminderThreshold::None);
    }

    #[test]
    fn test_message_mentions_plate_and_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let msg = ReminderThreshold::Overdue.message("AB-123-CD", date);
        assert!(msg.contains("AB-123-CD"));
        assert!(msg.contains("2026-03-15"));
        assert!(msg.contains("overdue"));
    }
}
