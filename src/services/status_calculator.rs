//! Calculadora de estado de servicio
//!
//! Función pura y sin efectos: dada la fecha del último servicio y el
//! intervalo de recordatorio, deriva la próxima fecha de servicio y
//! clasifica el vehículo en un umbral de urgencia. Determinista dado
//! `today`, así los tests pasan fechas fijas sin inyectar relojes.

use crate::models::reminder::ReminderThreshold;
use crate::utils::errors::ScanError;
use chrono::{Months, NaiveDate};

/// Ventanas de días que delimitan los umbrales (configurables por entorno)
#[derive(Debug, Clone, Copy)]
pub struct ReminderWindows {
    pub due_soon_days: i64,
    pub upcoming_days: i64,
}

impl Default for ReminderWindows {
    fn default() -> Self {
        Self {
            due_soon_days: 3,
            upcoming_days: 7,
        }
    }
}

/// Resultado de la clasificación de un vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceStatus {
    pub next_service_date: NaiveDate,
    pub threshold: ReminderThreshold,
    pub days_until: i64,
}

/// Derivar la próxima fecha de servicio y el umbral vigente.
///
/// La fecha se desplaza `reminder_months` meses de calendario; si el día
/// desborda el mes destino, se fija al último día válido (Jan 31 + 1 mes
/// → Feb 28/29). `next_service_date` nunca se almacena: siempre se
/// recalcula desde sus dos entradas.
pub fn compute_status(
    last_service_date: NaiveDate,
    reminder_months: i32,
    today: NaiveDate,
    windows: ReminderWindows,
) -> Result<ServiceStatus, ScanError> {
    if reminder_months <= 0 {
        return Err(ScanError::InvalidInput(format!(
            "reminder_months must be positive, got {}",
            reminder_months
        )));
    }

    let next_service_date = last_service_date
        .checked_add_months(Months::new(reminder_months as u32))
        .ok_or_else(|| {
            ScanError::InvalidInput(format!(
                "next service date out of range for {} + {} months",
                last_service_date, reminder_months
            ))
        })?;

    let days_until = (next_service_date - today).num_days();

    Ok(ServiceStatus {
        next_service_date,
        threshold: classify_days(days_until, windows),
        days_until,
    })
}

/// Clasificar días restantes en un umbral.
///
/// El día 0 (servicio hoy) cuenta como Due3, igual que la cadena
/// `daysLeft < 0 / <= 3 / <= 7` del badge del frontend.
pub fn classify_days(days_until: i64, windows: ReminderWindows) -> ReminderThreshold {
    if days_until < 0 {
        ReminderThreshold::Overdue
    } else if days_until <= windows.due_soon_days {
        ReminderThreshold::Due3
    } else if days_until <= windows.upcoming_days {
        ReminderThreshold::Due7
    } else {
        ReminderThreshold::Upcoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_service_date_plain_add() {
        let status = compute_status(date(2026, 1, 15), 6, date(2026, 1, 15), ReminderWindows::default()).unwrap();
        assert_eq!(status.next_service_date, date(2026, 7, 15));
    }

    #[test]
    fn test_month_end_clamps_to_february() {
        let status = compute_status(date(2026, 1, 31), 1, date(2026, 1, 31), ReminderWindows::default()).unwrap();
        assert_eq!(status.next_service_date, date(2026, 2, 28));
    }

    #[test]
    fn test_month_end_clamps_to_leap_february() {
        let status = compute_status(date(2024, 1, 31), 1, date(2024, 1, 31), ReminderWindows::default()).unwrap();
        assert_eq!(status.next_service_date, date(2024, 2, 29));
    }

    #[test]
    fn test_zero_months_is_invalid_input() {
        let err = compute_status(date(2026, 1, 1), 0, date(2026, 1, 1), ReminderWindows::default()).unwrap_err();
        assert!(matches!(err, ScanError::InvalidInput(_)));
    }

    #[test]
    fn test_negative_months_is_invalid_input() {
        let err = compute_status(date(2026, 1, 1), -3, date(2026, 1, 1), ReminderWindows::default()).unwrap_err();
        assert!(matches!(err, ScanError::InvalidInput(_)));
    }

    #[test]
    fn test_classification_boundaries() {
        let w = ReminderWindows::default();
        assert_eq!(classify_days(-1, w), ReminderThreshold::Overdue);
        assert_eq!(classify_days(0, w), ReminderThreshold::Due3);
        assert_eq!(classify_days(3, w), ReminderThreshold::Due3);
        assert_eq!(classify_days(4, w), ReminderThreshold::Due7);
        assert_eq!(classify_days(7, w), ReminderThreshold::Due7);
        assert_eq!(classify_days(8, w), ReminderThreshold::Upcoming);
        assert_eq!(classify_days(90, w), ReminderThreshold::Upcoming);
    }

    #[test]
    fn test_custom_windows() {
        let w = ReminderWindows { due_soon_days: 5, upcoming_days: 14 };
        assert_eq!(classify_days(5, w), ReminderThreshold::Due3);
        assert_eq!(classify_days(6, w), ReminderThreshold::Due7);
        assert_eq!(classify_days(14, w), ReminderThreshold::Due7);
        assert_eq!(classify_days(15, w), ReminderThreshold::Upcoming);
    }

    #[test]
    fn test_one_day_past_next_service_is_overdue() {
        // Hoy es exactamente next_service_date + 1: recién vencido
        let last = date(2026, 1, 4);
        let status = compute_status(last, 6, date(2026, 7, 5), ReminderWindows::default()).unwrap();
        assert_eq!(status.next_service_date, date(2026, 7, 4));
        assert_eq!(status.days_until, -1);
        assert_eq!(status.threshold, ReminderThreshold::Overdue);
    }

    #[test]
    fn test_days_until_is_exact() {
        let status = compute_status(date(2026, 1, 1), 6, date(2026, 6, 21), ReminderWindows::default()).unwrap();
        assert_eq!(status.next_service_date, date(2026, 7, 1));
        assert_eq!(status.days_until, 10);
        assert_eq!(status.threshold, ReminderThreshold::Upcoming);
    }
}
