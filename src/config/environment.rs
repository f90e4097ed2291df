//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y las perillas del
//! motor de recordatorios. Todas las variables del scheduler tienen
//! defaults razonables; solo DATABASE_URL es obligatoria (la consume
//! database::connection directamente).

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Cadencia del scan de recordatorios en segundos (default: diario)
    pub scan_interval_secs: u64,
    /// Días antes del próximo servicio para el umbral "due soon" (default 3)
    pub reminder_due_soon_days: i64,
    /// Días antes del próximo servicio para el umbral "upcoming" (default 7)
    pub reminder_upcoming_days: i64,
    /// Meses de intervalo de servicio cuando el vehículo no define uno
    pub default_reminder_months: i32,
    /// Tamaño de página al recorrer la flota durante un scan
    pub scan_batch_size: i64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            scan_interval_secs: env::var("SCAN_INTERVAL_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .expect("SCAN_INTERVAL_SECS must be a valid number"),
            reminder_due_soon_days: env::var("REMINDER_DUE_SOON_DAYS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .expect("REMINDER_DUE_SOON_DAYS must be a valid number"),
            reminder_upcoming_days: env::var("REMINDER_UPCOMING_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .expect("REMINDER_UPCOMING_DAYS must be a valid number"),
            default_reminder_months: env::var("DEFAULT_REMINDER_MONTHS")
                .unwrap_or_else(|_| "6".to_string())
                .parse()
                .expect("DEFAULT_REMINDER_MONTHS must be a valid number"),
            scan_batch_size: env::var("SCAN_BATCH_SIZE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .expect("SCAN_BATCH_SIZE must be a valid number"),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
