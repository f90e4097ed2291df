//! Scheduler de recordatorios de servicio
//!
//! Loop de orquestación en background: a cadencia fija recorre la flota
//! paginada, clasifica cada vehículo con la calculadora de estado y, si la
//! urgencia avanzó respecto del último umbral notificado, materializa la
//! notificación y avanza el estado en una sola transacción.
//!
//! Garantías:
//! - un solo scan activo a la vez (run-lock; un tick que llega durante un
//!   scan se descarta, nunca se encola)
//! - cada vehículo es un dominio de fallo aislado: datos malformados o un
//!   error transitorio de store no abortan el batch
//! - si no se puede traer el batch de vehículos, el scan completo aborta y
//!   se reintenta en el próximo tick, sin efectos parciales

use crate::config::environment::EnvironmentConfig;
use crate::models::reminder::{ReminderState, ReminderThreshold};
use crate::models::vehicle::Vehicle;
use crate::services::status_calculator::{compute_status, ReminderWindows};
use crate::utils::errors::ScanError;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::{watch, Mutex};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Reintentos ante un error transitorio de store, antes de saltar el vehículo
const MAX_STORE_RETRIES: u32 = 2;
/// Fallos de scan consecutivos que escalan a alerta de operador
const SCAN_FAILURE_ALERT_THRESHOLD: u32 = 3;

/// Fuente de vehículos a chequear (el repositorio de vehículos en producción)
#[async_trait]
pub trait VehicleSource: Send + Sync {
    async fn list_needing_check(
        &self,
        cursor: Option<Uuid>,
        limit: i64,
    ) -> Result<(Vec<Vehicle>, Option<Uuid>), ScanError>;
}

/// Destino de las transiciones de estado + notificaciones
#[async_trait]
pub trait ReminderSink: Send + Sync {
    async fn get_state(&self, vehicle_id: Uuid) -> Result<Option<ReminderState>, ScanError>;

    /// Avanzar el estado al umbral dado y materializar la notificación,
    /// atómicamente. Devuelve false si otra pasada ya registró un umbral
    /// igual o más urgente para el mismo ciclo.
    async fn record_transition(
        &self,
        vehicle: &Vehicle,
        threshold: ReminderThreshold,
        cycle_key: NaiveDate,
        next_service_date: NaiveDate,
    ) -> Result<bool, ScanError>;
}

/// Resumen de un scan, para observabilidad
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanSummary {
    /// true cuando el tick se descartó porque había un scan en curso
    pub skipped: bool,
    pub scanned: usize,
    pub notified: usize,
    pub failed: usize,
    pub duration: Duration,
}

impl ScanSummary {
    fn skipped_tick() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

pub struct ReminderScheduler<S, K> {
    source: S,
    sink: K,
    windows: ReminderWindows,
    scan_interval_secs: u64,
    batch_size: i64,
    default_reminder_months: i32,
    scan_lock: Mutex<()>,
}

impl<S: VehicleSource, K: ReminderSink> ReminderScheduler<S, K> {
    pub fn new(source: S, sink: K, config: &EnvironmentConfig) -> Self {
        Self {
            source,
            sink,
            windows: ReminderWindows {
                due_soon_days: config.reminder_due_soon_days,
                upcoming_days: config.reminder_upcoming_days,
            },
            scan_interval_secs: config.scan_interval_secs,
            batch_size: config.scan_batch_size,
            default_reminder_months: config.default_reminder_months,
            scan_lock: Mutex::new(()),
        }
    }

    /// Loop principal: un scan por tick hasta recibir la señal de shutdown.
    /// Un scan en vuelo al momento del shutdown termina entero; las
    /// transacciones por vehículo garantizan que nada queda a medio escribir.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(Duration::from_secs(self.scan_interval_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut consecutive_failures: u32 = 0;

        info!(
            "🔔 Scheduler de recordatorios iniciado (cadencia: {}s, batch: {})",
            self.scan_interval_secs, self.batch_size
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.run_scan(Utc::now().date_naive()).await {
                        Ok(_) => consecutive_failures = 0,
                        Err(e) => {
                            consecutive_failures += 1;
                            if consecutive_failures >= SCAN_FAILURE_ALERT_THRESHOLD {
                                error!(
                                    "🚨 Scan de recordatorios fallando hace {} ticks: {}",
                                    consecutive_failures, e
                                );
                            } else {
                                warn!("❌ Scan falló, se reintenta en el próximo tick: {}", e);
                            }
                        }
                    }
                }
                _ = shutdown.changed() => {
                    info!("🛑 Scheduler de recordatorios detenido");
                    break;
                }
            }
        }
    }

    /// Un scan completo de la flota. Aborta entero solo si el repositorio
    /// de vehículos no responde; los fallos por vehículo se aíslan.
    pub async fn run_scan(&self, today: NaiveDate) -> Result<ScanSummary, ScanError> {
        let _guard = match self.scan_lock.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                debug!("⏭️ Scan ya en curso, tick descartado");
                return Ok(ScanSummary::skipped_tick());
            }
        };

        let started = Instant::now();
        let mut summary = ScanSummary::default();
        let mut cursor: Option<Uuid> = None;

        loop {
            let (vehicles, next_cursor) =
                self.source.list_needing_check(cursor, self.batch_size).await?;

            for vehicle in &vehicles {
                summary.scanned += 1;
                match self.check_vehicle(vehicle, today).await {
                    Ok(true) => summary.notified += 1,
                    Ok(false) => {}
                    Err(e) => {
                        summary.failed += 1;
                        warn!("⚠️ Vehículo {} omitido en el scan: {}", vehicle.id, e);
                    }
                }
            }

            cursor = next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        summary.duration = started.elapsed();
        info!(
            "✅ Scan completado: {} vehículos, {} notificaciones, {} omitidos en {:?}",
            summary.scanned, summary.notified, summary.failed, summary.duration
        );
        Ok(summary)
    }

    /// Chequear un vehículo: clasificar, comparar contra el último umbral
    /// notificado y, si la urgencia avanzó estrictamente, registrar la
    /// transición. Devuelve true si se emitió una notificación.
    async fn check_vehicle(&self, vehicle: &Vehicle, today: NaiveDate) -> Result<bool, ScanError> {
        let months = vehicle.reminder_months.unwrap_or(self.default_reminder_months);
        let status = compute_status(vehicle.last_service_date, months, today, self.windows)?;

        // La clave de ciclo es la last_service_date vigente: si cambió, el
        // propietario hizo el servicio y el baseline vuelve a None
        let cycle_key = vehicle.last_service_date;
        let state = self.with_retry(|| self.sink.get_state(vehicle.id)).await?;
        let baseline = match &state {
            Some(s) if s.service_cycle_key == cycle_key => s.threshold(),
            _ => ReminderThreshold::None,
        };

        if status.threshold > baseline {
            let advanced = self
                .with_retry(|| {
                    self.sink.record_transition(
                        vehicle,
                        status.threshold,
                        cycle_key,
                        status.next_service_date,
                    )
                })
                .await?;
            Ok(advanced)
        } else {
            Ok(false)
        }
    }

    /// Reintento acotado para errores transitorios de store; cualquier otro
    /// error corta de inmediato.
    async fn with_retry<T, F, Fut>(&self, mut op: F) -> Result<T, ScanError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ScanError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match op().await {
                Err(ScanError::TransientStore(msg)) if attempt < MAX_STORE_RETRIES => {
                    attempt += 1;
                    warn!(
                        "⏳ Error transitorio de store (reintento {}/{}): {}",
                        attempt, MAX_STORE_RETRIES, msg
                    );
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                }
                other => return other,
            }
        }
    }
}
