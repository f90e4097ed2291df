mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::cors_middleware_with_origins;
use repositories::reminder_state_repository::ReminderStateRepository;
use repositories::vehicle_repository::VehicleRepository;
use services::reminder_scheduler::ReminderScheduler;
use state::AppState;

/// Tiempo máximo que se espera a que el scan en vuelo termine en el shutdown
const SCHEDULER_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚗 AutoCare Backend - Recordatorios de Servicio");
    info!("===============================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();
    database::connection::run_migrations(&pool).await?;

    // Lanzar el scheduler de recordatorios en background
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = ReminderScheduler::new(
        VehicleRepository::new(pool.clone()),
        ReminderStateRepository::new(pool.clone()),
        &config,
    );
    let scheduler_handle = tokio::spawn(scheduler.run(shutdown_rx));

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/test", get(test_endpoint))
        .nest("/notification", routes::notification_routes::create_notification_router())
        .nest("/vehicle", routes::vehicle_routes::create_vehicle_router())
        .layer(cors_middleware_with_origins(config.cors_origins.clone()))
        .with_state(app_state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🔔 Endpoints - Notification:");
    info!("   GET    /notification/:user_id - Listar notificaciones (recientes primero)");
    info!("   PUT    /notification/read/:id - Marcar notificación leída");
    info!("   PUT    /notification/read-all/:user_id - Marcar todas leídas");
    info!("   DELETE /notification/clear/:user_id - Borrar todas");
    info!("🚗 Endpoints - Vehicle:");
    info!("   GET  /vehicle/:id/status - Estado de servicio derivado");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Avisar al scheduler y esperar (acotado) a que el scan en vuelo termine
    let _ = shutdown_tx.send(true);
    if tokio::time::timeout(SCHEDULER_SHUTDOWN_TIMEOUT, scheduler_handle)
        .await
        .is_err()
    {
        warn!("⏰ El scheduler no terminó dentro del timeout de shutdown");
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "AutoCare backend funcionando correctamente",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
