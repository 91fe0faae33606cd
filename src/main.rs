use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;

use fleet_dashboard::config::environment::EnvironmentConfig;
use fleet_dashboard::create_app;
use fleet_dashboard::database::connection::seed_reports;
use fleet_dashboard::database::DatabaseConnection;
use fleet_dashboard::repositories::fleet_repository::{seed_fleet, InMemoryFleetRepository};
use fleet_dashboard::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Fleet Operations Dashboard - API");
    info!("===================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos de informes
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    let pool = db_connection.pool().clone();

    // Sembrar el store de flota y el fichero de informes
    let (vehicles, agreements) = seed_fleet();
    seed_reports(&pool, &vehicles, &agreements).await?;
    let fleet = Arc::new(InMemoryFleetRepository::new(vehicles, agreements));
    info!("✅ Fleet store y base de informes sembrados");

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone(), fleet);
    let app = create_app(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET   /health - Health check");
    info!("🚗 Endpoints - Vehicle:");
    info!("   GET   /api/vehicle - Listar vehículos con derivación de etapa");
    info!("   GET   /api/vehicle/:id - Obtener vehículo");
    info!("   PATCH /api/vehicle/:id/status - Actualizar estado de disponibilidad");
    info!("📋 Endpoints - Agreement:");
    info!("   GET   /api/agreement - Listar contratos");
    info!("   GET   /api/agreement/:id - Obtener contrato");
    info!("🚧 Endpoints - VOR:");
    info!("   GET   /api/vor - Vehículos marcados, ordenados por urgencia");
    info!("📊 Endpoints - Analytics:");
    info!("   GET   /api/analytics/compliance - Resumen de compliance");
    info!("📤 Endpoints - Export:");
    info!("   GET   /api/export?type=&format= - Export CSV / payload PDF");

    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok::<(), anyhow::Error>(())
    });

    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
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
