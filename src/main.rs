mod config;
mod controllers;
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
use tokio::signal;
use tracing::{error, info};

use config::database::DatabaseConfig;
use config::environment::EnvironmentConfig;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🔧 Taller API - Administración de contratos y cotizaciones");
    info!("==========================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match DatabaseConfig::default().create_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Aplicar migraciones pendientes antes de aceptar tráfico
    if let Err(e) = sqlx::migrate!().run(&pool).await {
        error!("❌ Error aplicando migraciones: {}", e);
        return Err(anyhow::anyhow!("Error de migraciones: {}", e));
    }
    info!("📦 Migraciones aplicadas");

    let app_state = AppState::new(pool, config.clone());

    // Las rutas de negocio viven detrás del middleware de sesión;
    // /api/auth/login y /test quedan públicas
    let protected = Router::new()
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .nest("/api/users", routes::user_routes::create_user_router())
        .nest("/api/roles", routes::role_routes::create_role_router())
        .nest(
            "/api/permissions",
            routes::role_routes::create_permission_router(),
        )
        .nest(
            "/api/vehicles",
            routes::vehicle_routes::create_vehicle_router(),
        )
        .nest(
            "/api/services",
            routes::service_routes::create_service_router(),
        )
        .nest("/api/quotes", routes::quote_routes::create_quote_router())
        .nest(
            "/api/contracts",
            routes::contract_routes::create_contract_router(),
        )
        .nest(
            "/api/payments",
            routes::payment_routes::create_payment_router(),
        )
        .nest("/api/qr", routes::qr_routes::create_qr_router())
        .nest(
            "/api/dashboard",
            routes::dashboard_routes::create_dashboard_router(),
        )
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::auth_middleware,
        ));

    let app = Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api/auth", routes::auth_routes::create_public_auth_router())
        .merge(protected)
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🔐 Endpoints - Auth:");
    info!("   POST /api/auth/login - Iniciar sesión");
    info!("   POST /api/auth/logout - Cerrar sesión");
    info!("   GET  /api/auth/me - Sesión actual");
    info!("👥 Endpoints - Usuarios y roles:");
    info!("   POST /api/users - Crear usuario");
    info!("   GET  /api/users - Listar usuarios");
    info!("   GET  /api/users/:id - Obtener usuario");
    info!("   PUT  /api/users/:id - Actualizar usuario");
    info!("   DELETE /api/users/:id - Eliminar usuario");
    info!("   POST /api/roles - Crear rol con permisos");
    info!("   GET  /api/roles - Listar roles");
    info!("   PUT  /api/roles/:id - Actualizar rol");
    info!("   DELETE /api/roles/:id - Eliminar rol (sin usuarios)");
    info!("   GET  /api/permissions - Catálogo de permisos");
    info!("🚗 Endpoints - Vehículos y servicios:");
    info!("   POST /api/vehicles - Registrar vehículo");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   POST /api/services - Alta de servicio de catálogo");
    info!("   GET  /api/services - Listar servicios");
    info!("📋 Endpoints - Cotizaciones:");
    info!("   POST /api/quotes - Crear cotización con checklist");
    info!("   GET  /api/quotes - Listar cotizaciones");
    info!("   GET  /api/quotes/stats - Estadísticas de cotizaciones");
    info!("📄 Endpoints - Contratos:");
    info!("   POST /api/contracts - Crear contrato con partidas");
    info!("   GET  /api/contracts - Listar (filtros status/search)");
    info!("   GET  /api/contracts/stats - Conteo por estatus");
    info!("   GET  /api/contracts/:id - Contrato expandido");
    info!("💰 Endpoints - Pagos:");
    info!("   POST /api/payments - Registrar pago (recalcula estatus)");
    info!("   GET  /api/payments/contract/:id - Pagos de un contrato");
    info!("   GET  /api/payments/quote/:id - Pagos de una cotización");
    info!("🔎 Endpoints - QR y dashboard:");
    info!("   GET  /api/qr/:token - Resolver token QR a contrato");
    info!("   GET  /api/dashboard/stats - Agregado del panel");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "API del taller funcionando correctamente",
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
