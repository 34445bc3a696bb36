use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use showroom::clients::SubmissionClient;
use showroom::config::EnvironmentConfig;
use showroom::repositories::vehicle_repository::VehicleRepository;
use showroom::routes::create_app_router;
use showroom::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Configure logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("showroom=debug,tower_http=info")),
        )
        .init();

    info!("🚗 Showroom - Sales & Rentals API");
    info!("================================");

    // Read configuration
    let config = EnvironmentConfig::from_env()?;
    info!("⚙️  Environment: {}", config.environment);

    // Load the vehicle catalog
    let catalog = match VehicleRepository::load(config.catalog_path.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("❌ Error loading the vehicle catalog: {}", e);
            return Err(anyhow::anyhow!("Catalog error: {}", e));
        }
    };

    // Client for the lead submission service
    let submissions =
        SubmissionClient::new(config.submission_base_url.clone(), config.submission_timeout)?;
    info!("📨 Forms forwarded to {}", submissions.base_url());

    // Build the API router
    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app_router(AppState::new(config, catalog, submissions));

    info!("🌐 Server starting on http://{}", addr);
    info!("🔍 Available endpoints:");
    info!("   GET  /health - Health check");
    info!("🚙 Catalog:");
    info!("   GET  /api/vehicles - Search sale or rental catalog");
    info!("   GET  /api/vehicles/makes - Makes for the make selector");
    info!("   GET  /api/vehicles/featured - Featured vehicles");
    info!("   GET  /api/vehicles/:id - Vehicle detail");
    info!("📝 Forms:");
    info!("   POST /api/contact - Contact form");
    info!("   POST /api/enquiries - Vehicle enquiry");
    info!("   POST /api/rental-applications - Rental application");

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Server error: {}", e);
        return Err(e.into());
    }

    info!("👋 Server stopped");
    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Termination signal received, shutting down...");
        },
    }
}
