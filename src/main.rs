//! ZenFlow Event Platform
//!
//! Main application entry point

use tracing::info;

use ZenFlow::{
    config::Settings,
    database::{connection::create_pool, connection::run_migrations, DatabaseService},
    handlers::{create_router, AppState},
    services::ServiceFactory,
    utils::logging,
    wizard::RedisDraftStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the server
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", ZenFlow::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&settings.database).await?;

    run_migrations(&db_pool).await?;

    // Initialize Redis draft storage
    info!("Connecting to Redis...");
    let drafts = RedisDraftStorage::new(settings.redis.clone()).await?;
    drafts.test_connection().await?;

    // Initialize services
    info!("Initializing services...");
    let database_service = DatabaseService::new(db_pool.clone());
    let services = ServiceFactory::new(&database_service, settings.clone());

    let state = AppState {
        services,
        db_pool,
        drafts,
        settings: settings.clone(),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("ZenFlow listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    info!("ZenFlow has been shut down.");

    Ok(())
}
