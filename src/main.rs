//! Server: loads settings and the status catalog, creates the schema, serves the API.

use rental_backend::{apply_schema, load_catalog, router, AppState, Settings, Store};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rental_backend=info".parse()?))
        .init();

    let settings = Settings::from_env()?;
    let catalog = load_catalog(&settings).await?;
    let store = Store::connect(&settings).await?;
    apply_schema(&store, &catalog).await?;

    let bind_addr = settings.bind_addr.clone();
    let app = router(AppState::new(store, catalog, settings));

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
