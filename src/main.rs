use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use recipe_reformat::{
    config::Config,
    api::routes::create_router,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;

    let app_state = AppState::new(config)?;
    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    tracing::info!(%server_addr, "parse service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
