use database::db::create_connection;
use log::{error, info};
use server::{app, config::ServerConfig, state::AppState, utils::shutdown::shutdown_signal};
use std::error::Error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    if let Err(e) = run().await {
        error!("Server failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;
    let db = create_connection(&config.database).await?;
    let app = app(AppState::new(db, config.max_results_per_page));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
