use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info, warn};

use menuboard_api::{build_router, AppState};
use menuboard_core::repositories::ContentGenerator;
use menuboard_infrastructure::{FileMenuRepository, FsImageRepository, OpenAiCompatClient};
use menuboard_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    menuboard_shared::telemetry::init_telemetry();

    info!("Menu board server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if !config.auth.is_configured() {
        warn!("Admin password or JWT secret missing: login and publishing are disabled");
    }

    let menu_repo = Arc::new(FileMenuRepository::new(config.storage.data_path.clone()));
    info!("Menu document stored at {:?}", menu_repo.path());

    let image_repo = Arc::new(FsImageRepository::new(config.storage.uploads_dir.clone()));

    let generator: Option<Arc<dyn ContentGenerator>> = match OpenAiCompatClient::from_settings(&config.ai) {
        Some(client) => Some(Arc::new(client)),
        None => {
            warn!("AI client disabled: api key is missing");
            None
        }
    };

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));

    let state = AppState::new(config, menu_repo, image_repo, generator);
    let app = build_router(state);

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
