use product_catalog::prelude::*;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    init_tracing(&config)?;

    info!(
        "Starting {} ({})",
        config.service.name, config.service.environment
    );

    // The store lives for the whole process and is shared through the state
    let state = AppState::new(config.clone());
    let app = router(state);

    Server::new(config).serve(app).await
}
