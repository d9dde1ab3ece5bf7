use ragrafika_core::telemetry::init_telemetry;
use ragrafika_redirect::{setup, RedirectConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = RedirectConfig::from_env()?;
    init_telemetry(config.log_format())?;

    let router = setup::setup_routes(Arc::new(config.clone()));
    setup::start_server(&config, router).await?;

    Ok(())
}
