use ragrafika_core::Config;

// Use mimalloc as the global allocator for lower fragmentation in long-running containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    // Initialize the application (telemetry, database, storage, routes)
    let (_state, router) = ragrafika_api::setup::initialize_app(config.clone()).await?;

    ragrafika_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
