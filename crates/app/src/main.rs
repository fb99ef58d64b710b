use engine::SeedLoader;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spendview={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();
    tracing::info!(
        "settings loaded: address {}, seed directory {}",
        settings.address(),
        settings.seed.dir
    );

    let store = match SeedLoader::new(&settings.seed.dir).load() {
        Ok(store) => store,
        Err(err) => {
            tracing::error!("failed to load seed from {}: {err}", settings.seed.dir);
            return Err(err.into());
        }
    };

    let engine = engine::Engine::builder().store(store).build();
    tracing::info!("engine ready: {:?}", engine.seed_status());

    let listener = match tokio::net::TcpListener::bind(settings.address()).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return Err(err.into());
        }
    };
    server::run_with_listener(engine, listener).await?;

    Ok(())
}
