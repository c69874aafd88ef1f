use anyhow::Result;
use navora::config::NavoraConfig;
use navora::server::ServerBuilder;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "navora=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::var("NAVORA_CONFIG") {
        Ok(path) => {
            tracing::info!(path = %path, "loading configuration");
            NavoraConfig::from_yaml_file(&path)?
        }
        Err(_) => NavoraConfig::default(),
    };

    ServerBuilder::new().with_config(config).serve().await
}
