use std::sync::Arc;

use backend::{MemoryTable, RedisTable, ServerConfig, StorageKind, TaskTable};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).try_init()?;

    let config = ServerConfig::from_env()?;
    let table: Arc<dyn TaskTable> = match config.storage {
        StorageKind::Redis => {
            info!(url = %config.redis_url, "connecting to redis");
            Arc::new(RedisTable::connect(&config.redis_url).await?)
        }
        StorageKind::Memory => Arc::new(MemoryTable::new()),
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        storage = %config.storage,
        static_dir = %config.static_dir.display(),
        "tasks service listening"
    );
    axum::serve(listener, backend::app(table, &config.static_dir)).await?;
    Ok(())
}
