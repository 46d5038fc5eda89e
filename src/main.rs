use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cashdesk::{cli::Cli, MembershipStore, StoreConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::init();

    // RUST_LOG takes precedence over --log-level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut store = MembershipStore::new(StoreConfig::new(&cli.db));
    store.initialize().await?;

    let result = cli.command.run(&store).await;
    store.dispose().await?;

    result
}
