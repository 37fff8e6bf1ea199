use tracing_subscriber::EnvFilter;
use uttt::prelude::*;

#[tokio::main]
async fn main() -> Result<(), UtttError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(bind_addr = %config.bind_addr, "starting Ultimate Tic-Tac-Toe server");

    let server = UtttServer::builder().config(config).build().await?;
    server.run().await
}
