//! pixvec server binary: image embedding over HTTP with bearer-token
//! authentication.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a .env file if present, then load configuration.
    dotenvy::dotenv().ok();
    let config = ServerConfig::load()?;

    server::start_server(config).await?;

    Ok(())
}
