use anyhow::Context;
use clap::Parser;
use qrlink_gateway::{admin, server, telemetry, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing .env file is fine, everything has a default
    let _ = dotenvy::dotenv();

    let config = Config::parse();
    telemetry::init(config.log_format).context("failed to initialize logging")?;

    match config.command.clone() {
        None => server::serve(config).await,
        Some(command) => {
            let shortener = server::build_shortener(&config).await?;
            let output = admin::execute(&shortener, command).await?;
            println!("{output}");
            Ok(())
        }
    }
}
