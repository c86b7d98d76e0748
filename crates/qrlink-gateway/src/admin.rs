use qrlink_core::{ShortCode, Shortener, ShortenerError};

use crate::config::Command;

/// Runs a maintenance command and returns the line to print.
pub async fn execute(
    shortener: &dyn Shortener,
    command: Command,
) -> Result<String, ShortenerError> {
    match command {
        Command::Lookup { short_code } => {
            let code = ShortCode::new(short_code)?;
            let stats = shortener.stats(&code).await?;
            Ok(stats.target_url)
        }
        Command::Update {
            short_code,
            new_url,
        } => {
            let code = ShortCode::new(short_code)?;
            let new_url = shortener.retarget(&code, new_url).await?;
            Ok(format!("short code [{code}] now points to {new_url}"))
        }
    }
}
