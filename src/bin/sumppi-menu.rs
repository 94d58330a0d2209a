use std::fs::File;

use anyhow::{Context, Result};

use sumppi::Config;

const LOG_FILE: &str = "sumppi-menu.log";

#[tokio::main]
async fn main() -> Result<()> {
    // The terminal belongs to the menu, so logs go to a file
    let log_file =
        File::create(LOG_FILE).with_context(|| format!("Failed to create {LOG_FILE}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let config = Config::from_env().context("Error loading config")?;

    sumppi::menu::run(config).await?;

    Ok(())
}
