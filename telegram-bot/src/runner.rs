//! Main entry: init logging, build components and handler chain, run the REPL.

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;
use crate::core::init_tracing;
use crate::telegram::run_repl;

#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    if let Some(dir) = std::path::Path::new(&config.log_file).parent() {
        std::fs::create_dir_all(dir).context("Failed to create log directory")?;
    }
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        cache_ttl_secs = config.cache_ttl_secs,
        "Initializing bot"
    );

    let components = build_bot_components(&config).await?;
    let handler_chain = build_handler_chain(&components);

    info!("Starting Telegram REPL");
    run_repl(components.teloxide_bot.clone(), handler_chain).await
}
