//! Component factory: builds BotComponents from config. Keeps assembly logic
//! out of the runner.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use analytics::{AnalyticsService, AnalyticsStore};
use cache::{CacheAside, InMemoryCache};
use storage::Database;

use crate::analysis::{OpenAiAnalyzer, TextAnalyzer};
use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::Bot as CoreBot;
use crate::handlers::{CommandHandler, PersistenceHandler};
use crate::telegram::TelegramBotAdapter;

/// Core dependencies for run_bot; produced by the component factory.
pub struct BotComponents {
    pub db: Database,
    pub service: AnalyticsService,
    pub teloxide_bot: Bot,
    pub bot_adapter: Arc<dyn CoreBot>,
    pub analyzer: Option<Arc<dyn TextAnalyzer>>,
}

/// Opens storage, builds the cached analytics service and the Telegram
/// adapter. The analyzer is only present when an API key is configured.
#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let db = Database::connect(&config.database_url).await.map_err(|e| {
        error!(
            error = %e,
            database_url = %config.database_url,
            "Failed to initialize storage"
        );
        anyhow::anyhow!("Failed to initialize storage: {}", e)
    })?;

    let cache_aside = CacheAside::with_ttl(
        Arc::new(InMemoryCache::new()),
        Duration::from_secs(config.cache_ttl_secs),
    );
    let store: Arc<dyn AnalyticsStore> = Arc::new(db.messages.clone());
    let service = AnalyticsService::new(store, cache_aside);

    let teloxide_bot = connect_telegram(config);
    let bot_adapter: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    let analyzer: Option<Arc<dyn TextAnalyzer>> = match &config.openai_api_key {
        Some(api_key) => {
            info!(model = %config.analyze_model, "User analysis enabled");
            Some(Arc::new(OpenAiAnalyzer::new(
                api_key.clone(),
                config.openai_base_url.clone(),
                config.analyze_model.clone(),
            )))
        }
        None => {
            info!("OPENAI_API_KEY not set, user analysis disabled");
            None
        }
    };

    Ok(BotComponents {
        db,
        service,
        teloxide_bot,
        bot_adapter,
        analyzer,
    })
}

/// Telegram client for the configured token. A TELEGRAM_API_URL that does
/// not parse falls back to the public Bot API rather than failing startup.
fn connect_telegram(config: &BotConfig) -> Bot {
    let bot = Bot::new(config.bot_token.clone());
    let Some(ref url_str) = config.telegram_api_url else {
        return bot;
    };
    match reqwest::Url::parse(url_str) {
        Ok(url) => bot.set_api_url(url),
        Err(e) => {
            error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
            bot
        }
    }
}

/// Builds the handler chain (persistence → commands).
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(PersistenceHandler::new(components.db.clone())))
        .add_handler(Arc::new(CommandHandler::new(
            components.service.clone(),
            components.db.clone(),
            components.analyzer.clone(),
            components.bot_adapter.clone(),
        )))
}
