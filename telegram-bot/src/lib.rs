//! # Chat analytics Telegram bot
//!
//! Wires the analytics, cache and storage crates behind a Telegram transport:
//! incoming group messages are persisted, and bot commands answer leaderboard,
//! per-user and word-cloud queries through the cached analytics service.

pub mod analysis;
pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod format;
pub mod handlers;
pub mod runner;
pub mod telegram;

pub use analysis::{build_user_prompt, OpenAiAnalyzer, TextAnalyzer};
pub use chain::HandlerChain;
pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::BotConfig;
pub use crate::core::{
    init_tracing, Bot, BotError, Chat, Handler, HandlerResponse, Message, MessageDirection,
    Result, User,
};
pub use handlers::{CommandHandler, PersistenceHandler};
pub use runner::run_bot;
pub use telegram::{run_repl, TelegramBotAdapter};
