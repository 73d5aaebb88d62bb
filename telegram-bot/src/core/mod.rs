//! Transport-agnostic heart of the bot: the message model, the Handler and
//! Bot traits, errors, and tracing setup. The telegram module adapts
//! teloxide to these types.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, MessageDirection, User};
