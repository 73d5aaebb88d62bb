//! Handler implementations: message persistence and command routing.

mod commands;
mod persistence;

pub use commands::CommandHandler;
pub use persistence::PersistenceHandler;
