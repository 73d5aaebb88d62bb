//! Transport-agnostic message, user, chat and handler types.

pub mod chat;
pub mod handler;
pub mod message;
pub mod response;
pub mod user;

pub use chat::Chat;
pub use handler::Handler;
pub use message::{Message, MessageDirection};
pub use response::HandlerResponse;
pub use user::User;
