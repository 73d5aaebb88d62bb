//! Ordered pipeline over [`Handler`]s.
//!
//! Three phases per message: every `before` hook runs first (a false vetoes
//! the message), then handlers take turns at `handle` until one settles the
//! message with Stop or Reply, and the `after` hooks observe the outcome in
//! reverse registration order.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::core::{Handler, HandlerResponse, Message, Result};

/// Ordered pipeline of message handlers.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler; handlers run in registration order.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Drives one message through all three phases and returns the final
    /// response.
    #[instrument(skip_all, fields(chat_id = message.chat.id, user_id = message.user.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        for (idx, handler) in self.handlers.iter().enumerate() {
            if !handler.before(message).await? {
                info!(handler = idx, "Message vetoed in before phase");
                return Ok(HandlerResponse::Stop);
            }
        }

        let outcome = self.run_handle_phase(message).await?;

        for handler in self.handlers.iter().rev() {
            handler.after(message, &outcome).await?;
        }

        debug!(outcome = ?outcome, "Handler chain finished");
        Ok(outcome)
    }

    async fn run_handle_phase(&self, message: &Message) -> Result<HandlerResponse> {
        for (idx, handler) in self.handlers.iter().enumerate() {
            match handler.handle(message).await? {
                settled @ (HandlerResponse::Stop | HandlerResponse::Reply(_)) => {
                    info!(handler = idx, "Message settled, chain stopped");
                    return Ok(settled);
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => {}
            }
        }
        Ok(HandlerResponse::Continue)
    }
}
