//! The Handler trait: one participant in the message pipeline.

use async_trait::async_trait;

use super::{message::Message, response::HandlerResponse};

/// A message-pipeline participant with three optional phases, driven by
/// [`HandlerChain`](crate::chain::HandlerChain). Implement only the phases
/// the handler cares about; the defaults pass everything through.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Veto hook; returning false drops the message before the handle phase.
    async fn before(&self, _message: &Message) -> crate::core::error::Result<bool> {
        Ok(true)
    }

    /// Acts on the message. Stop and Reply settle it; Continue and Ignore
    /// hand it to the next handler.
    async fn handle(&self, _message: &Message) -> crate::core::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }

    /// Observes the settled response once the handle phase is over. Runs in
    /// reverse registration order.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::core::error::Result<()> {
        Ok(())
    }
}
