//! What a handler decided about a message.

/// Outcome of one handler's `handle` phase. `Reply(text)` carries the
/// response body so `after` hooks can see what was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Not settled here; offer it to the next handler.
    Continue,
    /// Settled without a response body.
    Stop,
    /// Declined; same as Continue for the chain.
    Ignore,
    /// Settled with the reply that was sent.
    Reply(String),
}
