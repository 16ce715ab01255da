//! Command abstractions.

use uuid::Uuid;

/// Trait that all state-changing requests implement.
///
/// Handlers log `command_type` and `correlation_id` on receipt and on
/// rejection, so one request can be followed through the logs.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted name such as `story.cast_vote`.
    fn command_type(&self) -> &'static str;

    /// Correlation ID minted by the transport layer for this request.
    fn correlation_id(&self) -> Uuid;
}
