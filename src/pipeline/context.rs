//! Context extraction stage.

use serde_json::{Map, Value};
use tracing::debug;

use crate::message::Message;

/// Configuration for context extraction. Empty today; the struct keeps
/// the seam typed for future enrichment options (mention parsing,
/// sensitivity flags).
#[derive(Debug, Clone, Default)]
pub struct ContextConfig {}

/// Derives auxiliary context for a message.
///
/// Currently a shallow copy of the message metadata. Consumers must
/// tolerate additive keys — later versions will enrich the map.
pub struct ContextExtractor {
    pub config: ContextConfig,
}

impl ContextExtractor {
    pub fn new(config: ContextConfig) -> Self {
        Self { config }
    }

    /// Extract context for `message`. Never fails.
    pub fn extract(&self, message: &Message) -> Map<String, Value> {
        let context = message.metadata.clone();
        debug!(
            recipient = %message.recipient,
            keys = context.len(),
            "Extracted context"
        );
        context
    }
}

impl Default for ContextExtractor {
    fn default() -> Self {
        Self::new(ContextConfig::default())
    }
}
