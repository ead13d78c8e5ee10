//! Payload packaging stage.

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::error::PipelineError;
use crate::message::{Channel, Message};
use crate::pipeline::types::Payload;

/// Configuration for payload packaging. Empty today; typed seam for
/// future formatting options.
#[derive(Debug, Clone, Default)]
pub struct PackagerConfig {}

/// Transforms a message into a channel-ready payload.
pub struct Packager {
    pub config: PackagerConfig,
}

impl Packager {
    pub fn new(config: PackagerConfig) -> Self {
        Self { config }
    }

    /// Package `message` for `channel`.
    ///
    /// The payload carries every message field flattened plus a
    /// `packaged_at` RFC 3339 UTC timestamp. The channel does not alter
    /// the shape today but is the seam for per-channel formatting.
    pub fn package(&self, message: &Message, channel: Channel) -> Result<Payload, PipelineError> {
        debug!(
            channel = %channel,
            recipient = %message.recipient,
            "Packaging message"
        );

        let mut payload = match serde_json::to_value(message)
            .map_err(|e| PipelineError::Packaging(e.to_string()))?
        {
            Value::Object(map) => map,
            other => {
                return Err(PipelineError::Packaging(format!(
                    "message serialized to non-object value: {other}"
                )));
            }
        };
        payload.insert(
            "packaged_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        self.apply_channel_format(&mut payload, channel);
        Ok(payload)
    }

    /// Channel-specific payload shaping.
    ///
    /// Uniform today. Each arm is the seam for per-channel formatting:
    /// an APNs alert dict for push, an html_body for email, a trimmed
    /// to/body shape for sms.
    fn apply_channel_format(&self, _payload: &mut Payload, channel: Channel) {
        match channel {
            Channel::Email => {}
            Channel::Sms => {}
            Channel::Push => {}
            Channel::Webhook | Channel::Slack | Channel::Teams => {}
        }
    }
}

impl Default for Packager {
    fn default() -> Self {
        Self::new(PackagerConfig::default())
    }
}
