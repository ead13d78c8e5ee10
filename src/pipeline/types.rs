//! Shared types for the notification pipeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::Channel;

/// Channel-ready payload produced by the packager. Owned by one pipeline
/// invocation and discarded after delivery.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Terminal outcome of one pipeline invocation.
///
/// Exactly one of these is returned per send; the variants are mutually
/// exclusive. Internal failures surface as `ProcessingError` — `send`
/// never raises.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SendOutcome {
    /// Message accepted by the transport.
    Delivered {
        channel: Channel,
        provider: String,
        dispatch_id: Uuid,
        detail: String,
    },
    /// Spam score strictly exceeded the configured threshold.
    SpamDetected { score: f64, threshold: f64 },
    /// The message's channel has no configuration entry.
    ChannelNotConfigured { channel: Channel },
    /// An internal stage failed; `error` carries the detail.
    ProcessingError { error: String },
}

impl SendOutcome {
    /// True only for `Delivered`.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Delivered { .. } => "delivered",
            Self::SpamDetected { .. } => "spam_detected",
            Self::ChannelNotConfigured { .. } => "channel_not_configured",
            Self::ProcessingError { .. } => "processing_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_delivered_is_success() {
        let delivered = SendOutcome::Delivered {
            channel: Channel::Email,
            provider: "smtp".into(),
            dispatch_id: Uuid::new_v4(),
            detail: "ok".into(),
        };
        assert!(delivered.is_success());
        assert!(
            !SendOutcome::SpamDetected {
                score: 0.9,
                threshold: 0.8
            }
            .is_success()
        );
        assert!(
            !SendOutcome::ChannelNotConfigured {
                channel: Channel::Webhook
            }
            .is_success()
        );
        assert!(
            !SendOutcome::ProcessingError {
                error: "boom".into()
            }
            .is_success()
        );
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(
            SendOutcome::SpamDetected {
                score: 0.9,
                threshold: 0.8
            }
            .label(),
            "spam_detected"
        );
        assert_eq!(
            SendOutcome::ProcessingError { error: "x".into() }.label(),
            "processing_error"
        );
    }

    #[test]
    fn serializes_with_reason_tag() {
        let outcome = SendOutcome::ChannelNotConfigured {
            channel: Channel::Webhook,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["reason"], "channel_not_configured");
        assert_eq!(json["channel"], "webhook");

        let spam = SendOutcome::SpamDetected {
            score: 0.95,
            threshold: 0.8,
        };
        let json = serde_json::to_value(&spam).unwrap();
        assert_eq!(json["reason"], "spam_detected");
        assert!(json["score"].is_f64());
    }
}
