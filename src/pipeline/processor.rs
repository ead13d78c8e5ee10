//! Notification orchestrator — classifies, packages, and dispatches.
//!
//! **Core invariant: `send` never raises.** Every internal failure is
//! recovered at the boundary and returned as a `processing_error`
//! outcome with detail. The four terminal outcomes (delivered,
//! spam_detected, channel_not_configured, processing_error) are
//! mutually exclusive.
//!
//! Flow per message:
//! 1. Context extraction (never fails)
//! 2. Priority adjustment (informational — the message is not mutated)
//! 3. Spam gate against the configured threshold
//! 4. Packaging
//! 5. Body obfuscation
//! 6. Channel resolution → bounded-timeout delivery via the transport

use std::sync::Arc;

use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::config::NotifierConfig;
use crate::error::{PipelineError, TransportError};
use crate::message::Message;
use crate::pipeline::context::ContextExtractor;
use crate::pipeline::packager::Packager;
use crate::pipeline::priority::PriorityEngine;
use crate::pipeline::spam::SpamScorer;
use crate::pipeline::types::SendOutcome;
use crate::security::{Base64Codec, PayloadCodec};
use crate::transport::{SimulatedTransport, Transport};

/// Processes notification requests end to end.
///
/// Holds the configuration and the stateless stage engines. Invocations
/// are independent; a shared `Notifier` can process messages
/// concurrently without locking.
pub struct Notifier {
    config: NotifierConfig,
    context: ContextExtractor,
    priority: PriorityEngine,
    spam: SpamScorer,
    packager: Packager,
    codec: Box<dyn PayloadCodec>,
    transport: Arc<dyn Transport>,
}

impl Notifier {
    /// Create a notifier with the default codec and a simulated transport.
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            context: ContextExtractor::default(),
            priority: PriorityEngine::default(),
            spam: SpamScorer::default(),
            packager: Packager::default(),
            codec: Box::new(Base64Codec::new()),
            transport: Arc::new(SimulatedTransport::new()),
            config,
        }
    }

    /// Replace the delivery transport (tests, real providers).
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the payload codec (e.g. a real AEAD implementation).
    pub fn with_codec(mut self, codec: Box<dyn PayloadCodec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Process one message. Always returns an outcome, never an error.
    pub async fn send(&self, message: &Message) -> SendOutcome {
        info!(
            recipient = %message.recipient,
            channel = %message.channel,
            "Processing notification request"
        );
        let outcome = match self.process(message).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    recipient = %message.recipient,
                    error = %e,
                    "Error processing notification"
                );
                SendOutcome::ProcessingError {
                    error: e.to_string(),
                }
            }
        };
        info!(
            recipient = %message.recipient,
            outcome = outcome.label(),
            "Notification request finished"
        );
        outcome
    }

    async fn process(&self, message: &Message) -> Result<SendOutcome, PipelineError> {
        let context = self.context.extract(message);
        debug!(keys = context.len(), "Context ready");

        // Informational only — delivery urgency hinting for transports
        // and operators; the message itself stays untouched.
        let adjusted = self.priority.adjust(message);
        debug!(
            original = %message.priority,
            adjusted = %adjusted,
            "Priority adjustment computed"
        );

        if self.config.spam_filter.enabled {
            let threshold = self.config.spam_filter.threshold;
            let score = self.spam.score(message);
            if score > threshold {
                warn!(score, threshold, "Message flagged as spam, aborting send");
                return Ok(SendOutcome::SpamDetected { score, threshold });
            }
            debug!(score, threshold, "Spam check passed");
        } else {
            debug!("Spam filter disabled, skipping gate");
        }

        let mut payload = self.packager.package(message, message.channel)?;

        if self.config.security.encryption_required {
            warn!("encryption_required is set but only the placeholder codec is active");
        }
        if let Some(Value::String(body)) = payload.get("body") {
            let encoded = self.codec.encode(body);
            payload.insert("body".to_string(), Value::String(encoded));
            debug!("Applied obfuscation to payload body");
        }

        let Some(channel_config) = self.config.channel(message.channel) else {
            error!(channel = %message.channel, "Channel is not configured");
            return Ok(SendOutcome::ChannelNotConfigured {
                channel: message.channel,
            });
        };
        let provider = channel_config.provider_or_unknown().to_string();
        info!(
            channel = %message.channel,
            provider = %provider,
            "Selected delivery channel"
        );

        let delivery_timeout = channel_config.timeout();
        let result = timeout(
            delivery_timeout,
            self.transport.deliver(message.channel, &provider, &payload),
        )
        .await
        .map_err(|_| PipelineError::DeliveryTimeout {
            channel: message.channel.to_string(),
            secs: delivery_timeout.as_secs(),
        })??;

        if !result.success {
            return Err(PipelineError::Delivery(TransportError::SendFailed {
                channel: message.channel.to_string(),
                reason: result.detail,
            }));
        }

        info!(dispatch_id = %result.dispatch_id, "Notification dispatched");
        Ok(SendOutcome::Delivered {
            channel: message.channel,
            provider,
            dispatch_id: result.dispatch_id,
            detail: result.detail,
        })
    }
}
