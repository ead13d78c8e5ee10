//! Transport seam — delivery collaborators.
//!
//! Transports are pure I/O, no business logic: they take a finished
//! payload and move it somewhere. Real providers (SMTP, Twilio, APNs)
//! live behind this trait out of tree; the bundled implementation only
//! simulates delivery.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::TransportError;
use crate::message::Channel;
use crate::pipeline::types::Payload;

/// Outcome of one delivery attempt.
#[derive(Debug, Clone)]
pub struct DeliveryResult {
    /// Unique id for this dispatch attempt.
    pub dispatch_id: Uuid,
    pub success: bool,
    /// Human-readable detail (provider response, simulation note).
    pub detail: String,
}

/// A delivery backend for finished payloads.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Transport name (e.g. "simulated", "smtp-relay").
    fn name(&self) -> &str;

    /// Deliver a payload. Called once per send — the pipeline applies a
    /// bounded timeout around this and does not retry.
    async fn deliver(
        &self,
        channel: Channel,
        provider: &str,
        payload: &Payload,
    ) -> Result<DeliveryResult, TransportError>;
}

/// Transport that logs the dispatch and reports success.
#[derive(Debug, Clone, Default)]
pub struct SimulatedTransport;

impl SimulatedTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn deliver(
        &self,
        channel: Channel,
        provider: &str,
        payload: &Payload,
    ) -> Result<DeliveryResult, TransportError> {
        let dispatch_id = Uuid::new_v4();
        let recipient = payload
            .get("recipient")
            .and_then(|v| v.as_str())
            .unwrap_or("<unknown>");
        tracing::info!(
            channel = %channel,
            provider = %provider,
            recipient = %recipient,
            dispatch_id = %dispatch_id,
            "Simulated delivery"
        );
        Ok(DeliveryResult {
            dispatch_id,
            success: true,
            detail: format!("simulated delivery via {provider}"),
        })
    }
}
