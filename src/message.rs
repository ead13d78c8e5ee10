//! Notification message data model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

// ── Channel ─────────────────────────────────────────────────────────

/// Delivery medium for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    Push,
    Webhook,
    Slack,
    Teams,
}

impl Channel {
    /// Lowercase wire name of the channel.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Push => "push",
            Self::Webhook => "webhook",
            Self::Slack => "slack",
            Self::Teams => "teams",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Channel {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            "push" => Ok(Self::Push),
            "webhook" => Ok(Self::Webhook),
            "slack" => Ok(Self::Slack),
            "teams" => Ok(Self::Teams),
            "" => Err(ValidationError::EmptyChannel),
            other => Err(ValidationError::UnknownChannel(other.to_string())),
        }
    }
}

// ── Priority ────────────────────────────────────────────────────────

/// Delivery urgency, totally ordered: `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Numeric level, `low = 0` through `critical = 3`.
    pub fn level(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }

    /// Inverse of [`Priority::level`]. Out-of-range levels yield `None`;
    /// callers fall back to `Medium`.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            3 => Some(Self::Critical),
            _ => None,
        }
    }

    /// Lowercase wire name of the priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            "" => Err(ValidationError::EmptyPriority),
            other => Err(ValidationError::UnknownPriority(other.to_string())),
        }
    }
}

// ── Message ─────────────────────────────────────────────────────────

/// A single notification request.
///
/// Immutable once constructed — every pipeline stage reads it by
/// reference. The recipient is validated non-empty at construction;
/// channel and priority are valid by type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Primary recipient identifier (email address, phone number, user id).
    pub recipient: String,
    /// Subject line or title.
    pub subject: String,
    /// Main content of the notification.
    pub body: String,
    /// Intended delivery channel.
    pub channel: Channel,
    /// Urgency classification. Defaults to `Medium`.
    #[serde(default)]
    pub priority: Priority,
    /// Sender identifier (service name, email address).
    #[serde(default)]
    pub sender: Option<String>,
    /// Additional context for channels or processing stages.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Message {
    /// Create a message with default priority, no sender, and empty metadata.
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        channel: Channel,
    ) -> Result<Self, ValidationError> {
        let recipient = recipient.into();
        if recipient.is_empty() {
            return Err(ValidationError::EmptyRecipient);
        }
        Ok(Self {
            recipient,
            subject: subject.into(),
            body: body.into(),
            channel,
            priority: Priority::default(),
            sender: None,
            metadata: Map::new(),
        })
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}
