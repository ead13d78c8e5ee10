//! Rule-based priority adjustment.
//!
//! Upgrades only — a message never comes out with a lower priority than
//! it went in with.

use serde_json::Value;
use tracing::debug;

use crate::message::{Message, Priority};

/// Keywords that bump the priority one level when present in the
/// subject or body (case-insensitive substring match).
const URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "important",
    "critical",
    "emergency",
    "immediate",
    "alert",
    "warning",
    "attention",
    "asap",
    "now",
    "fail",
    "error",
    "deadline",
    "reminder",
    "expiring",
    "expires",
    "action required",
];

/// Configuration for priority adjustment. Empty today; typed seam for
/// future rule options.
#[derive(Debug, Clone, Default)]
pub struct PriorityConfig {}

/// Recommends an adjusted priority from message content and metadata.
pub struct PriorityEngine {
    pub config: PriorityConfig,
}

impl PriorityEngine {
    pub fn new(config: PriorityConfig) -> Self {
        Self { config }
    }

    /// Compute the adjusted priority. Pure; never fails; never lowers.
    ///
    /// Rules, in order:
    /// 1. Any urgency keyword in subject/body bumps the level by one,
    ///    capped at critical.
    /// 2. Metadata `is_urgent`/`is_critical` set to boolean `true`
    ///    forces critical, overriding rule 1.
    /// 3. Otherwise metadata `is_important` raises the level to at
    ///    least high.
    pub fn adjust(&self, message: &Message) -> Priority {
        let current = message.priority.level();
        let mut adjusted = current;

        let text = format!(
            "{} {}",
            message.subject.to_lowercase(),
            message.body.to_lowercase()
        );
        if URGENCY_KEYWORDS.iter().any(|k| text.contains(k)) {
            adjusted = (current + 1).min(Priority::Critical.level());
            debug!(
                recipient = %message.recipient,
                "Urgency keyword found, raising priority level"
            );
        }

        if flag_is_true(message, "is_urgent") || flag_is_true(message, "is_critical") {
            debug!(
                recipient = %message.recipient,
                "Urgent/critical metadata flag set, forcing critical"
            );
            adjusted = Priority::Critical.level();
        } else if flag_is_true(message, "is_important") {
            adjusted = adjusted.max(Priority::High.level());
        }

        let final_priority = Priority::from_level(adjusted).unwrap_or(Priority::Medium);
        if final_priority != message.priority {
            debug!(
                recipient = %message.recipient,
                original = %message.priority,
                adjusted = %final_priority,
                "Adjusted priority"
            );
        }
        final_priority
    }
}

impl Default for PriorityEngine {
    fn default() -> Self {
        Self::new(PriorityConfig::default())
    }
}

/// Metadata flag check. Only JSON boolean `true` counts — `"true"`,
/// `1`, and friends are ignored.
fn flag_is_true(message: &Message, key: &str) -> bool {
    message.metadata.get(key).and_then(Value::as_bool) == Some(true)
}
