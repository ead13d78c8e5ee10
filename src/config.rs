//! Typed configuration for the notification pipeline.
//!
//! Defaults mirror a conventional starter setup (email over local SMTP,
//! sms over twilio). Customization goes through the all-`Option`
//! `*Overrides` family, applied by a recursive merge that preserves
//! sibling keys — overriding one field of one channel leaves the rest of
//! that channel and every other channel intact.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::message::{Channel, Priority};

/// Delivery timeout applied when a channel has none configured.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ── Config structs ──────────────────────────────────────────────────

/// Process-wide pipeline configuration. Read-only after construction.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Channel used when the caller does not pick one.
    pub default_channel: Channel,
    /// Priority used when the caller does not pick one.
    pub default_priority: Priority,
    /// Per-channel delivery settings. A channel absent from this map is
    /// not configured and messages to it are rejected.
    pub channels: HashMap<Channel, ChannelConfig>,
    pub spam_filter: SpamFilterConfig,
    pub security: SecurityConfig,
    /// Default log filter for the binary's subscriber setup.
    pub log_level: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        let mut channels = HashMap::new();
        channels.insert(
            Channel::Email,
            ChannelConfig {
                provider: Some("smtp".to_string()),
                host: Some("localhost".to_string()),
                port: Some(25),
                timeout_secs: Some(30),
                retries: Some(2),
            },
        );
        channels.insert(
            Channel::Sms,
            ChannelConfig {
                provider: Some("twilio".to_string()),
                host: None,
                port: None,
                timeout_secs: Some(15),
                retries: Some(3),
            },
        );
        Self {
            default_channel: Channel::Email,
            default_priority: Priority::Medium,
            channels,
            spam_filter: SpamFilterConfig::default(),
            security: SecurityConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl NotifierConfig {
    /// Build the default configuration with overrides merged in.
    pub fn with_overrides(overrides: NotifierConfigOverrides) -> Self {
        let mut config = Self::default();
        overrides.apply(&mut config);
        config
    }

    /// Settings for a channel, if it is configured.
    pub fn channel(&self, channel: Channel) -> Option<&ChannelConfig> {
        self.channels.get(&channel)
    }
}

/// Delivery settings for one channel.
///
/// `retries` is part of the transport contract surface — the pipeline
/// itself performs no retries; a transport implementation may read it.
#[derive(Debug, Clone, Default)]
pub struct ChannelConfig {
    pub provider: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout_secs: Option<u64>,
    pub retries: Option<u32>,
}

impl ChannelConfig {
    /// Provider name, `"unknown"` when unset.
    pub fn provider_or_unknown(&self) -> &str {
        self.provider.as_deref().unwrap_or("unknown")
    }

    /// Delivery timeout for this channel.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

/// Spam gate settings.
#[derive(Debug, Clone)]
pub struct SpamFilterConfig {
    /// When false the gate is skipped entirely.
    pub enabled: bool,
    /// Messages scoring strictly above this are rejected.
    pub threshold: f64,
}

impl Default for SpamFilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 0.8,
        }
    }
}

/// Security stage settings.
#[derive(Debug, Clone, Default)]
pub struct SecurityConfig {
    /// Caller requires real encryption. The bundled codec is a reversible
    /// placeholder, so the pipeline logs a warning when this is set.
    pub encryption_required: bool,
}

// ── Overrides ───────────────────────────────────────────────────────

/// Partial configuration, merged over the defaults field by field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NotifierConfigOverrides {
    pub default_channel: Option<Channel>,
    pub default_priority: Option<Priority>,
    pub channels: HashMap<Channel, ChannelConfigOverrides>,
    pub spam_filter: Option<SpamFilterOverrides>,
    pub security: Option<SecurityOverrides>,
    pub log_level: Option<String>,
}

impl NotifierConfigOverrides {
    /// Parse overrides from a JSON document (the external config seam).
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Merge into `config`, recursively. Unset fields leave the existing
    /// value; a channel not present in the defaults is inserted.
    pub fn apply(self, config: &mut NotifierConfig) {
        if let Some(channel) = self.default_channel {
            config.default_channel = channel;
        }
        if let Some(priority) = self.default_priority {
            config.default_priority = priority;
        }
        for (channel, overrides) in self.channels {
            overrides.apply(config.channels.entry(channel).or_default());
        }
        if let Some(spam) = self.spam_filter {
            spam.apply(&mut config.spam_filter);
        }
        if let Some(security) = self.security {
            security.apply(&mut config.security);
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
    }
}

/// Partial channel settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelConfigOverrides {
    pub provider: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    #[serde(rename = "timeout")]
    pub timeout_secs: Option<u64>,
    pub retries: Option<u32>,
}

impl ChannelConfigOverrides {
    fn apply(self, config: &mut ChannelConfig) {
        if let Some(provider) = self.provider {
            config.provider = Some(provider);
        }
        if let Some(host) = self.host {
            config.host = Some(host);
        }
        if let Some(port) = self.port {
            config.port = Some(port);
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = Some(timeout_secs);
        }
        if let Some(retries) = self.retries {
            config.retries = Some(retries);
        }
    }
}

/// Partial spam gate settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpamFilterOverrides {
    pub enabled: Option<bool>,
    pub threshold: Option<f64>,
}

impl SpamFilterOverrides {
    fn apply(self, config: &mut SpamFilterConfig) {
        if let Some(enabled) = self.enabled {
            config.enabled = enabled;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
    }
}

/// Partial security settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SecurityOverrides {
    pub encryption_required: Option<bool>,
}

impl SecurityOverrides {
    fn apply(self, config: &mut SecurityConfig) {
        if let Some(required) = self.encryption_required {
            config.encryption_required = required;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_email_and_sms() {
        let config = NotifierConfig::default();
        let email = config.channel(Channel::Email).unwrap();
        assert_eq!(email.provider.as_deref(), Some("smtp"));
        assert_eq!(email.host.as_deref(), Some("localhost"));
        assert_eq!(email.port, Some(25));
        let sms = config.channel(Channel::Sms).unwrap();
        assert_eq!(sms.provider.as_deref(), Some("twilio"));
        assert!(sms.host.is_none());
        assert!(config.channel(Channel::Webhook).is_none());
        assert!(config.spam_filter.enabled);
        assert_eq!(config.spam_filter.threshold, 0.8);
        assert!(!config.security.encryption_required);
    }

    #[test]
    fn override_preserves_sibling_keys() {
        let overrides = NotifierConfigOverrides::from_json(
            r#"{"channels": {"email": {"host": "mail.internal"}}}"#,
        )
        .unwrap();
        let config = NotifierConfig::with_overrides(overrides);

        let email = config.channel(Channel::Email).unwrap();
        assert_eq!(email.host.as_deref(), Some("mail.internal"));
        // Sibling fields of the overridden channel survive.
        assert_eq!(email.port, Some(25));
        assert_eq!(email.provider.as_deref(), Some("smtp"));
        // Sibling channels survive.
        let sms = config.channel(Channel::Sms).unwrap();
        assert_eq!(sms.provider.as_deref(), Some("twilio"));
        assert_eq!(sms.timeout_secs, Some(15));
    }

    #[test]
    fn override_inserts_new_channel() {
        let overrides = NotifierConfigOverrides::from_json(
            r#"{"channels": {"webhook": {"provider": "generic-http", "timeout": 5}}}"#,
        )
        .unwrap();
        let config = NotifierConfig::with_overrides(overrides);
        let webhook = config.channel(Channel::Webhook).unwrap();
        assert_eq!(webhook.provider.as_deref(), Some("generic-http"));
        assert_eq!(webhook.timeout_secs, Some(5));
        assert!(webhook.host.is_none());
    }

    #[test]
    fn override_spam_threshold_keeps_enabled_flag() {
        let overrides =
            NotifierConfigOverrides::from_json(r#"{"spam_filter": {"threshold": 0.5}}"#).unwrap();
        let config = NotifierConfig::with_overrides(overrides);
        assert_eq!(config.spam_filter.threshold, 0.5);
        assert!(config.spam_filter.enabled);
    }

    #[test]
    fn override_top_level_fields() {
        let overrides = NotifierConfigOverrides::from_json(
            r#"{"default_channel": "slack", "default_priority": "high", "log_level": "debug"}"#,
        )
        .unwrap();
        let config = NotifierConfig::with_overrides(overrides);
        assert_eq!(config.default_channel, Channel::Slack);
        assert_eq!(config.default_priority, Priority::High);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        let result = NotifierConfigOverrides::from_json("{not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn channel_timeout_falls_back_to_default() {
        let config = ChannelConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.provider_or_unknown(), "unknown");
    }
}
