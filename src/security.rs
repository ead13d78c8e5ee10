//! Placeholder payload obfuscation.
//!
//! `Base64Codec` is a reversible encoding, NOT cryptography — it exists
//! so the pipeline has a security stage with a stable seam. A real
//! implementation (an AEAD cipher) must slot in behind [`PayloadCodec`]
//! without the pipeline changing.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::debug;

/// Marker prefix on encoded tokens.
pub const ENC_PREFIX: &str = "ENC:";

/// Two-method capability seam for the security stage.
pub trait PayloadCodec: Send + Sync {
    fn encode(&self, plaintext: &str) -> String;
    fn decode(&self, token: &str) -> String;
}

/// Base64 placeholder codec. Reversible, unauthenticated, no key.
#[derive(Debug, Clone, Default)]
pub struct Base64Codec;

impl Base64Codec {
    pub fn new() -> Self {
        Self
    }
}

impl PayloadCodec for Base64Codec {
    /// Encode as `"ENC:" + base64(utf8(plaintext))`. Empty input stays empty.
    fn encode(&self, plaintext: &str) -> String {
        if plaintext.is_empty() {
            return String::new();
        }
        format!("{ENC_PREFIX}{}", BASE64.encode(plaintext.as_bytes()))
    }

    /// Invert [`encode`](PayloadCodec::encode). Fail-soft: tokens without
    /// the prefix, with invalid base64, or with non-UTF-8 content come
    /// back unchanged — this never errors outward.
    fn decode(&self, token: &str) -> String {
        let Some(encoded) = token.strip_prefix(ENC_PREFIX) else {
            return token.to_string();
        };
        match BASE64
            .decode(encoded)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
        {
            Some(plaintext) => plaintext,
            None => {
                debug!("Token failed base64/utf8 decode, returning unchanged");
                token.to_string()
            }
        }
    }
}
