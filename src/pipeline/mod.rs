//! Notification processing pipeline.
//!
//! Every message flows through:
//! 1. `ContextExtractor` — auxiliary context from metadata
//! 2. `PriorityEngine` — rule-based urgency adjustment (informational)
//! 3. `SpamScorer` — bounded heuristic score, gated by a threshold
//! 4. `Packager` — channel-ready payload with packaging timestamp
//! 5. obfuscation + channel resolution + delivery, in `Notifier`
//!
//! Engines are stateless and safely shared; a `Notifier` can process
//! any number of messages concurrently.

pub mod context;
pub mod packager;
pub mod priority;
pub mod processor;
pub mod spam;
pub mod types;

pub use processor::Notifier;
pub use types::{Payload, SendOutcome};
