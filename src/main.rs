use anyhow::Context as _;

use notify_relay::config::{NotifierConfig, NotifierConfigOverrides};
use notify_relay::message::Message;
use notify_relay::pipeline::Notifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional path to a JSON overrides document as the first argument.
    let overrides = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config overrides from {path}"))?;
            NotifierConfigOverrides::from_json(&raw)?
        }
        None => NotifierConfigOverrides::default(),
    };
    let config = NotifierConfig::with_overrides(overrides);

    // Initialize tracing; RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level.clone())),
        )
        .with_target(false)
        .init();

    eprintln!("notify-relay v{}", env!("CARGO_PKG_VERSION"));

    let notifier = Notifier::new(config);

    let message = Message::new(
        "ops@example.com",
        "Deploy finished",
        "The 14:00 deploy completed without errors.",
        notifier.config().default_channel,
    )?
    .with_priority(notifier.config().default_priority)
    .with_sender("ci@example.com");

    let outcome = notifier.send(&message).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
