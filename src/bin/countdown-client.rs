//! Terminal client for the shared countdown
//!
//! Resumes a cached countdown immediately, optionally starts a new one, and
//! redraws the remaining time until it reaches zero.

use std::time::Duration;
use tracing::{info, warn};

use shared_countdown::{
    client::{Controller, EndTimeCache, ServerNotifier, TerminalScreen},
    config::ClientConfig,
    tasks::CountdownRunner,
    utils::now_millis,
};

const NOTIFY_GRACE: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::parse();

    // Logs go to stderr; stdout carries the countdown line
    tracing_subscriber::fmt()
        .with_env_filter(format!("shared_countdown={},countdown_client={}", config.log_level(), config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    let cache = EndTimeCache::new(config.cache_path());
    let notifier = (!config.offline).then(|| ServerNotifier::new(config.server.clone()));
    info!(
        "Cache at {}, server {}",
        cache.path().display(),
        notifier.as_ref().map(|n| n.url()).unwrap_or("disabled")
    );

    let mut runner = CountdownRunner::new(
        Controller::new(config.duration_millis()),
        cache,
        TerminalScreen::stdout(),
        notifier,
    );

    runner.resume(now_millis());

    if config.start {
        runner.start(now_millis());
    } else {
        runner.sync_with_server().await;
    }

    if !runner.is_ticking() {
        warn!("No countdown running; pass --start to begin one");
        return Ok(());
    }

    runner.run().await;
    runner.screen_mut().finish();
    runner.drain_notifications(NOTIFY_GRACE).await;

    Ok(())
}
