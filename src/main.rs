use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use valet::config::AppConfig;
use valet::session::ChatSession;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "valet=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Valet");

    let config = AppConfig::from_env();
    if let Err(reason) = config.validate() {
        anyhow::bail!("invalid configuration: {reason}");
    }

    let session = ChatSession::open(&config);
    info!(
        turns = session.len(),
        history = %config.history_path.display(),
        voice = session.voice_enabled(),
        "session ready"
    );

    valet::web::serve(&config.bind_addr, Arc::new(Mutex::new(session))).await?;

    Ok(())
}
