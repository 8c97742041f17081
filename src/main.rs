use std::sync::Arc;

use anyhow::Context;

use partner_onboarding::config::PortalConfig;
use partner_onboarding::portal::Portal;
use partner_onboarding::shell::{Shell, TerminalViewport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = PortalConfig::from_env();

    eprintln!("MyPartner onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Store: {}", config.db_path.display());
    eprintln!(
        "   Step persistence: {}",
        if config.persist_step { "on" } else { "off" }
    );
    eprintln!("   Type `help` for commands, `quit` to exit.\n");

    let portal = Portal::open(&config)
        .await
        .with_context(|| format!("Failed to start portal on {}", config.db_path.display()))?
        .with_viewport(Arc::new(TerminalViewport));

    Shell::new(portal).run().await;

    Ok(())
}
