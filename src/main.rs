//! Glycodash: terminal dashboard for diabetes risk.
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glycodash::adapters::sanitize::RedactingMakeWriter;
use glycodash::tui::App;
use glycodash::Config;

fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize logging.
    //
    // Log lines written to the terminal would corrupt the TUI (alternate screen):
    // - interactive TTY: log to a file
    // - non-interactive: log to stdout
    let interactive = std::io::stdout().is_terminal();

    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: a missing directory surfaces as the open error below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(RedactingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting Glycodash...");
    tracing::debug!("Configuration: {:?}", config);

    // Run the TUI application
    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("Glycodash shutdown complete.");
    Ok(())
}
