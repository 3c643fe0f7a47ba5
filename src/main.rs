mod cli;
mod error;
mod models;
mod shell;

use anyhow::Context;
use clap::Parser;
use cli::{App, Cli, ExitReason, Settings, TerminalPrompter};
use models::Platform;
use shell::ShellRunner;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Log file name prefix inside `SITE_MENU_LOG_DIR`.
const LOG_FILE_PREFIX: &str = "site-menu.log";

/// Filter used when `RUST_LOG` is unset. Stderr shares the screen with the menu.
const DEFAULT_LOG_FILTER: &str = "error";

/// Sets up `tracing`. Logs go to stderr unless a log directory is configured.
///
/// The returned guard must stay alive for buffered file logs to be flushed.
fn init_logging(settings: &Settings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match &settings.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        },
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        },
    }
}

/// Reads settings; the error is printed once, by `anyhow`, when `main` returns it.
fn load_settings() -> anyhow::Result<Settings> {
    Settings::from_env().context("failed to read settings")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    let settings = load_settings()?;
    let _log_guard = init_logging(&settings);

    let platform = Platform::current();
    info!("Starting site menu on {}", platform);

    let app = App::new(
        settings,
        platform,
        ShellRunner::new(platform),
        TerminalPrompter::new(),
    );

    let result = app.run().await;
    app.prompter().restore();

    match result {
        Ok(ExitReason::Requested) => info!("Exited from menu"),
        Ok(ExitReason::Interrupted) => info!("Exited on interrupt"),
        Err(e) => {
            error!("Menu loop failed: {:?}", e);
            return Err(e).context("terminal unavailable");
        },
    }

    Ok(())
}
