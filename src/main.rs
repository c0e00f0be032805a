//! ChatNotify CLI entry point

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chat_notify::cli::{
    app::{load_merged_config, run_host, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use chat_notify::infrastructure::XdgConfigStore;

/// Grace period for blocking notification waits at exit
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            presenter.error(&format!("Failed to start runtime: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let code = runtime.block_on(async {
        match cli.command {
            Commands::Config { action } => {
                let store = XdgConfigStore::new();
                if let Err(e) = handle_config_command(action, &store, &presenter).await {
                    presenter.error(&e.to_string());
                    return ExitCode::from(EXIT_ERROR);
                }
                ExitCode::SUCCESS
            }
            Commands::Run(args) => {
                let config = load_merged_config(args.to_config()).await;

                // RUST_LOG wins over the configured level
                let filter = EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(config.log_level_or_default()));
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();

                run_host(config).await
            }
        }
    });

    // Pending action waits on the notification server would block a plain drop.
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    code
}
