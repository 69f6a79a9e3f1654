// Patient Track - Global Patient Track API Client
// Copyright (c) 2025 Patient Track Contributors
// Licensed under the MIT License

use clap::Parser;
use patient_track::cli::{exit, Cli, Commands};
use patient_track::config::{load_config_or_default, LoggingConfig};
use patient_track::core::scope::{ScopeHandle, ScreenScope};
use patient_track::logging::init_logging;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging follows the configuration; a broken configuration is
    // reported by the command itself, so fall back to console logging here.
    let config = load_config_or_default(&cli.config).ok();
    let logging_config = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_else(LoggingConfig::default);
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());

    let _guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(exit::FATAL);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "Patient Track - Global Patient Track API Client"
    );

    // The command is the screen: Ctrl+C closes it and abandons pending requests.
    let scope = Arc::new(ScreenScope::new());
    let handle = scope.handle();

    let signal_scope = Arc::clone(&scope);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received SIGINT (Ctrl+C), cancelling");
                signal_scope.close();
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C"),
        }
    });

    let exit_code = match execute_command(&cli, handle).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            exit::FATAL
        }
    };

    drop(_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, scope: ScopeHandle) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Login(args) => args.execute(&cli.config, scope).await,
        Commands::Logout(args) => args.execute(&cli.config, scope).await,
        Commands::Status(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
        Commands::Admin(args) => args.execute(&cli.config, scope).await,
        Commands::Doctor(args) => args.execute(&cli.config, scope).await,
        Commands::Patient(args) => args.execute(&cli.config, scope).await,
        Commands::Technician(args) => args.execute(&cli.config, scope).await,
    }
}
