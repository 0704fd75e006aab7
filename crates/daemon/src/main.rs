//! FileDock Daemon
//!
//! Headless service for remote directory browsing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use daemon::config::Config;
use daemon::router::AppState;
use daemon::server::Server;

/// FileDock Daemon - headless service for remote directory browsing.
#[derive(Parser, Debug)]
#[command(name = "filedock")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the daemon.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the FileDock daemon
    Start {
        /// Directory tree to serve (overrides the configured root)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Address to listen on (overrides the configured bind address)
        #[arg(long, value_name = "ADDR")]
        bind: Option<SocketAddr>,
    },

    /// Validate the configuration and print the effective values
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        Config::load(config_path)?
    } else {
        Config::load_default()?
    };

    // Apply environment variable overrides
    config.apply_env_overrides();

    // Initialize tracing
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        config.daemon.log_level.clone()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(config_path) = &cli.config {
        tracing::info!("Using config file: {:?}", config_path);
    }

    // Handle commands
    match cli.command {
        Commands::Start { root, bind } => {
            // CLI flags take precedence over file and environment values
            if let Some(root) = root {
                config.files.root_dir = root;
            }
            if let Some(bind) = bind {
                config.server.bind_addr = bind.to_string();
            }

            config.validate()?;
            run_daemon(config).await?;
        }
        Commands::CheckConfig => {
            config.validate()?;
            println!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

/// Run the daemon until a shutdown signal arrives.
async fn run_daemon(config: Config) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr()?;
    let state = Arc::new(AppState::from_config(&config));

    tracing::info!("FileDock daemon starting, serving {:?}", state.root);

    let mut server = Server::start(bind_addr, state).await?;

    wait_for_shutdown_signal().await;
    tracing::info!("Received shutdown signal");

    server.shutdown();

    Ok(())
}

/// Wait for a shutdown signal (SIGTERM or SIGINT).
async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM");
        }
        _ = sigint.recv() => {
            tracing::info!("Received SIGINT");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_start_command() {
        let cli = Cli::try_parse_from(["filedock", "start"]).unwrap();
        match cli.command {
            Commands::Start { root, bind } => {
                assert!(root.is_none());
                assert!(bind.is_none());
            }
            _ => panic!("Expected Start command"),
        }
    }

    #[test]
    fn test_start_with_root() {
        let cli = Cli::try_parse_from(["filedock", "start", "--root", "/srv/files"]).unwrap();
        match cli.command {
            Commands::Start { root, .. } => {
                assert_eq!(root, Some(PathBuf::from("/srv/files")));
            }
            _ => panic!("Expected Start command"),
        }
    }

    #[test]
    fn test_start_with_bind() {
        let cli = Cli::try_parse_from(["filedock", "start", "--bind", "0.0.0.0:8080"]).unwrap();
        match cli.command {
            Commands::Start { bind, .. } => {
                assert_eq!(bind, Some("0.0.0.0:8080".parse().unwrap()));
            }
            _ => panic!("Expected Start command"),
        }
    }

    #[test]
    fn test_start_with_invalid_bind_fails() {
        let result = Cli::try_parse_from(["filedock", "start", "--bind", "not-an-address"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_config_command() {
        let cli = Cli::try_parse_from(["filedock", "check-config"]).unwrap();
        assert!(matches!(cli.command, Commands::CheckConfig));
    }

    #[test]
    fn test_global_verbose_flag() {
        let cli = Cli::try_parse_from(["filedock", "--verbose", "start"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_global_short_verbose_flag() {
        let cli = Cli::try_parse_from(["filedock", "-v", "start"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["filedock", "--config", "/etc/filedock.toml", "start"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/filedock.toml")));
    }

    #[test]
    fn test_config_after_command() {
        // Global flags can also come after the command
        let cli = Cli::try_parse_from(["filedock", "start", "--config", "/etc/filedock.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/filedock.toml")));
    }

    #[test]
    fn test_invalid_command_fails() {
        let result = Cli::try_parse_from(["filedock", "invalid"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_subcommand_fails() {
        let result = Cli::try_parse_from(["filedock"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_help_available() {
        let result = Cli::try_parse_from(["filedock", "--help"]);
        // --help causes an early exit, which is treated as an error by try_parse
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
