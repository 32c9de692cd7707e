//! # Tiny Server
//!
//! Serves the tiny tools API: a WEBP to SVG conversion endpoint, the tool
//! gallery and liveness probes.
//!
//! Configuration comes from `tiny-tools.toml`, the environment and a `.env`
//! file (see `tiny-config`); the flags below override all of them.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiny_server::{
    AppState, create_app,
    infra::config::{
        Config, ConfigLoad, ConfigLoader, ConfigWarnings, validation,
    },
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "tiny-server")]
#[command(about = "HTTP server for the tiny tools image converter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to a TOML config file (defaults to ./tiny-tools.toml)
    #[arg(long, env = "TINY_TOOLS_CONFIG")]
    config: Option<PathBuf>,

    /// Path to a .env file (defaults to ./.env)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Largest accepted upload in bytes (overrides config)
    #[arg(long, value_parser = parse_upload_limit)]
    max_upload_bytes: Option<usize>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Load and validate configuration, print warnings and exit
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();

    if let Some(command) = cli.command {
        match command {
            Command::Config(ConfigCommand::Check) => {
                return run_config_check(&cli.serve);
            }
        }
    }

    run_server(cli.serve).await
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn parse_upload_limit(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("upload limit must be greater than zero".into()),
        Ok(bytes) => Ok(bytes),
        Err(err) => Err(format!("invalid byte count `{raw}`: {err}")),
    }
}

fn load_runtime_config(
    args: &ServeArgs,
) -> anyhow::Result<(Config, ConfigWarnings)> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &args.env_file {
        loader = loader.with_env_file(path);
    }

    let ConfigLoad {
        mut config,
        mut warnings,
    } = loader.load().context("failed to load configuration")?;

    apply_overrides(args, &mut config, &mut warnings)?;
    Ok((config, warnings))
}

/// Flags win over the loaded config. An overridden upload limit goes
/// through the same checks as a configured one.
fn apply_overrides(
    args: &ServeArgs,
    config: &mut Config,
    warnings: &mut ConfigWarnings,
) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }
    if let Some(max_bytes) = args.max_upload_bytes {
        config.upload.max_bytes = max_bytes;
        validation::revalidate_upload(&config.upload, warnings)
            .context("invalid --max-upload-bytes")?;
    }

    Ok(())
}

fn log_warnings(warnings: &ConfigWarnings) {
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => warn!(hint = %hint, "{}", warning.message),
            None => warn!("{}", warning.message),
        }
    }
}

fn run_config_check(args: &ServeArgs) -> anyhow::Result<()> {
    let (config, warnings) = load_runtime_config(args)?;
    log_warnings(&warnings);

    match &config.metadata.config_path {
        Some(path) => info!(path = %path.display(), "config file OK"),
        None => info!("no config file; using environment and defaults"),
    }
    info!(
        bind = %config.bind_address(),
        max_upload_bytes = config.upload.max_bytes,
        dev_mode = config.dev_mode,
        warnings = warnings.len(),
        "configuration is valid"
    );
    Ok(())
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let (config, warnings) = load_runtime_config(&args)?;

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    log_warnings(&warnings);

    if config.dev_mode {
        warn!("DEV_MODE is enabled: CORS is permissive");
    }

    let bind_address = config.bind_address();
    let max_upload_bytes = config.upload.max_bytes;
    let state = AppState::new(Arc::new(config));
    let router = create_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    let addr = listener.local_addr()?;
    info!(%addr, max_upload_bytes, "Starting tiny tools server (HTTP)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl-C; shutting down");
        return;
    }
    info!("Ctrl-C received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_limit_must_be_positive() {
        assert_eq!(parse_upload_limit("1024"), Ok(1024));
        assert!(parse_upload_limit("0").is_err());
        assert!(parse_upload_limit("ten").is_err());
    }

    #[test]
    fn large_upload_override_warns() {
        let cli = Cli::try_parse_from([
            "tiny-server",
            "--max-upload-bytes",
            "209715200",
        ])
        .unwrap();
        let mut config = Config::default();
        let mut warnings = ConfigWarnings::default();

        apply_overrides(&cli.serve, &mut config, &mut warnings).unwrap();

        assert_eq!(config.upload.max_bytes, 200 * 1024 * 1024);
        assert_eq!(warnings.len(), 1);
        assert!(warnings.items[0].message.contains("209715200"));
    }

    #[test]
    fn cli_accepts_overrides_and_config_check() {
        let cli = Cli::try_parse_from([
            "tiny-server",
            "--port",
            "8080",
            "--max-upload-bytes",
            "2048",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.serve.port, Some(8080));
        assert_eq!(cli.serve.max_upload_bytes, Some(2048));

        let cli =
            Cli::try_parse_from(["tiny-server", "config", "check"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config(ConfigCommand::Check))
        ));
    }
}
