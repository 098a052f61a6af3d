//! Neurowake
//!
//! Run with: cargo run -- serve
//!
//! # Configuration
//!
//! Config file (first found): `$XDG_CONFIG_HOME/neurowake/config.toml`,
//! `/etc/neurowake/config.toml`, `./config.toml`, or `--config PATH`.
//!
//! Environment variables:
//! - `NEUROWAKE_HOST`: Host to bind to (default: 127.0.0.1)
//! - `NEUROWAKE_PORT`: Port to listen on (default: 8501)
//! - `NEUROWAKE_SESSION_TTL_SECS`: Idle session timeout (default: 3600)
//! - `NEUROWAKE_LOG_LEVEL`: Log level (default: info)
//! - `NEUROWAKE_LOG_FORMAT`: pretty or json (default: pretty)
//! - `RUST_LOG`: Full filter directive, overrides the log level

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use neurowake::config::{generate_default_config, Config, ConfigLoad, LoggingConfig};
use neurowake::metrics::{draw_seed, generate, NightlyMetrics, MAX_SEED};
use neurowake::ui::format_hours;
use neurowake::{serve, AppState};

#[derive(Parser)]
#[command(name = "neurowake")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mock AI sleep dashboard")]
#[command(long_about = "Neurowake serves a sleep dashboard with randomly generated predictions.\nFeedback is kept per browser session, in memory only.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the dashboard server (default)
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print one set of nightly metrics
    Generate {
        /// Seed to derive metrics from (default: random)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(0..=MAX_SEED))]
        seed: Option<u64>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            let mut loaded = load_config(cli.config.as_deref())?;
            if let Some(host) = host {
                loaded.config.server.host = host;
            }
            if let Some(port) = port {
                loaded.config.server.port = port;
            }
            run_server(loaded).await
        }

        Commands::Generate { seed, format } => {
            let metrics = generate(seed.unwrap_or_else(draw_seed));
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&metrics)?),
                OutputFormat::Text => print_metrics(&metrics),
            }
            Ok(())
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write config to {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ConfigLoad> {
    match path {
        Some(path) => {
            let config = Config::load_with_env(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?;
            Ok(ConfigLoad {
                config,
                source: Some(path.to_path_buf()),
                errors: Vec::new(),
            })
        }
        None => Ok(Config::load_default()),
    }
}

async fn run_server(loaded: ConfigLoad) -> anyhow::Result<()> {
    let ConfigLoad {
        config,
        source,
        errors,
    } = loaded;
    init_logging(&config.logging);

    // Reported only now that a subscriber exists
    for error in &errors {
        tracing::warn!("Skipping config file: {}", error);
    }
    match &source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }

    tracing::info!("Starting Neurowake v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        page_title = %config.server.page_title,
        layout = %config.server.layout,
        session_ttl_secs = config.session.idle_timeout_secs,
        "Dashboard configured"
    );

    let state = AppState::from_config(&config);
    serve(state, &config.server)
        .await
        .context("Dashboard server failed")?;

    tracing::info!("Neurowake stopped");
    Ok(())
}

/// Initialize tracing from the logging config; `RUST_LOG` takes precedence
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("neurowake={},tower_http=debug", logging.level))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn print_metrics(metrics: &NightlyMetrics) {
    println!("{}", metrics.lunar_label);
    println!("  Sleep score:     {} ({:+})", metrics.sleep_score, metrics.score_delta);
    println!("  Total sleep:     {} hrs", format_hours(metrics.total_sleep_hours));
    println!(
        "  Deep / REM:      {} / {} hrs",
        format_hours(metrics.deep_sleep_hours),
        format_hours(metrics.rem_sleep_hours)
    );
    println!("  Sleep latency:   {} min", metrics.sleep_latency_minutes);
    println!();
    for row in &metrics.stage_breakdown {
        println!("  {:<6} {:>5}", row.stage.as_str(), format_hours(row.hours));
    }
    println!();
    println!("seed: {}", metrics.seed);
}
