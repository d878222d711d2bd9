use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
#[cfg(not(target_env = "msvc"))]
use jemallocator::Jemalloc;
use tracing::{error, info};
use tracing_subscriber::{filter, prelude::*, Layer};

use crate::api::AnalyticsClient;
use crate::charts::Metric;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod api;
mod charts;
mod compare;
mod models;
mod share;
mod views;

#[derive(Debug, Clone)]
struct Config {
    api_base_url: String,
    default_puuid: Option<String>,
    log_path: PathBuf,
}

fn load_config() -> Result<Config> {
    dotenv().ok();

    let api_base_url =
        env::var("ANALYTICS_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

    // The only place a subject identifier may come from besides the command
    // line. Views never hold a fallback PUUID of their own.
    let default_puuid = env::var("RIFT_PUUID").ok().filter(|s| !s.trim().is_empty());

    let log_path_str = env::var("LOG_PATH").unwrap_or_else(|_| {
        if cfg!(target_os = "linux") {
            "/var/logs/rift-rewind"
        } else {
            "."
        }
        .to_string()
    });
    let log_path = PathBuf::from(log_path_str);

    Ok(Config {
        api_base_url,
        default_puuid,
        log_path,
    })
}

#[derive(Parser)]
#[command(name = "rift-rewind")]
#[command(about = "Terminal front-end for the Rift Rewind player analytics service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-game progress chart with a rolling-average overlay
    Progress {
        /// Subject PUUID (falls back to RIFT_PUUID)
        #[arg(long)]
        puuid: Option<String>,

        /// Metric to plot: kda, kills, damage or cs
        #[arg(long, default_value = "kda")]
        metric: String,
    },

    /// Persistent strengths, weaknesses and improvement tips
    Strengths {
        /// Subject PUUID (falls back to RIFT_PUUID)
        #[arg(long)]
        puuid: Option<String>,
    },

    /// Head-to-head comparison of two players
    Compare {
        /// First player PUUID
        #[arg(long, default_value = "")]
        puuid1: String,

        /// Second player PUUID
        #[arg(long, default_value = "")]
        puuid2: String,
    },

    /// Shareable highlight cards
    Moments {
        /// Subject PUUID (falls back to RIFT_PUUID)
        #[arg(long)]
        puuid: Option<String>,
    },
}

fn resolve_puuid(arg: Option<String>, config: &Config) -> Result<String> {
    arg.filter(|s| !s.trim().is_empty())
        .or_else(|| config.default_puuid.clone())
        .context("No subject PUUID: pass --puuid or set RIFT_PUUID")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config().context("Failed to load configuration")?;

    std::panic::set_hook(Box::new(|i| {
        error!("Panic'd: {}", i);
    }));

    let file_appender = tracing_appender::rolling::daily(&config.log_path, "rift-rewind.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_appender)
                .with_filter(filter::filter_fn(|metadata| {
                    metadata.target().starts_with("rift_rewind_cli")
                })),
        )
        .init();

    info!("Using analytics service at {}", config.api_base_url);

    let http_client = reqwest::Client::builder()
        .connection_verbose(true)
        .build()
        .context("Error creating HTTP client")?;
    let client = AnalyticsClient::new(http_client, config.api_base_url.clone());

    let output = match cli.command {
        Commands::Progress { puuid, metric } => {
            let puuid = resolve_puuid(puuid, &config)?;
            views::progress(&client, &puuid, Metric::parse(&metric)).await
        }
        Commands::Strengths { puuid } => {
            let puuid = resolve_puuid(puuid, &config)?;
            views::strengths(&client, &puuid).await
        }
        Commands::Compare { puuid1, puuid2 } => views::compare(&client, &puuid1, &puuid2).await,
        Commands::Moments { puuid } => {
            let puuid = resolve_puuid(puuid, &config)?;
            views::moments(&client, &puuid).await
        }
    };

    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(default_puuid: Option<&str>) -> Config {
        Config {
            api_base_url: "http://localhost:8000".to_string(),
            default_puuid: default_puuid.map(str::to_string),
            log_path: PathBuf::from("."),
        }
    }

    #[test]
    fn explicit_puuid_wins_over_config() {
        let config = config_with(Some("config-puuid"));
        let resolved = resolve_puuid(Some("arg-puuid".to_string()), &config).unwrap();
        assert_eq!(resolved, "arg-puuid");
    }

    #[test]
    fn config_puuid_fills_in_when_arg_missing() {
        let config = config_with(Some("config-puuid"));
        let resolved = resolve_puuid(None, &config).unwrap();
        assert_eq!(resolved, "config-puuid");
    }

    #[test]
    fn blank_arg_counts_as_missing() {
        let config = config_with(Some("config-puuid"));
        let resolved = resolve_puuid(Some("   ".to_string()), &config).unwrap();
        assert_eq!(resolved, "config-puuid");
    }

    #[test]
    fn missing_everywhere_is_an_error() {
        let config = config_with(None);
        let result = resolve_puuid(None, &config);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "No subject PUUID: pass --puuid or set RIFT_PUUID"
        );
    }
}
