use acumba_cache_domain::CliOverrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

mod bootstrap;
mod commands;
mod di;

#[derive(Parser)]
#[command(name = "acumba-cache")]
#[command(version)]
#[command(about = "Persistent response cache for Acumbamail API calls")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Database path
    #[arg(long, global = true)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the cache report
    Stats {
        /// Days of hit-rate history to include
        #[arg(long, default_value_t = 7)]
        days: u32,

        /// Also write the report as JSON to FILE
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
    /// Remove expired entries, enforce limits and optimize storage
    Cleanup {
        #[arg(long, value_name = "N")]
        max_per_endpoint: Option<u64>,

        #[arg(long, value_name = "N")]
        max_total: Option<u64>,

        /// Skip the checkpoint/VACUUM/ANALYZE pass
        #[arg(long)]
        no_optimize: bool,
    },
    /// Look up a cached response
    Get {
        endpoint: String,

        /// Call parameter as key=value (value parsed as JSON when possible)
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = commands::parse_param)]
        params: Vec<(String, serde_json::Value)>,
    },
    /// Store a response
    Set {
        endpoint: String,

        /// Response payload as JSON
        #[arg(long)]
        data: String,

        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = commands::parse_param)]
        params: Vec<(String, serde_json::Value)>,

        /// Override the configured TTL
        #[arg(long, value_name = "SECS")]
        ttl: Option<u64>,
    },
    /// Run the maintenance jobs until interrupted
    Maintain,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };
    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    info!(version = env!("CARGO_PKG_VERSION"), "acumba-cache starting");

    let (write_pool, read_pool) =
        bootstrap::database::init_database(&config.database.url(), &config.database).await?;

    let repos = di::Repositories::new(write_pool, read_pool, &config);
    let use_cases = di::UseCases::new(&repos, &config);

    match cli.command {
        Command::Stats { days, export } => commands::stats::run(&use_cases, days, export).await,
        Command::Cleanup {
            max_per_endpoint,
            max_total,
            no_optimize,
        } => commands::cleanup::run(&use_cases, max_per_endpoint, max_total, !no_optimize).await,
        Command::Get { endpoint, params } => {
            commands::entry::get(&use_cases, &endpoint, params).await
        }
        Command::Set {
            endpoint,
            data,
            params,
            ttl,
        } => commands::entry::set(&use_cases, &endpoint, params, &data, ttl).await,
        Command::Maintain => commands::maintain::run(&use_cases, &config).await,
    }
}
