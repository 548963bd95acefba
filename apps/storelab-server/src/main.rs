mod http;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sales_insights::{SalesInsightsConfig, SalesInsightsModule};
use storelab_bootstrap::{AppConfig, CliArgs, init_logging};
use storelab_db::{build_connect_options, build_db_handle};

/// Storelab Server - analytical queries over a small sales database
#[derive(Parser)]
#[command(name = "storelab-server")]
#[command(about = "Storelab Server - analytical queries over a small sales database")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database filled with demo data
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Migrate the database and start the server
    Run,
    /// Validate configuration and exit
    Check,
    /// Apply database migrations and exit
    Migrate,
    /// Apply migrations, insert the demo catalog and exit
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.clone(),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Keep the guard alive so the file writer flushes on exit.
    let _log_guard = init_logging(&config.logging)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Storelab Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, &args).await,
        Commands::Check => check_config(&config),
        Commands::Migrate => migrate(config).await,
        Commands::Seed => seed(config).await,
    }
}

fn module_config(config: &AppConfig, args: &CliArgs) -> Result<SalesInsightsConfig> {
    let mut cfg: SalesInsightsConfig = config.module_config_or_default(SalesInsightsModule::NAME)?;
    if args.mock {
        cfg.run_migrations = true;
        cfg.seed_demo_data = true;
    }
    Ok(cfg)
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    build_connect_options(&config.database).context("invalid database configuration")?;
    config.module_config_or_default::<SalesInsightsConfig>(SalesInsightsModule::NAME)?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn migrate(config: AppConfig) -> Result<()> {
    let db = build_db_handle(config.database).await?;
    SalesInsightsModule::migrate(&db).await?;
    db.close().await?;
    Ok(())
}

async fn seed(config: AppConfig) -> Result<()> {
    let db = build_db_handle(config.database).await?;
    SalesInsightsModule::migrate(&db).await?;
    match SalesInsightsModule::seed(&db).await? {
        Some(summary) => println!(
            "Inserted {} clients, {} products, {} orders, {} order lines",
            summary.clients, summary.products, summary.orders, summary.details
        ),
        None => println!("Database already has clients; nothing inserted"),
    }
    db.close().await?;
    Ok(())
}

async fn run_server(config: AppConfig, args: &CliArgs) -> Result<()> {
    tracing::info!("Initializing modules...");

    let module_cfg = module_config(&config, args)?;
    let db = build_db_handle(config.database).await?;
    let module = SalesInsightsModule::init(&db, &module_cfg).await?;

    let app = http::build_app(module.router(&config.server.base_path), &config.server);
    let result = http::serve(app, config.server.bind_addr).await;

    db.close().await?;
    result
}
