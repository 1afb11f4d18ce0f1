//! # Ladle Server
//!
//! Recipe CRUD and image upload API.
//!
//! The server is built on Axum and uses:
//! - PostgreSQL for recipe storage
//! - Cloudinary for image hosting

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use ladle_config::{Config, ConfigLoad, ConfigLoader, ConfigLoaderOptions};
use ladle_core::{PostgresDatabase, RecipeRepository};
use ladle_server::{
    AppState, create_app,
    infra::startup::{build_uploader, log_config_warnings},
};
use std::{path::PathBuf, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "ladle-server")]
#[command(about = "Recipe manager API with image uploads")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Path to a ladle.toml configuration file
    #[arg(short, long, env = "LADLE_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Path to a .env file (defaults to ./.env)
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_runtime_config(&cli.serve)?;

    if let Some(Command::Db(DbCommand::Migrate)) = cli.command {
        let database = connect_database(&config).await?;
        database
            .initialize_schema()
            .await
            .context("database migration failed")?;
        info!("Database migrations applied successfully");
        return Ok(());
    }

    run_server(config).await
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Arc<Config>> {
    let ConfigLoad {
        mut config,
        warnings,
    } = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: args.config.clone(),
        env_file: args.env_file.clone(),
    })
    .load()
    .context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "configuration file loaded");
    }
    log_config_warnings(&warnings);

    Ok(Arc::new(config))
}

async fn connect_database(config: &Config) -> anyhow::Result<PostgresDatabase> {
    let Some(database_url) = config.database.primary_url.as_deref() else {
        error!(
            "DATABASE_URL or DATABASE_HOST/DATABASE_USER/DATABASE_NAME must be provided"
        );
        return Err(anyhow::anyhow!(
            "No PostgreSQL connection configuration found"
        ));
    };

    if !(database_url.starts_with("postgres://")
        || database_url.starts_with("postgresql://"))
    {
        return Err(anyhow::anyhow!(
            "Invalid database URL: must start with postgres:// or postgresql://"
        ));
    }

    PostgresDatabase::new(database_url, config.database.max_connections)
        .await
        .context("failed to connect to PostgreSQL")
}

async fn run_server(config: Arc<Config>) -> anyhow::Result<()> {
    let database = connect_database(&config).await?;
    database
        .initialize_schema()
        .await
        .context("database migration failed")?;

    let repository = RecipeRepository::new(database.recipe_store());
    let uploader = build_uploader(&config.cloudinary)
        .context("failed to initialise media uploader")?;

    let state = AppState::new(repository, uploader, config.clone());
    let app = create_app(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, dev_mode = config.dev_mode, "Ladle server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Ladle server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
