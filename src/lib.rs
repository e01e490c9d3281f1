pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;

use std::net::SocketAddr;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;
use db::Store;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    config.validate()?;

    init_tracing(&config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let prometheus_handle = init_metrics(&config)?;
            run_server(config, prometheus_handle).await
        }
        Commands::Ui => run_ui(config).await,
        Commands::Seed => cmd_seed(&config).await,
        Commands::Init => cmd_init(),
    }
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let json = config.general.log_format == "json";

    let loki_layer = if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let (layer, task) = tracing_loki::builder()
            .label("app", "fanhub")?
            .extra_field("version", env!("CARGO_PKG_VERSION"))?
            .build_url(url)?;

        tokio::spawn(task);
        Some(layer)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .with(loki_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if config.observability.loki_enabled {
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    }

    Ok(())
}

fn init_metrics(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("FanHub API v{} starting...", env!("CARGO_PKG_VERSION"));

    let port = config.server.port;
    let state = api::create_app_state_from_config(config, prometheus_handle).await?;
    let app = api::router(state).await;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind API server to {addr}"))?;

    info!("API server running at http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn run_ui(config: Config) -> anyhow::Result<()> {
    let client = ui::create_client(&config)?;
    info!("FanHub UI using API at {}", client.base_url());

    let app = ui::router(client);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.ui.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind UI server to {addr}"))?;

    info!("UI server running at http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("UI server stopped");
    Ok(())
}

async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let report = store.seed_if_empty(&config.seed, &config.security).await?;

    if report.is_empty() {
        println!("Database already seeded; nothing inserted.");
    } else {
        println!("Seed complete:");
        println!("  shows:      {}", report.shows);
        println!("  seasons:    {}", report.seasons);
        println!("  episodes:   {}", report.episodes);
        println!("  characters: {}", report.characters);
        println!("  quotes:     {}", report.quotes);
        println!("  users:      {}", report.users);

        if let Some(password) = &report.generated_admin_password {
            println!(
                "Admin password for {}: {password} (shown once)",
                config.seed.admin_email
            );
        }
    }

    Ok(())
}

fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Created config.toml with default settings.");
    } else {
        println!("config.toml already exists; left unchanged.");
    }
    Ok(())
}
