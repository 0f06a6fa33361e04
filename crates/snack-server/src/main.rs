use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use snack_config::SnackConfig;
use snack_core::{acceptable_now, now_in_reference_zone};
use snack_server::{bootstrap, render};
use snack_sheets::RecordSource;

mod cli;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("snackbot error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = SnackConfig::load_with_dotenv().context("failed to load configuration")?;
    init_tracing(cli.verbose || config.server.debug)?;

    match cli.command.unwrap_or(cli::Commands::Serve) {
        cli::Commands::Serve => serve(&config).await,
        cli::Commands::Now { at } => print_now(&config, at.unwrap_or_else(Utc::now)).await,
    }
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    let level = if debug { "debug" } else { "info" };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SNACKBOT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

async fn serve(config: &SnackConfig) -> anyhow::Result<()> {
    let state = bootstrap::build_state(config)?;
    let addr = config.server.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, debug = config.server.debug, "snackbot listening");
    axum::serve(listener, snack_server::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn print_now(config: &SnackConfig, at: DateTime<Utc>) -> anyhow::Result<()> {
    let source = bootstrap::build_source(&config.sheets)?;
    let records = source.fetch_all().await.context("failed to fetch records")?;
    let result = acceptable_now(&records, now_in_reference_zone(at))?;
    let body = render::api_body(&result, config.api.item_label)?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
