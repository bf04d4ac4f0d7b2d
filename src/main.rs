// MindEcho server entry point.

use anyhow::Context;
use clap::Parser;
use log::info;
use mindecho::engine::state::AppState;
use mindecho::{build_router, load_config};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mindecho", version, about = "MindEcho wellness companion server")]
struct Args {
    /// TOML configuration file. Defaults to ./mindecho.toml when present.
    #[arg(long, env = "MINDECHO_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref()).context("loading configuration")?;
    let addr = config.socket_addr();
    info!(
        "[server] storage={:?} timeout={}s body_limit={}B",
        config.storage, config.request_timeout_secs, config.max_body_bytes
    );

    let state = AppState::from_config(config).context("opening mood store")?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("[server] Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("[server] Shutting down");
        })
        .await?;
    Ok(())
}
