//! sdwis-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SDWA
//! snapshot read-only, and serves the JSON API over HTTP.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use sdwis_server::{AppState, ServerConfig};
use sdwis_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "SDWIS snapshot dashboard server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let snapshot_path = expand_tilde(&server_cfg.snapshot_path);

  // A missing snapshot aborts startup; the file is never created here.
  let store = SqliteStore::open(&snapshot_path, server_cfg.active_quarter.clone())
    .await
    .with_context(|| format!("failed to open snapshot at {snapshot_path:?}"))?;

  if server_cfg.chat.api_key.is_none() {
    tracing::warn!("chat.api_key is not set; /api/chat will answer 503");
  }

  let state = AppState::new(store, &server_cfg).context("failed to build chat client")?;
  let app = sdwis_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!(quarter = %server_cfg.active_quarter, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
