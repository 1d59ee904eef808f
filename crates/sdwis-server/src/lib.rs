//! HTTP server for the SDWIS snapshot dashboard.
//!
//! Mounts the JSON API from [`sdwis_api`] and the chat forwarder under
//! `/api`, over any [`SnapshotStore`].

pub mod chat;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::post};
use config::{Config, ConfigError, Environment, File};
use sdwis_core::{Quarter, store::SnapshotStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use chat::ChatClient;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered from built-in defaults, an optional TOML file, then `SDWIS_*`
/// environment variables (`SDWIS_CHAT__API_KEY` sets `chat.api_key`).
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub snapshot_path:  PathBuf,
  pub active_quarter: Quarter,
  pub chat:           ChatConfig,
}

/// Settings for the OpenAI-compatible completion provider.
#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
  pub api_base: String,
  pub model:    String,
  /// Chat is disabled (503) when unset.
  pub api_key:  Option<String>,
}

impl ServerConfig {
  /// Load configuration; a missing `path` is not an error.
  pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
    Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3000)?
      .set_default("snapshot_path", "sdwa_georgia.db")?
      .set_default("active_quarter", Quarter::DEFAULT)?
      .set_default("chat.api_base", "https://api.openai.com/v1")?
      .set_default("chat.model", "gpt-4o-mini")?
      .add_source(File::from(path.into()).required(false))
      .add_source(
        Environment::with_prefix("SDWIS")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()?
      .try_deserialize()
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the router.
pub struct AppState<S: SnapshotStore> {
  pub store: Arc<S>,
  pub chat:  Arc<ChatClient>,
}

impl<S: SnapshotStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), chat: self.chat.clone() }
  }
}

impl<S: SnapshotStore> AppState<S> {
  pub fn new(store: S, config: &ServerConfig) -> reqwest::Result<Self> {
    Ok(Self {
      store: Arc::new(store),
      chat:  Arc::new(ChatClient::new(config.chat.clone())?),
    })
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: `/api/*` plus request tracing.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: SnapshotStore + 'static,
{
  let chat = Router::new()
    .route("/chat", post(chat::handler))
    .with_state(state.chat);

  Router::new()
    .nest("/api", sdwis_api::api_router(state.store).merge(chat))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
