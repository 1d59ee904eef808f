//! `POST /api/chat`: forwards a conversation to an OpenAI-compatible
//! `chat/completions` endpoint with the assistant's system prompt prepended.
//!
//! The provider's JSON response is returned unchanged. No snapshot data is
//! injected into the prompt.

use std::{sync::Arc, time::Duration};

use axum::{Json, extract::State};
use reqwest::Client;
use sdwis_api::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::ChatConfig;

/// Instructions for the Georgia drinking-water assistant.
pub const SYSTEM_PROMPT: &str = include_str!("system_prompt.md");

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role:    String,
  pub content: String,
}

impl ChatMessage {
  pub fn system(content: impl Into<String>) -> Self {
    Self { role: "system".into(), content: content.into() }
  }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
  pub messages: Vec<ChatMessage>,
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Client for the configured completion provider.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ChatClient {
  client: Client,
  config: ChatConfig,
}

impl ChatClient {
  pub fn new(config: ChatConfig) -> reqwest::Result<Self> {
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String {
    format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'))
  }

  /// The provider request: the system prompt followed by the user's turns.
  pub fn completion_body(&self, messages: Vec<ChatMessage>) -> Value {
    let mut all = Vec::with_capacity(messages.len() + 1);
    all.push(ChatMessage::system(SYSTEM_PROMPT));
    all.extend(messages);
    json!({ "model": self.config.model, "messages": all })
  }

  pub async fn complete(&self, messages: Vec<ChatMessage>) -> Result<Value, ApiError> {
    let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) else {
      return Err(ApiError::Unavailable("chat is not configured (set chat.api_key)".into()));
    };

    let resp = self
      .client
      .post(self.url())
      .bearer_auth(api_key)
      .json(&self.completion_body(messages))
      .send()
      .await
      .map_err(|e| ApiError::Upstream(format!("request to chat provider failed: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
      let detail = resp.text().await.unwrap_or_default();
      return Err(ApiError::Upstream(format!("chat provider answered {status}: {detail}")));
    }

    resp
      .json()
      .await
      .map_err(|e| ApiError::Upstream(format!("chat provider sent invalid JSON: {e}")))
  }
}

// ─── Handler ──────────────────────────────────────────────────────────────────

/// `POST /api/chat`, body: `{"messages":[{"role":"user","content":"..."}]}`
pub async fn handler(
  State(chat): State<Arc<ChatClient>>,
  Json(body): Json<ChatRequest>,
) -> Result<Json<Value>, ApiError> {
  if body.messages.is_empty() {
    return Err(ApiError::BadRequest("at least one message is required".into()));
  }

  tracing::debug!(turns = body.messages.len(), "forwarding chat request");
  let completion = chat.complete(body.messages).await?;
  Ok(Json(completion))
}
