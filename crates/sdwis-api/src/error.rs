//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error renders as `{"error": <summary>, "details": <diagnostic>}`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The chat provider failed or answered with an error status.
  #[error("upstream error: {0}")]
  Upstream(String),

  /// A feature is switched off by configuration.
  #[error("unavailable: {0}")]
  Unavailable(String),
}

impl ApiError {
  /// Box a backend error. Used as `.map_err(ApiError::store)`.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }

  fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
      ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
  }

  fn summary(&self) -> &'static str {
    match self {
      ApiError::NotFound(_) => "Not found",
      ApiError::BadRequest(_) => "Bad request",
      ApiError::Store(_) => "Failed to query snapshot",
      ApiError::Upstream(_) => "Chat provider error",
      ApiError::Unavailable(_) => "Service unavailable",
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let details = match &self {
      ApiError::NotFound(m)
      | ApiError::BadRequest(m)
      | ApiError::Upstream(m)
      | ApiError::Unavailable(m) => m.clone(),
      ApiError::Store(e) => e.to_string(),
    };

    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }

    (status, Json(json!({ "error": self.summary(), "details": details }))).into_response()
  }
}
