//! JSON REST API over an SDWIS snapshot.
//!
//! Exposes an axum [`Router`] backed by any [`sdwis_core::store::SnapshotStore`].
//! Every route is a read; TLS, auth and tracing are the caller's concern.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", sdwis_api::api_router(store.clone()))
//! ```

pub mod codes;
pub mod error;
pub mod inspections;
pub mod overview;
pub mod params;
pub mod systems;
pub mod views;
pub mod violations;

use std::sync::Arc;

use axum::{Router, routing::get};
use sdwis_core::store::SnapshotStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: SnapshotStore + 'static,
{
  Router::new()
    // Systems
    .route("/systems", get(systems::list::<S>))
    .route("/systems/active", get(systems::active::<S>))
    .route("/systems/search", get(systems::search::<S>))
    .route("/systems/{pwsid}", get(systems::get_one::<S>))
    .route("/systems/{pwsid}/violations", get(systems::violations::<S>))
    .route("/systems/{pwsid}/facilities", get(systems::facilities::<S>))
    .route("/systems/{pwsid}/samples", get(systems::samples::<S>))
    .route("/systems/{pwsid}/areas", get(systems::areas::<S>))
    .route("/counties/{county}/systems", get(systems::in_county::<S>))
    // Violations
    .route("/violations", get(violations::list::<S>))
    .route("/violations/unaddressed", get(violations::unaddressed::<S>))
    .route("/violations/stats", get(violations::stats::<S>))
    .route("/violations/{pwsid}/{id}", get(violations::get_one::<S>))
    // Inspections, codes, overview
    .route("/inspections", get(inspections::handler::<S>))
    .route("/inspections/recent", get(inspections::recent::<S>))
    .route("/codes/{type}/{code}", get(codes::handler::<S>))
    .route("/overview", get(overview::handler::<S>))
    .with_state(store)
}

// ─── Router tests ─────────────────────────────────────────────────────────────
