//! Route definitions for the `/hotspot` icon assets.

use axum::routing::get;
use axum::Router;

use crate::handlers::hotspot_images;
use crate::state::AppState;

/// Routes mounted at `/hotspot`.
///
/// ```text
/// GET /images  -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/images", get(hotspot_images::list))
}
