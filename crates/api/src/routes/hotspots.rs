//! Route definitions for the `/hotspots` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::hotspots;
use crate::state::AppState;

/// Routes mounted at `/hotspots`.
///
/// ```text
/// POST   /                            -> create
/// GET    /{id}                        -> get_by_id
/// PUT    /{id}                        -> update
/// DELETE /{id}                        -> delete
/// GET    /tour-image/{tour_image_id}  -> list_by_tour_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(hotspots::create))
        .route(
            "/{id}",
            get(hotspots::get_by_id)
                .put(hotspots::update)
                .delete(hotspots::delete),
        )
        .route(
            "/tour-image/{tour_image_id}",
            get(hotspots::list_by_tour_image),
        )
}
