//! Route definitions for the `/tours` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::tours;
use crate::state::AppState;

/// Routes mounted at `/tours`.
///
/// ```text
/// GET    /                     -> list
/// POST   /                     -> create (multipart)
/// GET    /dashboard            -> dashboard
/// GET    /{id}                 -> get_by_id
/// PUT    /{id}                 -> update (multipart)
/// DELETE /{id}                 -> delete
/// PUT    /images/{id}          -> update_image
/// DELETE /images/{id}          -> delete_image
/// GET    /full/{id}            -> get_full
/// GET    /record/backend/{id}  -> get_backend_record
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tours::list).post(tours::create))
        .route("/dashboard", get(tours::dashboard))
        .route(
            "/{id}",
            get(tours::get_by_id)
                .put(tours::update)
                .delete(tours::delete),
        )
        .route(
            "/images/{id}",
            put(tours::update_image).delete(tours::delete_image),
        )
        .route("/full/{id}", get(tours::get_full))
        .route("/record/backend/{id}", get(tours::get_backend_record))
}
