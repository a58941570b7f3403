pub mod auth;
pub mod health;
pub mod hotspot_images;
pub mod hotspots;
pub mod tours;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                                           login (public)
///
/// /users                                           list, create
/// /users/forgot-password                           issue reset token (public)
/// /users/reset-password/{token}                    reset password (public)
/// /users/{id}                                      get, update, delete
/// /users/{id}/password                             change password
///
/// /tours                                           list, create (multipart)
/// /tours/dashboard                                 tour summaries
/// /tours/{id}                                      get, update (multipart), delete
/// /tours/images/{id}                               update, delete a tour image
/// /tours/full/{id}                                 scenes keyed by name (viewer)
/// /tours/record/backend/{id}                       scenes in order (dashboard)
///
/// /hotspots                                        create
/// /hotspots/{id}                                   get, update, delete
/// /hotspots/tour-image/{tour_image_id}             hotspots on one image
///
/// /hotspot/images                                  icon assets
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/tours", tours::router())
        .nest("/hotspots", hotspots::router())
        .nest("/hotspot", hotspot_images::router())
}
