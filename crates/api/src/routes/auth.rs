//! Public authentication routes.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes merged at the API root. None of them require a token.
///
/// ```text
/// POST /login                         -> login
/// POST /users/forgot-password         -> forgot_password
/// POST /users/reset-password/{token}  -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/users/forgot-password", post(auth::forgot_password))
        .route("/users/reset-password/{token}", post(auth::reset_password))
}
