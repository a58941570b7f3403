use axum::extract::State;
use axum::Json;
use panotour_db::models::hotspot_image::HotspotImage;
use panotour_db::repositories::HotspotImageRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/hotspot/images
///
/// Icon assets available to hotspots.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<HotspotImage>>> {
    let images = HotspotImageRepo::list(&state.pool).await?;
    Ok(Json(images))
}
