//! Handlers for the `/hotspots` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use panotour_core::error::CoreError;
use panotour_core::hotspot_validation::{validate_hotspot, HotspotFields};
use panotour_core::types::DbId;
use panotour_db::models::hotspot::{CreateHotspot, Hotspot, HotspotWithRefs, UpdateHotspot};
use panotour_db::repositories::{HotspotImageRepo, HotspotRepo, TourImageRepo};

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::handlers::MessageResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Validate field ranges, then check that every referenced row exists.
async fn check_hotspot(state: &AppState, input: &CreateHotspot) -> AppResult<()> {
    validate_hotspot(&HotspotFields {
        pitch: input.pitch,
        yaw: input.yaw,
        hfov: input.hfov,
        kind: &input.kind,
        name: &input.name,
        tour_image_id: input.tour_image_id,
        linked_tour_image_id: input.linked_tour_image_id,
    })?;

    let missing = |what: &str, id: DbId| {
        AppError::Core(CoreError::Validation(format!("{what} with id {id} does not exist")))
    };

    if TourImageRepo::find_by_id(&state.pool, input.tour_image_id)
        .await?
        .is_none()
    {
        return Err(missing("Tour image", input.tour_image_id));
    }
    if let Some(linked) = input.linked_tour_image_id {
        if TourImageRepo::find_by_id(&state.pool, linked).await?.is_none() {
            return Err(missing("Linked tour image", linked));
        }
    }
    if let Some(icon) = input.hotspot_image_id {
        if HotspotImageRepo::find_by_id(&state.pool, icon).await?.is_none() {
            return Err(missing("Hotspot image", icon));
        }
    }
    Ok(())
}

/// POST /api/hotspots
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    JsonBody(input): JsonBody<CreateHotspot>,
) -> AppResult<(StatusCode, Json<Hotspot>)> {
    let input = CreateHotspot {
        name: input.name.trim().to_string(),
        ..input
    };
    check_hotspot(&state, &input).await?;

    let hotspot = HotspotRepo::create(&state.pool, &input).await?;
    tracing::info!(
        hotspot_id = hotspot.id,
        tour_image_id = hotspot.tour_image_id,
        "Hotspot created"
    );
    Ok((StatusCode::CREATED, Json(hotspot)))
}

/// GET /api/hotspots/tour-image/{tour_image_id}
///
/// Hotspots placed on one tour image with their references expanded.
/// An image without hotspots answers 404.
pub async fn list_by_tour_image(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(tour_image_id): Path<DbId>,
) -> AppResult<Json<Vec<HotspotWithRefs>>> {
    let hotspots = HotspotRepo::list_with_refs_by_tour_image(&state.pool, tour_image_id).await?;
    if hotspots.is_empty() {
        return Err(AppError::NotFound(format!(
            "No hotspots found for tour image {tour_image_id}"
        )));
    }
    Ok(Json(hotspots))
}

/// GET /api/hotspots/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Hotspot>> {
    let hotspot = HotspotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Hotspot", id)))?;
    Ok(Json(hotspot))
}

/// PUT /api/hotspots/{id}
///
/// Partial update. The merged record is validated like a new hotspot.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(patch): JsonBody<UpdateHotspot>,
) -> AppResult<Json<Hotspot>> {
    let current = HotspotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Hotspot", id)))?;

    let mut merged = patch.merge_into(&current);
    merged.name = merged.name.trim().to_string();
    check_hotspot(&state, &merged).await?;

    let hotspot = HotspotRepo::update(&state.pool, id, &merged)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Hotspot", id)))?;
    Ok(Json(hotspot))
}

/// DELETE /api/hotspots/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !HotspotRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Hotspot", id)));
    }
    tracing::info!(hotspot_id = id, "Hotspot deleted");
    Ok(Json(MessageResponse::new("Hotspot deleted successfully")))
}
