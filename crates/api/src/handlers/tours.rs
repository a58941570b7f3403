//! Handlers for the `/tours` resource and its images.
//!
//! Create and update take `multipart/form-data`; everything else is JSON.
//! The two scene endpoints serve the assembled tour graph.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use panotour_core::error::CoreError;
use panotour_core::image_sync::{parse_image_ids, plan_image_sync};
use panotour_core::tour::{assemble_tour, Projection, SceneCollection};
use panotour_core::types::DbId;
use panotour_core::upload::MAX_IMAGES_PER_REQUEST;
use panotour_db::aggregate::PgTourAggregateSource;
use panotour_db::models::tour::{CreateTour, TourSummary, TourWithImages, UpdateTour};
use panotour_db::models::tour_image::{CreateTourImage, TourImage, UpdateTourImage};
use panotour_db::repositories::{TourImageRepo, TourRepo};

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::handlers::MessageResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::storage::{PendingUpload, StoredUpload};

// ---------------------------------------------------------------------------
// Multipart form
// ---------------------------------------------------------------------------

/// Fields accepted by tour create and update.
#[derive(Debug, Default)]
struct TourForm {
    name: Option<String>,
    description: Option<String>,
    project_logo: Option<PendingUpload>,
    /// Existing images to keep, in their new order. Update only.
    image_ids: Option<Vec<DbId>>,
    images: Vec<PendingUpload>,
}

impl TourForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = TourForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "name" => form.name = Some(read_text(field).await?),
                "description" => form.description = Some(read_text(field).await?),
                "image_ids" => {
                    let raw = read_text(field).await?;
                    form.image_ids = Some(parse_image_ids(&raw)?);
                }
                "project_logo" => form.project_logo = Some(PendingUpload::from_field(field).await?),
                "images" | "images[]" => {
                    if form.images.len() == MAX_IMAGES_PER_REQUEST {
                        return Err(AppError::BadRequest(format!(
                            "At most {MAX_IMAGES_PER_REQUEST} images per request"
                        )));
                    }
                    form.images.push(PendingUpload::from_field(field).await?);
                }
                _ => {} // ignore unknown fields
            }
        }

        Ok(form)
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

fn non_blank(value: Option<String>, field: &str) -> AppResult<Option<String>> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if v.is_empty() => Err(AppError::Core(CoreError::Validation(format!(
            "{field} must not be empty"
        )))),
        other => Ok(other),
    }
}

/// Store the logo (if any) and the panoramas in one batch.
///
/// Returns the stored logo separately from the panoramas.
async fn store_files(
    state: &AppState,
    logo: Option<PendingUpload>,
    images: &[PendingUpload],
) -> AppResult<(Option<StoredUpload>, Vec<StoredUpload>)> {
    let has_logo = logo.is_some();
    let batch: Vec<PendingUpload> = logo.into_iter().chain(images.iter().cloned()).collect();
    let mut stored = state.uploads.save_all(&batch).await?;
    let logo = has_logo.then(|| stored.remove(0));
    Ok((logo, stored))
}

/// Rows for stored panoramas, numbered from 1 in upload order.
fn new_image_rows(stored: &[StoredUpload]) -> Vec<CreateTourImage> {
    stored
        .iter()
        .zip(1..)
        .map(|(file, sort_order)| CreateTourImage {
            name: file.stored_name.clone(),
            url: file.url.clone(),
            sort_order,
        })
        .collect()
}

fn all_files(logo: &Option<StoredUpload>, images: &[StoredUpload]) -> Vec<StoredUpload> {
    logo.iter().chain(images).cloned().collect()
}

// ---------------------------------------------------------------------------
// Tours
// ---------------------------------------------------------------------------

/// POST /api/tours
///
/// Multipart: `name` (required), `description`, `project_logo` (one image),
/// `images` (up to 30 panoramas, stored in upload order).
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<TourWithImages>)> {
    let form = TourForm::read(multipart).await?;
    let name = non_blank(form.name, "name")?
        .ok_or_else(|| AppError::Core(CoreError::Validation("name is required".into())))?;

    let (logo, images) = store_files(&state, form.project_logo, &form.images).await?;

    let input = CreateTour {
        name,
        description: form.description,
        project_logo: logo.as_ref().map(|l| l.url.clone()),
    };
    let rows = new_image_rows(&images);

    match TourRepo::create(&state.pool, &input, &rows).await {
        Ok(tour) => {
            tracing::info!(
                tour_id = tour.tour.id,
                user_id = user.user_id,
                images = tour.tour_images.len(),
                "Tour created"
            );
            Ok((StatusCode::CREATED, Json(tour)))
        }
        Err(e) => {
            state.uploads.discard(&all_files(&logo, &images)).await;
            Err(e.into())
        }
    }
}

/// GET /api/tours
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<TourWithImages>>> {
    let tours = TourRepo::list_with_images(&state.pool).await?;
    Ok(Json(tours))
}

/// GET /api/tours/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<TourSummary>>> {
    let summaries = TourRepo::list_summaries(&state.pool).await?;
    Ok(Json(summaries))
}

/// GET /api/tours/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TourWithImages>> {
    let tour = TourRepo::find_with_images(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Tour", id)))?;
    Ok(Json(tour))
}

/// PUT /api/tours/{id}
///
/// Multipart: optional `name`, `description`, `project_logo`, `image_ids`
/// (JSON array of images to keep, in order) and new `images`. Images not in
/// `image_ids` are deleted; without `image_ids` existing images are kept and
/// new ones appended.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<TourWithImages>> {
    let form = TourForm::read(multipart).await?;
    let name = non_blank(form.name, "name")?;

    if TourRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::not_found("Tour", id)));
    }
    let keep = form.image_ids.as_deref();
    // Reject a bad keep-list before any file is written. The repository
    // plans again under the tour lock.
    let existing = TourImageRepo::existing_for_tour(&state.pool, id).await?;
    plan_image_sync(&existing, keep)?;

    let (logo, images) = store_files(&state, form.project_logo, &form.images).await?;

    let input = UpdateTour {
        name,
        description: form.description,
        project_logo: logo.as_ref().map(|l| l.url.clone()),
    };
    let rows = new_image_rows(&images);

    let updated = match TourRepo::update(&state.pool, id, &input, keep, &rows).await {
        Ok(Some(tour)) => tour,
        Ok(None) => {
            state.uploads.discard(&all_files(&logo, &images)).await;
            return Err(AppError::Core(CoreError::not_found("Tour", id)));
        }
        Err(e) => {
            state.uploads.discard(&all_files(&logo, &images)).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        tour_id = id,
        user_id = user.user_id,
        images = updated.tour_images.len(),
        added_images = rows.len(),
        "Tour updated"
    );
    Ok(Json(updated))
}

/// DELETE /api/tours/{id}
///
/// Removes the tour, its images and their hotspots.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TourRepo::delete(&state.pool, id).await? {
        tracing::info!(tour_id = id, user_id = user.user_id, "Tour deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Tour", id)))
    }
}

// ---------------------------------------------------------------------------
// Tour images
// ---------------------------------------------------------------------------

/// PUT /api/tours/images/{id}
///
/// Edit scene metadata: label, order and initial view angles. A `null`
/// angle clears the override.
pub async fn update_image(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateTourImage>,
) -> AppResult<Json<TourImage>> {
    let input = UpdateTourImage {
        name: non_blank(input.name, "name")?,
        ..input
    };
    if let Some(Some(pitch)) = input.init_pitch {
        if !(-90.0..=90.0).contains(&pitch) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "init_pitch must be between -90 and 90, got {pitch}"
            ))));
        }
    }
    if let Some(Some(yaw)) = input.init_yaw {
        if !(-360.0..=360.0).contains(&yaw) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "init_yaw must be between -360 and 360, got {yaw}"
            ))));
        }
    }

    let image = TourImageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("TourImage", id)))?;
    Ok(Json(image))
}

/// DELETE /api/tours/images/{id}
///
/// Hotspots placed on the image go with it; hotspots linking to it keep
/// existing with the link cleared.
pub async fn delete_image(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !TourImageRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("TourImage", id)));
    }
    tracing::info!(tour_image_id = id, "Tour image deleted");
    Ok(Json(MessageResponse::new("Image deleted successfully")))
}

// ---------------------------------------------------------------------------
// Scene graph
// ---------------------------------------------------------------------------

/// GET /api/tours/full/{id}
///
/// Scenes keyed by scene name, for the public viewer.
pub async fn get_full(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<SceneCollection>> {
    let source = PgTourAggregateSource::new(state.pool.clone());
    let scenes = assemble_tour(&source, id, Projection::Keyed).await?;
    Ok(Json(scenes))
}

/// GET /api/tours/record/backend/{id}
///
/// One scene per tour image in display order, for the authoring dashboard.
pub async fn get_backend_record(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<SceneCollection>> {
    let source = PgTourAggregateSource::new(state.pool.clone());
    let scenes = assemble_tour(&source, id, Projection::Indexed).await?;
    Ok(Json(scenes))
}
