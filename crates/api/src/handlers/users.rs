//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use panotour_core::error::CoreError;
use panotour_core::types::DbId;
use panotour_db::models::user::{CreateUser, UpdateUser, UserResponse};
use panotour_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, ValidatedJson};
use crate::handlers::MessageResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 128, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email is not a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let email = input.email.trim().to_string();
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A user with email {email} already exists"
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("User", id)))?;
    Ok(Json(user.into()))
}

/// PUT /api/users/{id}
///
/// Change name and/or email. At least one must be given.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    if input.name.is_none() && input.email.is_none() {
        return Err(AppError::BadRequest(
            "Provide at least one of name or email".into(),
        ));
    }

    let patch = UpdateUser {
        name: input.name.map(|n| n.trim().to_string()),
        email: input.email.map(|e| e.trim().to_string()),
    };
    let user = UserRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("User", id)))?;
    Ok(Json(user.into()))
}

/// PUT /api/users/{id}/password
pub async fn change_password(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let (Some(current), Some(new_password)) = (input.current_password, input.new_password) else {
        return Err(AppError::BadRequest(
            "current_password and new_password are required".into(),
        ));
    };
    validate_password_strength(&new_password).map_err(AppError::BadRequest)?;

    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("User", id)))?;

    let matches = verify_password(&current, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !matches {
        return Err(AppError::BadRequest("Current password is incorrect".into()));
    }

    let hash = hash_password(&new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::set_password_hash(&state.pool, id, &hash).await?;

    tracing::info!(user_id = id, "Password changed");
    Ok(Json(MessageResponse::new("Password updated successfully")))
}

/// DELETE /api/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if UserRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("User", id)))
    }
}
