//! Handlers for the `/auth` resource (login and password reset).

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use panotour_core::error::CoreError;
use panotour_core::password_reset::{generate_reset_token, hash_reset_token, reset_email_body};
use panotour_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::handlers::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Request body for `POST /users/forgot-password`.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

/// Request body for `POST /users/reset-password/{token}`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Authenticate with email + password. Returns a bearer token.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".into(),
        ));
    }

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    let token = generate_access_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.jwt.expires_in_secs(),
    }))
}

/// POST /api/users/forgot-password
///
/// Issue a one-hour reset token and mail the reset link. The plaintext token
/// only ever leaves the server in that mail.
pub async fn forgot_password(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = input.email.trim();
    if email.is_empty() {
        return Err(AppError::BadRequest("Email is required".into()));
    }

    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user with email {email}")))?;

    let token = generate_reset_token(Utc::now());
    UserRepo::set_reset_token(&state.pool, user.id, &token.hash, token.expires_at).await?;

    let link = format!(
        "{}/api/users/reset-password/{}",
        state.config.public_base_url, token.plaintext
    );

    match &state.mailer {
        Some(mailer) => {
            if let Err(e) = mailer.send_password_reset(&user.email, reset_email_body(&link)).await {
                tracing::error!(user_id = user.id, error = %e, "Failed to send password reset email");
            }
        }
        None => {
            tracing::debug!(user_id = user.id, %link, "SMTP not configured, reset email not sent");
        }
    }

    Ok(Json(MessageResponse::new("Password reset link sent")))
}

/// POST /api/users/reset-password/{token}
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    JsonBody(input): JsonBody<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let new_password = input
        .new_password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("New password is required".into()))?;
    validate_password_strength(&new_password).map_err(AppError::BadRequest)?;

    let user = UserRepo::find_by_reset_token(&state.pool, &hash_reset_token(&token), Utc::now())
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("Password reset token is invalid or has expired".into())
        })?;

    let hash = hash_password(&new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::set_password_hash(&state.pool, user.id, &hash).await?;

    tracing::info!(user_id = user.id, "Password reset");
    Ok(Json(MessageResponse::new("Password has been reset")))
}
