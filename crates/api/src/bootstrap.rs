//! First-account creation for fresh installs.
//!
//! Every user route requires a token, so an empty database would otherwise
//! have no way in.

use panotour_db::models::user::CreateUser;
use panotour_db::repositories::UserRepo;
use panotour_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create the configured account if no user exists yet.
///
/// Returns `true` when an account was created.
pub async fn ensure_bootstrap_admin(pool: &DbPool, admin: &BootstrapAdmin) -> AppResult<bool> {
    if UserRepo::count(pool).await? > 0 {
        return Ok(false);
    }

    validate_password_strength(&admin.password)
        .map_err(|e| AppError::BadRequest(format!("BOOTSTRAP_ADMIN_PASSWORD: {e}")))?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: admin.name.clone(),
            email: admin.email.trim().to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Bootstrap admin created");
    Ok(true)
}
