//! Back-office accounts: login and user creation

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{LoginRequest, LoginResponse, Role, User};
use sqlx::SqlitePool;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::permissions::permissions_for;
use crate::auth::{CurrentUser, JwtService};
use crate::db::repository::{RepoError, user};
use crate::security_log;
use crate::utils::validation::{
    MAX_PASSWORD_LEN, MAX_USERNAME_LEN, MIN_PASSWORD_LEN, validate_required_text,
};

/// Verify credentials and issue an access token
///
/// Unknown user and wrong password produce the same error.
pub async fn login(
    pool: &SqlitePool,
    jwt_service: &JwtService,
    request: LoginRequest,
) -> AppResult<LoginResponse> {
    let username = request.username.trim();
    let record = match user::find_by_username(pool, username).await? {
        Some(record) => record,
        None => {
            security_log!("WARN", "login_failed", username = username, reason = "unknown_user");
            return Err(AppError::invalid_credentials());
        }
    };

    let valid = verify_password(&request.password, &record.password_hash).map_err(|e| {
        tracing::error!(user_id = record.id, error = %e, "Stored password hash is unreadable");
        AppError::internal("Password verification failed")
    })?;
    if !valid {
        security_log!("WARN", "login_failed", username = username, reason = "bad_password");
        return Err(AppError::invalid_credentials());
    }

    if !record.is_active {
        security_log!("WARN", "login_failed", username = username, reason = "disabled");
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let token = jwt_service
        .generate_token(
            record.id,
            &record.username,
            record.role,
            permissions_for(record.role),
        )
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))?;

    security_log!(
        "INFO",
        "login_success",
        user_id = record.id,
        username = record.username.clone(),
        role = record.role.as_str()
    );

    Ok(LoginResponse {
        token,
        expires_in: jwt_service.expires_in_seconds(),
        user: record.into(),
    })
}

/// The account behind a token; it may have been removed since login
pub async fn current_user(pool: &SqlitePool, current: &CurrentUser) -> AppResult<User> {
    user::find_by_id(pool, current.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("id", current.id))
}

pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
    role: Role,
) -> AppResult<User> {
    let username = username.trim();
    validate_required_text(username, "username", MAX_USERNAME_LEN)?;
    if username.chars().any(char::is_whitespace) {
        return Err(AppError::validation("username must not contain spaces")
            .with_detail("field", "username"));
    }

    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(AppError::validation(format!(
            "password must be {MIN_PASSWORD_LEN} to {MAX_PASSWORD_LEN} characters"
        ))
        .with_detail("field", "password"));
    }

    let hash = hash_password(password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let created = user::create(pool, username, &hash, role)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::with_message(
                ErrorCode::UsernameExists,
                format!("User '{username}' already exists"),
            ),
            other => other.into(),
        })?;

    security_log!(
        "INFO",
        "user_created",
        user_id = created.id,
        username = created.username.clone(),
        role = created.role.as_str()
    );
    Ok(created)
}
