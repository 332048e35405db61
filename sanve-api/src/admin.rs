use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;
use crate::token::{self, AdminClaims, AuthError};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /api/admin/login
///
/// A mismatch never reveals whether the username or the password was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let (username, password) = match (payload.username, payload.password) {
        (Some(username), Some(password)) => (username, password),
        _ => return Err(AppError::MissingField),
    };

    let valid = state
        .settings
        .verify_admin(&username, &password)
        .await
        .map_err(AppError::storage)?;
    if !valid {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = token::issue(&state.auth.secret, &username, state.auth.token_ttl_hours)
        .map_err(|e| AppError::Internal(format!("Token encoding failed: {e}")))?;

    info!("Admin login: {}", username);

    Ok(Json(json!({
        "message": "Đăng nhập thành công",
        "token": token,
    })))
}

/// GET /api/admin/check-auth
pub async fn check_auth() -> Json<Value> {
    Json(json!({ "message": "Đã đăng nhập", "token": true }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeCredentialsRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub new_username: Option<String>,
}

/// PUT /api/admin/change-credentials
///
/// The current-password check is scoped to the token's own username. The old
/// token stays valid until it expires; only the fresh one names the new
/// identity.
pub async fn change_credentials(
    State(state): State<AppState>,
    Extension(claims): Extension<AdminClaims>,
    Json(payload): Json<ChangeCredentialsRequest>,
) -> Result<Json<Value>, AppError> {
    let (current_password, new_password, new_username) = match (
        payload.current_password,
        payload.new_password,
        payload.new_username,
    ) {
        (Some(current), Some(password), Some(username)) => (current, password, username),
        _ => return Err(AppError::MissingField),
    };

    let valid = state
        .settings
        .verify_admin(&claims.username, &current_password)
        .await
        .map_err(AppError::storage)?;
    if !valid {
        return Err(AuthError::CurrentPasswordMismatch.into());
    }

    if new_username != claims.username {
        let taken = state
            .settings
            .username_taken(&new_username, &claims.username)
            .await
            .map_err(AppError::storage)?;
        if taken {
            return Err(AppError::UsernameTaken);
        }
    }

    state
        .settings
        .replace_admin(&claims.username, &new_username, &new_password)
        .await
        .map_err(AppError::storage)?;

    let token = token::issue(&state.auth.secret, &new_username, state.auth.token_ttl_hours)
        .map_err(|e| AppError::Internal(format!("Token encoding failed: {e}")))?;

    info!("Admin credentials rotated for {}", new_username);

    Ok(Json(json!({
        "message": "Cập nhật thông tin đăng nhập thành công",
        "token": token,
    })))
}
