use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use sanve_domain::settings::{BankInfo, PricingConfig, SmtpCredentials};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/config
pub async fn get_pricing(State(state): State<AppState>) -> Result<Json<PricingConfig>, AppError> {
    let pricing = state.settings.pricing().await.map_err(AppError::storage)?;
    Ok(Json(pricing))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingUpdate {
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub loading_time: Option<i64>,
}

/// PUT /api/admin/config
pub async fn update_pricing(
    State(state): State<AppState>,
    Json(payload): Json<PricingUpdate>,
) -> Result<Json<Value>, AppError> {
    let config = match (payload.min_price, payload.max_price, payload.loading_time) {
        (Some(min_price), Some(max_price), Some(loading_time)) => PricingConfig {
            min_price,
            max_price,
            loading_time,
        },
        _ => return Err(AppError::MissingField),
    };

    state
        .settings
        .replace_pricing(&config)
        .await
        .map_err(AppError::storage)?;

    Ok(Json(json!({
        "message": "Cập nhật cấu hình thành công",
        "data": config,
    })))
}

/// GET /api/bank-info
pub async fn get_bank_info(State(state): State<AppState>) -> Result<Json<BankInfo>, AppError> {
    let info = state.settings.bank_info().await.map_err(AppError::storage)?;
    Ok(Json(info))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankInfoUpdate {
    pub bin: Option<String>,
    pub account_number: Option<String>,
    pub account_name: Option<String>,
}

/// PUT /api/admin/bank-info
pub async fn update_bank_info(
    State(state): State<AppState>,
    Json(payload): Json<BankInfoUpdate>,
) -> Result<Json<Value>, AppError> {
    let info = match (payload.bin, payload.account_number, payload.account_name) {
        (Some(bin), Some(account_number), Some(account_name)) => BankInfo {
            bin,
            account_number,
            account_name,
        },
        _ => return Err(AppError::MissingField),
    };

    state
        .settings
        .replace_bank_info(&info)
        .await
        .map_err(AppError::storage)?;

    Ok(Json(json!({
        "message": "Cập nhật thông tin ngân hàng thành công",
        "data": info,
    })))
}

/// GET /api/admin/smtp-config
pub async fn get_smtp(State(state): State<AppState>) -> Result<Json<SmtpCredentials>, AppError> {
    let credentials = state
        .settings
        .smtp_credentials()
        .await
        .map_err(AppError::storage)?;
    Ok(Json(credentials))
}

#[derive(Debug, Deserialize)]
pub struct SmtpUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// PUT /api/admin/smtp-config
///
/// Takes effect on the very next send; the dispatcher re-reads this row
/// before every email.
pub async fn update_smtp(
    State(state): State<AppState>,
    Json(payload): Json<SmtpUpdate>,
) -> Result<Json<Value>, AppError> {
    let credentials = match (payload.email, payload.password) {
        (Some(email), Some(password)) => SmtpCredentials { email, password },
        _ => return Err(AppError::MissingField),
    };

    state
        .settings
        .replace_smtp_credentials(&credentials)
        .await
        .map_err(AppError::storage)?;

    Ok(Json(json!({
        "message": "Cập nhật cấu hình SMTP thành công",
        "data": credentials,
    })))
}
