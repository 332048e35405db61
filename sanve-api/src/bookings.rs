use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use sanve_domain::booking::{booking_reference, creation_timestamp, Booking, NewBooking};
use sanve_notify::{ConfirmationEmail, SuccessEmail};

use crate::error::AppError;
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<NewBooking>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let draft = payload.validate()?;

    let created_at = creation_timestamp();
    let id = state
        .bookings
        .insert(&draft, &created_at)
        .await
        .map_err(AppError::storage)?;

    info!("Booking stored: {}", id);

    // Durable point reached; the confirmation mail is fire-and-forget.
    state.notifier.dispatch_booking_created(ConfirmationEmail {
        to: draft.contact_email().to_owned(),
        booking_reference: booking_reference(&draft.flight_id),
        airline: draft.airline.clone(),
        flight_type: draft.flight_type.as_str().to_owned(),
        origin: draft.origin.clone(),
        destination: draft.destination.clone(),
        date: draft.date.clone(),
        departure_time: draft.departure_time.clone(),
        arrival_time: draft.arrival_time.clone(),
        return_date: draft.return_date.clone(),
        passengers: draft.passengers.clone(),
        amount: draft.amount,
        qr_code_url: draft.qr_code_url.clone().unwrap_or_default(),
    });

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Đặt chỗ thành công" })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(rename = "idNumber")]
    pub id_number: Option<String>,
}

/// GET /api/history-booking?idNumber=<substring>
pub async fn booking_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Value>, AppError> {
    let needle = query
        .id_number
        .filter(|n| !n.is_empty())
        .ok_or(AppError::MissingLookupKey)?;

    let bookings = state
        .bookings
        .find_by_contact_fragment(&needle)
        .await
        .map_err(AppError::storage)?;

    Ok(Json(json!({
        "message": "Lấy lịch sử thành công",
        "data": bookings,
    })))
}

/// GET /api/admin/history-booking
pub async fn admin_history(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let bookings = state.bookings.list_all().await.map_err(AppError::storage)?;

    Ok(Json(json!({
        "message": "Lấy lịch sử thành công",
        "data": bookings,
    })))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: Option<String>,
}

/// PUT /api/admin/history-booking/{id}
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<Value>, AppError> {
    let status = payload.status.ok_or(AppError::MissingStatus)?;

    let updated = state
        .bookings
        .update_status(id, &status)
        .await
        .map_err(AppError::storage)?;
    if !updated {
        return Err(AppError::NotFound("Không tìm thấy đặt chỗ".to_string()));
    }

    if status == "success" {
        if let Some(booking) = state.bookings.fetch(id).await.map_err(AppError::storage)? {
            let origin = request_origin(&headers, &state);
            state
                .notifier
                .dispatch_booking_succeeded(success_notice(&booking, &origin));
        }
    }

    Ok(Json(json!({ "message": "Cập nhật trạng thái thành công" })))
}

/// DELETE /api/admin/history-booking/{id}
///
/// Reports success even when the id never existed, matching the storefront
/// contract the front end relies on.
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let removed = state.bookings.delete(id).await.map_err(AppError::storage)?;
    if !removed {
        info!("Delete of missing booking {} ignored", id);
    }

    Ok(Json(json!({ "message": "Xóa thành công" })))
}

/// Lookup links point back at whichever front end made the admin request.
fn request_origin(headers: &HeaderMap, state: &AppState) -> String {
    headers
        .get(header::ORIGIN)
        .and_then(|o| o.to_str().ok())
        .unwrap_or(&state.site.fallback_origin)
        .to_string()
}

fn success_notice(booking: &Booking, origin: &str) -> SuccessEmail {
    // The lookup key may be absent from older bookings; the link then
    // carries an empty search term rather than failing the dispatch.
    let search_url = format!(
        "{}/tra-cuu-lich-su-dat-ve?tim_kiem={}",
        origin,
        booking.id_lookup_key()
    );

    SuccessEmail {
        to: booking.contact_email().to_owned(),
        booking_reference: booking.flight_id.clone(),
        search_url,
    }
}
