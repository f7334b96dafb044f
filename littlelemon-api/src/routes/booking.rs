/// Booking resource endpoints
///
/// Staff-facing CRUD over bookings. Reads are open; writes require a bearer
/// token. Creating or moving a booking into a taken (date, slot) pair fails
/// with `409 Conflict`.
///
/// # Endpoints
///
/// - `GET /booking/` - List all bookings
/// - `POST /booking/` - Create booking
/// - `GET /booking/:id/` - Fetch one booking
/// - `PUT /booking/:id/` - Replace booking
/// - `DELETE /booking/:id/` - Delete booking

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiPath, ValidatedJson},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use littlelemon_shared::{
    auth::middleware::AuthContext,
    models::booking::{Booking, NewBooking},
};
use tracing::info;

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Booking {} not found", id))
}

/// List all bookings in insertion order
pub async fn list_bookings(State(state): State<AppState>) -> ApiResult<Json<Vec<Booking>>> {
    Ok(Json(state.bookings.list().await?))
}

/// Create booking
///
/// # Endpoint
///
/// ```text
/// POST /booking/
/// Authorization: Bearer <token>
///
/// { "first_name": "Alice", "reservation_date": "2024-05-01", "reservation_slot": 3 }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `409 Conflict`: Slot already booked
/// - `422 Unprocessable Entity`: Missing or malformed fields
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ValidatedJson(req): ValidatedJson<NewBooking>,
) -> ApiResult<(StatusCode, Json<Booking>)> {
    let booking = state.bookings.insert(req).await?;

    info!(booking_id = booking.id, by = %auth.subject, "Booking created");
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Fetch one booking
pub async fn get_booking(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Booking>> {
    state
        .bookings
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Replace a booking
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: No booking with this ID
/// - `409 Conflict`: Target slot held by another booking
pub async fn update_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(req): ValidatedJson<NewBooking>,
) -> ApiResult<Json<Booking>> {
    let booking = state
        .bookings
        .update(id, req)
        .await?
        .ok_or_else(|| not_found(id))?;

    info!(booking_id = id, by = %auth.subject, "Booking updated");
    Ok(Json(booking))
}

/// Delete a booking
pub async fn delete_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    if !state.bookings.delete(id).await? {
        return Err(not_found(id));
    }

    info!(booking_id = id, by = %auth.subject, "Booking deleted");
    Ok(StatusCode::NO_CONTENT)
}
