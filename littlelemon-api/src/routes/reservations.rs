/// Public booking endpoint
///
/// Guests submit bookings here without credentials. Every submission goes
/// through the conflict guard, so a (date, slot) pair can only be booked once.
///
/// # Endpoints
///
/// - `GET /bookings?date=YYYY-MM-DD` - Bookings on a date (default: today)
/// - `POST /bookings` - Submit a booking

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{ApiQuery, ValidatedJson},
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::{Local, NaiveDate};
use littlelemon_shared::{
    models::booking::{Booking, NewBooking},
    reservations,
};
use serde::{de, Deserialize, Deserializer};

/// Query string for date-filtered listings
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    /// Date to list (YYYY-MM-DD); today when omitted or blank
    #[serde(default, deserialize_with = "blank_as_none")]
    pub date: Option<NaiveDate>,
}

/// A cleared date input submits `date=`, which means "no date"
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(de::Error::custom),
        _ => Ok(None),
    }
}

impl DateQuery {
    /// Returns the requested date, falling back to the current local date
    pub fn date_or_today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// List bookings on a date
///
/// # Endpoint
///
/// ```text
/// GET /bookings?date=2024-05-01
/// ```
///
/// # Response
///
/// ```json
/// [
///   { "id": 1, "first_name": "Alice", "reservation_date": "2024-05-01", "reservation_slot": 3 }
/// ]
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: `date` is not a valid date
pub async fn bookings_for_date(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> ApiResult<Json<Vec<Booking>>> {
    let bookings = reservations::list_bookings(state.bookings.as_ref(), query.date_or_today()).await?;
    Ok(Json(bookings))
}

/// Submit a booking
///
/// # Endpoint
///
/// ```text
/// POST /bookings
/// Content-Type: application/json
///
/// { "first_name": "Alice", "reservation_date": "2024-05-01", "reservation_slot": 3 }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Slot already booked
/// - `422 Unprocessable Entity`: Missing or malformed fields
pub async fn submit_booking(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewBooking>,
) -> ApiResult<(StatusCode, Json<Booking>)> {
    let booking = reservations::submit_booking(state.bookings.as_ref(), req).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_query_explicit() {
        let query = DateQuery {
            date: NaiveDate::from_ymd_opt(2024, 5, 1),
        };
        assert_eq!(query.date_or_today(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_blank_date_is_absent() {
        let query: DateQuery = serde_json::from_str(r#"{"date": ""}"#).unwrap();
        assert!(query.date.is_none());

        let query: DateQuery = serde_json::from_str(r#"{"date": "2024-05-01"}"#).unwrap();
        assert_eq!(query.date, NaiveDate::from_ymd_opt(2024, 5, 1));

        assert!(serde_json::from_str::<DateQuery>(r#"{"date": "tomorrow"}"#).is_err());
    }

    #[test]
    fn test_date_query_defaults_to_today() {
        assert_eq!(DateQuery::default().date_or_today(), Local::now().date_naive());
    }
}
