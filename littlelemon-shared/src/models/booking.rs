/// Booking model
///
/// A reservation for one named guest at a specific date and time slot.
/// At most one booking may hold any `(reservation_date, reservation_slot)` pair.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE bookings (
///     id BIGSERIAL PRIMARY KEY,
///     first_name VARCHAR(200) NOT NULL,
///     reservation_date DATE NOT NULL,
///     reservation_slot SMALLINT NOT NULL DEFAULT 10 CHECK (reservation_slot >= 0),
///     CONSTRAINT bookings_date_slot_key UNIQUE (reservation_date, reservation_slot)
/// );
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Slot used when a submission does not name one
pub const DEFAULT_SLOT: i16 = 10;

/// Booking record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    /// Unique booking ID (assigned by the store)
    pub id: i64,

    /// Guest first name
    pub first_name: String,

    /// Calendar date of the reservation
    pub reservation_date: NaiveDate,

    /// Time slot within the date
    pub reservation_slot: i16,
}

impl Booking {
    /// Returns the (date, slot) pair this booking occupies
    pub fn slot_key(&self) -> (NaiveDate, i16) {
        (self.reservation_date, self.reservation_slot)
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : {} / slot {}",
            self.first_name, self.reservation_date, self.reservation_slot
        )
    }
}

/// Input for creating or fully replacing a booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewBooking {
    /// Guest first name
    #[validate(length(min = 1, max = 200, message = "First name must be 1-200 characters"))]
    pub first_name: String,

    /// Calendar date of the reservation (YYYY-MM-DD)
    pub reservation_date: NaiveDate,

    /// Time slot within the date
    #[serde(default = "default_slot")]
    #[validate(range(min = 0, message = "Slot must not be negative"))]
    pub reservation_slot: i16,
}

fn default_slot() -> i16 {
    DEFAULT_SLOT
}

impl NewBooking {
    /// Returns the (date, slot) pair this input targets
    pub fn slot_key(&self) -> (NaiveDate, i16) {
        (self.reservation_date, self.reservation_slot)
    }

    /// Builds the stored record for this input under the given ID
    pub fn into_record(self, id: i64) -> Booking {
        Booking {
            id,
            first_name: self.first_name,
            reservation_date: self.reservation_date,
            reservation_slot: self.reservation_slot,
        }
    }
}
