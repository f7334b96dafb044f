/// Booking conflict guard
///
/// Public booking submissions go through [`submit_booking`], which refuses a
/// booking whose (date, slot) pair is already held.
///
/// # Flow
///
/// ```text
/// submit_booking()
///   ├─> find_by_slot(date, slot)   existing booking → Conflict
///   └─> insert(booking)            atomic in the store; a concurrent
///                                  winner also surfaces as Conflict
/// ```
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use littlelemon_shared::models::booking::NewBooking;
/// use littlelemon_shared::reservations::{submit_booking, ReservationError};
/// use littlelemon_shared::store::memory::MemoryBookingStore;
///
/// # async fn example() -> Result<(), ReservationError> {
/// let store = MemoryBookingStore::new();
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
///
/// let alice = NewBooking { first_name: "Alice".into(), reservation_date: date, reservation_slot: 3 };
/// submit_booking(&store, alice).await?;
///
/// let bob = NewBooking { first_name: "Bob".into(), reservation_date: date, reservation_slot: 3 };
/// assert!(matches!(
///     submit_booking(&store, bob).await,
///     Err(ReservationError::Conflict { .. })
/// ));
/// # Ok(())
/// # }
/// ```

use crate::models::booking::{Booking, NewBooking};
use crate::store::{BookingRepository, StoreError};
use chrono::NaiveDate;
use tracing::{info, warn};

/// Error type for booking submissions
#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    /// The (date, slot) pair is already booked
    #[error("Slot {slot} on {date} is already booked")]
    Conflict { date: NaiveDate, slot: i16 },

    /// Storage failure
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ReservationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SlotTaken { date, slot } => ReservationError::Conflict { date, slot },
            other => ReservationError::Store(other),
        }
    }
}

/// Submits a booking unless its (date, slot) pair is already held
///
/// # Errors
///
/// - [`ReservationError::Conflict`] if another booking holds the slot
/// - [`ReservationError::Store`] if the store fails
pub async fn submit_booking(
    store: &dyn BookingRepository,
    data: NewBooking,
) -> Result<Booking, ReservationError> {
    let (date, slot) = data.slot_key();

    if let Some(existing) = store.find_by_slot(date, slot).await? {
        warn!(%date, slot, existing_id = existing.id, "Booking rejected: slot already taken");
        return Err(ReservationError::Conflict { date, slot });
    }

    let booking = store.insert(data).await.map_err(|e| {
        if matches!(e, StoreError::SlotTaken { .. }) {
            warn!(%date, slot, "Booking rejected: slot taken by concurrent submission");
        }
        ReservationError::from(e)
    })?;

    info!(booking_id = booking.id, %date, slot, "Booking accepted");
    Ok(booking)
}

/// Lists the bookings on a date, ordered by slot
pub async fn list_bookings(
    store: &dyn BookingRepository,
    date: NaiveDate,
) -> Result<Vec<Booking>, ReservationError> {
    Ok(store.list_by_date(date).await?)
}
