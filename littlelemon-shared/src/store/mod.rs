/// Storage interface for menu items and bookings
///
/// Handlers never touch the database directly. They receive repository trait
/// objects through application state, which lets the server run against
/// PostgreSQL in production and against the [`memory`] stores in tests or
/// when no database is configured.
///
/// # Implementations
///
/// - [`postgres::PgMenuStore`], [`postgres::PgBookingStore`]: sqlx-backed, with a
///   unique (date, slot) constraint on bookings
/// - [`memory::MemoryMenuStore`], [`memory::MemoryBookingStore`]: in-process,
///   each guarded by a single write lock
///
/// # Booking slots
///
/// `BookingRepository::insert` and `BookingRepository::update` must check the
/// target (date, slot) and write the record as one atomic step, returning
/// [`StoreError::SlotTaken`] if another booking already holds the pair.
///
/// # Example
///
/// ```
/// use littlelemon_shared::models::menu_item::NewMenuItem;
/// use littlelemon_shared::store::{memory::MemoryMenuStore, MenuRepository};
///
/// # async fn example() -> Result<(), littlelemon_shared::store::StoreError> {
/// let store = MemoryMenuStore::new();
/// let item = store.create(NewMenuItem {
///     name: "Pasta".to_string(),
///     price: 12,
///     description: "Creamy".to_string(),
/// }).await?;
///
/// assert_eq!(store.get(item.id).await?, Some(item));
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use crate::models::{
    booking::{Booking, NewBooking},
    menu_item::{MenuItem, NewMenuItem},
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another booking already holds this (date, slot) pair
    #[error("Slot {slot} on {date} is already booked")]
    SlotTaken { date: NaiveDate, slot: i16 },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations for menu items
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Lists all menu items in insertion order
    async fn list(&self) -> StoreResult<Vec<MenuItem>>;

    /// Persists a new menu item and returns it with its assigned ID
    async fn create(&self, data: NewMenuItem) -> StoreResult<MenuItem>;

    /// Finds a menu item by ID
    async fn get(&self, id: i64) -> StoreResult<Option<MenuItem>>;

    /// Replaces every mutable field of a menu item
    ///
    /// Returns `None` if no item has this ID.
    async fn update(&self, id: i64, data: NewMenuItem) -> StoreResult<Option<MenuItem>>;

    /// Deletes a menu item, returning whether a record was removed
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// Persistence operations for bookings
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Lists all bookings in insertion order
    async fn list(&self) -> StoreResult<Vec<Booking>>;

    /// Lists bookings on one date, ordered by slot
    async fn list_by_date(&self, date: NaiveDate) -> StoreResult<Vec<Booking>>;

    /// Finds the booking holding a (date, slot) pair
    async fn find_by_slot(&self, date: NaiveDate, slot: i16) -> StoreResult<Option<Booking>>;

    /// Finds a booking by ID
    async fn get(&self, id: i64) -> StoreResult<Option<Booking>>;

    /// Atomically checks the slot and inserts a booking
    ///
    /// Fails with [`StoreError::SlotTaken`] if the slot is held.
    async fn insert(&self, data: NewBooking) -> StoreResult<Booking>;

    /// Replaces every mutable field of a booking
    ///
    /// Returns `None` if no booking has this ID. Fails with
    /// [`StoreError::SlotTaken`] if the target slot is held by another booking.
    async fn update(&self, id: i64, data: NewBooking) -> StoreResult<Option<Booking>>;

    /// Deletes a booking, returning whether a record was removed
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}
