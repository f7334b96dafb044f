/// In-memory repository implementations
///
/// Records live in ordered maps keyed by ID behind a `tokio::sync::RwLock`.
/// IDs are assigned from a per-store counter starting at 1 and never reused,
/// so map order is insertion order.
///
/// Every booking write takes the write lock for the full check-and-write, so
/// two concurrent submissions for the same (date, slot) cannot both succeed.
///
/// Used when the server runs without `DATABASE_URL` and as the test double for
/// handler tests.

use super::{BookingRepository, MenuRepository, StoreError, StoreResult};
use crate::models::{
    booking::{Booking, NewBooking},
    menu_item::{MenuItem, NewMenuItem},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Table of records with a monotonically increasing ID counter
#[derive(Debug)]
struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory menu item store
#[derive(Debug, Default)]
pub struct MemoryMenuStore {
    table: RwLock<Table<MenuItem>>,
}

impl MemoryMenuStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuRepository for MemoryMenuStore {
    async fn list(&self) -> StoreResult<Vec<MenuItem>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn create(&self, data: NewMenuItem) -> StoreResult<MenuItem> {
        let mut table = self.table.write().await;
        let id = table.allocate_id();
        let item = data.into_record(id);
        table.rows.insert(id, item.clone());

        debug!(menu_item_id = id, "Created menu item");
        Ok(item)
    }

    async fn get(&self, id: i64) -> StoreResult<Option<MenuItem>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, data: NewMenuItem) -> StoreResult<Option<MenuItem>> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        *row = data.into_record(id);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}

/// In-memory booking store
#[derive(Debug, Default)]
pub struct MemoryBookingStore {
    table: RwLock<Table<Booking>>,
}

impl MemoryBookingStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

/// Returns the ID of the booking holding a slot, if any
fn slot_holder(rows: &BTreeMap<i64, Booking>, date: NaiveDate, slot: i16) -> Option<i64> {
    rows.values()
        .find(|b| b.slot_key() == (date, slot))
        .map(|b| b.id)
}

#[async_trait]
impl BookingRepository for MemoryBookingStore {
    async fn list(&self) -> StoreResult<Vec<Booking>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn list_by_date(&self, date: NaiveDate) -> StoreResult<Vec<Booking>> {
        let table = self.table.read().await;
        let mut bookings: Vec<Booking> = table
            .rows
            .values()
            .filter(|b| b.reservation_date == date)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| (b.reservation_slot, b.id));
        Ok(bookings)
    }

    async fn find_by_slot(&self, date: NaiveDate, slot: i16) -> StoreResult<Option<Booking>> {
        let table = self.table.read().await;
        Ok(slot_holder(&table.rows, date, slot).and_then(|id| table.rows.get(&id).cloned()))
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Booking>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, data: NewBooking) -> StoreResult<Booking> {
        let mut table = self.table.write().await;
        let (date, slot) = data.slot_key();
        if slot_holder(&table.rows, date, slot).is_some() {
            return Err(StoreError::SlotTaken { date, slot });
        }

        let id = table.allocate_id();
        let booking = data.into_record(id);
        table.rows.insert(id, booking.clone());

        debug!(booking_id = id, %date, slot, "Inserted booking");
        Ok(booking)
    }

    async fn update(&self, id: i64, data: NewBooking) -> StoreResult<Option<Booking>> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }

        let (date, slot) = data.slot_key();
        if matches!(slot_holder(&table.rows, date, slot), Some(holder) if holder != id) {
            return Err(StoreError::SlotTaken { date, slot });
        }

        let booking = data.into_record(id);
        table.rows.insert(id, booking.clone());
        Ok(Some(booking))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}
