/// PostgreSQL repository implementations
///
/// Booking slot uniqueness is enforced by the `bookings_date_slot_key` unique
/// constraint. Inserts use `ON CONFLICT DO NOTHING` so a taken slot comes
/// back as an empty result instead of an error; updates map the unique
/// violation to [`StoreError::SlotTaken`].
///
/// # Example
///
/// ```no_run
/// use littlelemon_shared::db::pool::{create_pool, DatabaseConfig};
/// use littlelemon_shared::store::{postgres::PgBookingStore, BookingRepository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// let bookings = PgBookingStore::new(pool);
/// let today = chrono::Local::now().date_naive();
/// let todays = bookings.list_by_date(today).await?;
/// # Ok(())
/// # }
/// ```

use super::{BookingRepository, MenuRepository, StoreError, StoreResult};
use crate::models::{
    booking::{Booking, NewBooking},
    menu_item::{MenuItem, NewMenuItem},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

/// sqlx-backed menu item store
#[derive(Debug, Clone)]
pub struct PgMenuStore {
    pool: PgPool,
}

impl PgMenuStore {
    /// Creates a store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuRepository for PgMenuStore {
    async fn list(&self) -> StoreResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, price, description
            FROM menu_items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn create(&self, data: NewMenuItem) -> StoreResult<MenuItem> {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            INSERT INTO menu_items (name, price, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, description
            "#,
        )
        .bind(data.name)
        .bind(data.price)
        .bind(data.description)
        .fetch_one(&self.pool)
        .await?;

        debug!(menu_item_id = item.id, "Created menu item");
        Ok(item)
    }

    async fn get(&self, id: i64) -> StoreResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, price, description
            FROM menu_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn update(&self, id: i64, data: NewMenuItem) -> StoreResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            UPDATE menu_items
            SET name = $2, price = $3, description = $4
            WHERE id = $1
            RETURNING id, name, price, description
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.price)
        .bind(data.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// sqlx-backed booking store
#[derive(Debug, Clone)]
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    /// Creates a store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a unique violation on the slot constraint to `SlotTaken`
fn slot_conflict(err: sqlx::Error, date: NaiveDate, slot: i16) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::SlotTaken { date, slot }
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl BookingRepository for PgBookingStore {
    async fn list(&self) -> StoreResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, first_name, reservation_date, reservation_slot
            FROM bookings
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn list_by_date(&self, date: NaiveDate) -> StoreResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, first_name, reservation_date, reservation_slot
            FROM bookings
            WHERE reservation_date = $1
            ORDER BY reservation_slot, id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn find_by_slot(&self, date: NaiveDate, slot: i16) -> StoreResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, first_name, reservation_date, reservation_slot
            FROM bookings
            WHERE reservation_date = $1 AND reservation_slot = $2
            "#,
        )
        .bind(date)
        .bind(slot)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, first_name, reservation_date, reservation_slot
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn insert(&self, data: NewBooking) -> StoreResult<Booking> {
        let (date, slot) = data.slot_key();

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (first_name, reservation_date, reservation_slot)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT bookings_date_slot_key DO NOTHING
            RETURNING id, first_name, reservation_date, reservation_slot
            "#,
        )
        .bind(data.first_name)
        .bind(date)
        .bind(slot)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::SlotTaken { date, slot })?;

        debug!(booking_id = booking.id, %date, slot, "Inserted booking");
        Ok(booking)
    }

    async fn update(&self, id: i64, data: NewBooking) -> StoreResult<Option<Booking>> {
        let (date, slot) = data.slot_key();

        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET first_name = $2, reservation_date = $3, reservation_slot = $4
            WHERE id = $1
            RETURNING id, first_name, reservation_date, reservation_slot
            "#,
        )
        .bind(id)
        .bind(data.first_name)
        .bind(date)
        .bind(slot)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| slot_conflict(e, date, slot))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
