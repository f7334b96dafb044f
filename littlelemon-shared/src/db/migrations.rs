/// Database migration runner
///
/// Migrations are embedded from `littlelemon-shared/migrations/` at compile
/// time and applied on server startup.
///
/// # Tables
///
/// - `menu_items`
/// - `bookings` with the `bookings_date_slot_key` unique constraint on
///   `(reservation_date, reservation_slot)`

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration fails to apply
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
