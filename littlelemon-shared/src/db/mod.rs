/// Database layer for Little Lemon
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: Embedded schema migrations
///
/// Queries live in [`crate::store::postgres`].

pub mod migrations;
pub mod pool;
