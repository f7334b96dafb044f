/// Route handlers
///
/// Handlers are grouped by resource:
///
/// - `health`: Health check endpoint
/// - `menu`: Menu item CRUD (`/menu/`)
/// - `booking`: Booking CRUD (`/booking/`)
/// - `reservations`: Public conflict-guarded bookings (`/bookings`)
/// - `pages`: Server-rendered HTML pages

pub mod booking;
pub mod health;
pub mod menu;
pub mod pages;
pub mod reservations;
