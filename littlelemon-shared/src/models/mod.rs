/// Domain models for Little Lemon
///
/// This module contains the records owned by the storage layer and the input
/// types used to create or replace them.
///
/// # Models
///
/// - `menu_item`: Dishes on the menu
/// - `booking`: Table reservations keyed by (date, slot)
///
/// Persistence lives behind the repository traits in [`crate::store`].

pub mod booking;
pub mod menu_item;
