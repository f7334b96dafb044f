//! # Little Lemon Shared Library
//!
//! Domain types, storage and access control shared by the Little Lemon
//! restaurant server.
//!
//! ## Module Organization
//!
//! - `models`: Menu items and bookings
//! - `store`: Repository traits with PostgreSQL and in-memory implementations
//! - `reservations`: Booking conflict guard
//! - `auth`: Bearer token validation and route access policies
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod reservations;
pub mod store;

/// Current version of the Little Lemon shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
