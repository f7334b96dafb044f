//! # Little Lemon API Server Library
//!
//! HTTP surface for the Little Lemon restaurant: the menu and booking JSON
//! resources, the public booking endpoint and the server-rendered pages.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder and access policy guard
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Request extractors with JSON rejections
//! - `middleware`: Tower middleware
//! - `routes`: Route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
