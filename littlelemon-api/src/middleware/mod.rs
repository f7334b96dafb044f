/// Middleware modules for the API server
///
/// - `security`: Security response headers
///
/// The access policy guard lives next to the router in `app`.

pub mod security;
