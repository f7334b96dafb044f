/// Authentication and access control
///
/// Token issuance is handled by the Little Lemon identity service. This
/// module only validates the tokens it issues and decides which routes need
/// them.
///
/// # Modules
///
/// - [`jwt`]: HS256 token validation (and signing for the issuer/tests)
/// - [`middleware`]: `Authorization` header parsing into an [`middleware::AuthContext`]
/// - [`policy`]: Declared method → [`policy::AccessPolicy`] tables per route group

pub mod jwt;
pub mod middleware;
pub mod policy;
