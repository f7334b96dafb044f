/// Route access policies
///
/// Every route group declares a [`PolicyTable`] mapping HTTP methods to an
/// [`AccessPolicy`]. The API server's guard layer looks up the request method
/// in the table and only checks credentials when the result is
/// [`AccessPolicy::Authenticated`]. Methods absent from a table require
/// authentication.
///
/// # Example
///
/// ```
/// use axum::http::Method;
/// use littlelemon_shared::auth::policy::{AccessPolicy, READ_OPEN_WRITE_AUTHENTICATED};
///
/// assert_eq!(READ_OPEN_WRITE_AUTHENTICATED.policy_for(&Method::GET), AccessPolicy::Open);
/// assert_eq!(READ_OPEN_WRITE_AUTHENTICATED.policy_for(&Method::DELETE), AccessPolicy::Authenticated);
/// ```

use axum::http::Method;
use serde::{Deserialize, Serialize};

/// Who may call a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessPolicy {
    /// Anyone, credentials are not inspected
    Open,

    /// Callers presenting a valid bearer token
    Authenticated,
}

/// Declared method → policy mapping for a route group
#[derive(Debug, Clone, Copy)]
pub struct PolicyTable {
    entries: &'static [(&'static str, AccessPolicy)],
}

impl PolicyTable {
    /// Creates a table from (method name, policy) pairs
    pub const fn new(entries: &'static [(&'static str, AccessPolicy)]) -> Self {
        Self { entries }
    }

    /// Looks up the policy for a method
    pub fn policy_for(&self, method: &Method) -> AccessPolicy {
        self.entries
            .iter()
            .find(|(name, _)| *name == method.as_str())
            .map(|(_, policy)| *policy)
            .unwrap_or(AccessPolicy::Authenticated)
    }
}

/// Reads are public, writes need a token (menu and booking resources)
pub const READ_OPEN_WRITE_AUTHENTICATED: PolicyTable = PolicyTable::new(&[
    ("GET", AccessPolicy::Open),
    ("HEAD", AccessPolicy::Open),
    ("OPTIONS", AccessPolicy::Open),
    ("POST", AccessPolicy::Authenticated),
    ("PUT", AccessPolicy::Authenticated),
    ("PATCH", AccessPolicy::Authenticated),
    ("DELETE", AccessPolicy::Authenticated),
]);

/// Public booking submission and listing
pub const PUBLIC_SUBMISSION: PolicyTable = PolicyTable::new(&[
    ("GET", AccessPolicy::Open),
    ("HEAD", AccessPolicy::Open),
    ("OPTIONS", AccessPolicy::Open),
    ("POST", AccessPolicy::Open),
]);
