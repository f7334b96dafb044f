/// Credential extraction for protected routes
///
/// Parses the `Authorization` header, validates the bearer token and produces
/// an [`AuthContext`] that guard layers insert into request extensions.
///
/// Both `Bearer <token>` and `Token <token>` schemes are accepted.
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap, HeaderValue};
/// use littlelemon_shared::auth::jwt::{create_token, Claims};
/// use littlelemon_shared::auth::middleware::authenticate;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "your-secret-key-at-least-32-bytes";
/// let token = create_token(&Claims::new("chef"), secret)?;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
///
/// let auth = authenticate(&headers, secret)?;
/// assert_eq!(auth.subject, "chef");
/// # Ok(())
/// # }
/// ```

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::jwt::{validate_token, JwtError};

/// Accepted authorization schemes
const SCHEMES: [&str; 2] = ["Bearer ", "Token "];

/// Authentication context added to request extensions
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use littlelemon_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, {}", auth.subject)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated staff username (token subject)
    pub subject: String,
}

/// Error type for credential checks
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Header present but not in a supported scheme
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
            JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
            other => AuthError::InvalidToken(other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, self.to_string()).into_response()
    }
}

/// Extracts the raw token from an `Authorization` header value
pub fn extract_token(header_value: &str) -> Result<&str, AuthError> {
    let token = SCHEMES
        .iter()
        .find_map(|scheme| header_value.strip_prefix(scheme))
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidFormat("Empty token".to_string()));
    }

    Ok(token)
}

/// Validates the credentials in a request's headers
///
/// # Errors
///
/// - [`AuthError::MissingCredentials`] if there is no `Authorization` header
/// - [`AuthError::InvalidFormat`] if the scheme is not `Bearer` or `Token`
/// - [`AuthError::InvalidToken`] if the token is expired, forged or malformed
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = extract_token(header_value)?;
    let claims = validate_token(token, secret)?;

    Ok(AuthContext {
        subject: claims.sub,
    })
}
