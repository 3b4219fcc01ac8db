//! Admin session gate
//!
//! A deliberately minimal single-tenant capability: one shared admin secret,
//! one static session marker, no per-admin identity, no logout and no
//! revocation. Anyone holding the marker cookie is the admin.

use std::fmt;
use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use tracing::{debug, error, info};

use crate::error::{WorkshopError, WorkshopResult};

/// Session cookie name
pub const SESSION_COOKIE: &str = "admin_session";
/// The only value the session cookie ever carries
pub const SESSION_MARKER: &str = "authenticated";
/// Session lifetime in seconds (24 hours)
pub const SESSION_MAX_AGE: u64 = 24 * 60 * 60;

/// The configured admin secret.
///
/// A hash takes precedence over a plain password; the plain fallback is meant
/// for local development only.
#[derive(Clone, Default)]
pub enum AdminSecret {
    /// Argon2 PHC string
    Hashed(String),
    Plain(String),
    /// No secret configured: every login fails
    #[default]
    Unset,
}

impl AdminSecret {
    /// Pick the strategy from the optional hash and plain values. Blank values
    /// count as unset.
    pub fn from_values(hash: Option<String>, plain: Option<String>) -> Self {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        match (non_blank(hash), non_blank(plain)) {
            (Some(hash), _) => AdminSecret::Hashed(hash),
            (None, Some(plain)) => AdminSecret::Plain(plain),
            (None, None) => AdminSecret::Unset,
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, AdminSecret::Unset)
    }

    fn matches(&self, password: &str) -> bool {
        match self {
            AdminSecret::Hashed(hash) => match PasswordHash::new(hash) {
                Ok(parsed) => Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok(),
                Err(e) => {
                    error!("Configured admin password hash is malformed: {}", e);
                    false
                }
            },
            AdminSecret::Plain(expected) => expected == password,
            AdminSecret::Unset => false,
        }
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategy = match self {
            AdminSecret::Hashed(_) => "Hashed(..)",
            AdminSecret::Plain(_) => "Plain(..)",
            AdminSecret::Unset => "Unset",
        };
        f.write_str(strategy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

#[derive(Debug, Clone)]
pub struct AdminGate {
    secret: AdminSecret,
    secure_cookie: bool,
}

impl AdminGate {
    /// `secure_cookie` marks the session cookie `Secure` (HTTPS deployments).
    pub fn new(secret: AdminSecret, secure_cookie: bool) -> Self {
        if !secret.is_configured() {
            tracing::warn!("No admin password configured, admin login is disabled");
        }
        Self {
            secret,
            secure_cookie,
        }
    }

    /// Check the submitted password. Comparison is exact and case-sensitive.
    pub fn login(&self, password: &str) -> WorkshopResult<()> {
        if self.secret.matches(password) {
            info!("Admin login succeeded");
            Ok(())
        } else {
            info!("Admin login rejected");
            Err(WorkshopError::Unauthorized("Invalid password".to_string()))
        }
    }

    /// `Set-Cookie` value carrying the session marker.
    pub fn session_cookie(&self) -> String {
        let secure_flag = if self.secure_cookie { " Secure;" } else { "" };
        format!(
            "{}={}; HttpOnly;{} Path=/; Max-Age={}",
            SESSION_COOKIE, SESSION_MARKER, secure_flag, SESSION_MAX_AGE
        )
    }

    /// Session state carried by the request's cookies.
    pub fn authorize(&self, headers: &HeaderMap) -> SessionState {
        let has_marker = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .any(|(name, value)| name == SESSION_COOKIE && value == SESSION_MARKER);

        if has_marker {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }
}

/// Reject the request with 401 unless it carries the admin session marker.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/stats", get(stats))
///     .layer(axum::middleware::from_fn_with_state(gate.clone(), require_admin));
/// ```
pub async fn require_admin(
    State(gate): State<Arc<AdminGate>>,
    request: Request,
    next: Next,
) -> Result<Response, WorkshopError> {
    match gate.authorize(request.headers()) {
        SessionState::Authenticated => Ok(next.run(request).await),
        SessionState::Anonymous => {
            debug!(path = %request.uri().path(), "Admin session missing");
            Err(WorkshopError::Unauthorized("Unauthorized".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::PasswordHasher;
    use argon2::password_hash::SaltString;
    use axum::http::HeaderValue;

    fn hash(password: &str) -> String {
        let salt = SaltString::from_b64("d29ya3Nob3BzYWx0").unwrap();
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    fn cookie_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_hash_takes_precedence_over_plain() {
        let secret = AdminSecret::from_values(Some("$argon2id$x".into()), Some("pw".into()));
        assert!(matches!(secret, AdminSecret::Hashed(_)));

        let secret = AdminSecret::from_values(Some("  ".into()), Some("pw".into()));
        assert!(matches!(secret, AdminSecret::Plain(_)));

        assert!(!AdminSecret::from_values(None, None).is_configured());
    }

    #[test]
    fn test_hashed_login() {
        let gate = AdminGate::new(AdminSecret::Hashed(hash("s3cret")), false);
        assert!(gate.login("s3cret").is_ok());
        assert!(gate.login("S3cret").is_err());
        assert!(gate.login("").is_err());
    }

    #[test]
    fn test_plain_login_is_exact_and_case_sensitive() {
        let gate = AdminGate::new(AdminSecret::Plain("Admin".to_string()), false);
        assert!(gate.login("Admin").is_ok());
        assert!(gate.login("admin").is_err());
        assert!(gate.login("Admin ").is_err());
    }

    #[test]
    fn test_unset_secret_rejects_every_login() {
        let gate = AdminGate::new(AdminSecret::Unset, false);
        let err = gate.login("").unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized: Invalid password");
    }

    #[test]
    fn test_malformed_hash_rejects_login() {
        let gate = AdminGate::new(AdminSecret::Hashed("not-a-phc-string".to_string()), false);
        assert!(gate.login("not-a-phc-string").is_err());
    }

    #[test]
    fn test_session_cookie_secure_flag() {
        let dev = AdminGate::new(AdminSecret::Unset, false).session_cookie();
        assert_eq!(dev, "admin_session=authenticated; HttpOnly; Path=/; Max-Age=86400");

        let prod = AdminGate::new(AdminSecret::Unset, true).session_cookie();
        assert!(prod.contains("; Secure;"));
    }

    #[test]
    fn test_authorize_requires_exact_marker() {
        let gate = AdminGate::new(AdminSecret::Unset, false);

        assert_eq!(gate.authorize(&HeaderMap::new()), SessionState::Anonymous);
        assert_eq!(
            gate.authorize(&cookie_headers("admin_session=Authenticated")),
            SessionState::Anonymous
        );
        assert_eq!(
            gate.authorize(&cookie_headers("theme=dark; admin_session=authenticated")),
            SessionState::Authenticated
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let secret = AdminSecret::Plain("hunter2".to_string());
        assert!(!format!("{:?}", secret).contains("hunter2"));
    }
}
