//! Test helpers for inbound HTTP components.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use chrono::Utc;

use crate::domain::{StoredPasswordHash, User, UserId, Username};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build a stored user with a fixed fixture password.
pub fn fixture_user(username: &str) -> User {
    User::new(
        UserId::random(),
        Username::new(username).expect("valid fixture username"),
        StoredPasswordHash::derive("fixture-password").expect("fixture hash derives"),
        Utc::now(),
    )
}
