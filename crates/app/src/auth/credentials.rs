//! Admin credentials and the login check.

use std::fmt;

use tracing::warn;
use zeroize::Zeroizing;

use crate::auth::AuthError;

/// Username accepted when none is configured.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Password accepted when none is configured.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// The single admin login guarding the dashboard.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl AdminCredentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Checks a login attempt.
    ///
    /// Both fields are always compared in full so a wrong username takes as
    /// long as a wrong password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when either field differs.
    pub fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let username_matches = constant_shape_eq(self.username.as_bytes(), username.as_bytes());
        let password_matches = constant_shape_eq(self.password.as_bytes(), password.as_bytes());

        if username_matches & password_matches {
            Ok(())
        } else {
            warn!(username, "rejected admin login");

            Err(AuthError::InvalidCredentials)
        }
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Compares every byte of the longer input, folding differences together.
fn constant_shape_eq(expected: &[u8], given: &[u8]) -> bool {
    let len = expected.len().max(given.len());
    let mut diff = u8::from(expected.len() != given.len());

    for i in 0..len {
        let a = expected.get(i).copied().unwrap_or(0);
        let b = given.get(i).copied().unwrap_or(0);

        diff |= a ^ b;
    }

    diff == 0
}
