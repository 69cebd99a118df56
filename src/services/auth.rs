//! Authentication service implementation
//!
//! This service verifies admin credentials against the accounts configured
//! in TOML (Argon2 PHC hashes), issues sessions at sign-in, resolves the
//! current session from its token and revokes it at sign-out.

use std::sync::Arc;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Duration;
use tracing::{debug, info};

use crate::config::{AdminAccount, Settings};
use crate::state::context::Session;
use crate::state::storage::SessionStore;
use crate::utils::errors::{Result, TechClubError};
use crate::utils::logging::log_sign_in;

/// Hash a password for the `auth.admins` list (Argon2id)
pub fn hash_password(password: &str) -> Result<String> {
    if password.is_empty() {
        return Err(TechClubError::Validation("Password must not be empty".to_string()));
    }
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| TechClubError::Auth(format!("Password hashing failed: {}", e)))?
        .to_string();
    Ok(hash)
}

/// Check a password against a stored PHC string
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Authentication service for admin sessions
#[derive(Clone)]
pub struct AuthService {
    admins: Arc<Vec<AdminAccount>>,
    sessions: Arc<dyn SessionStore>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(admins: Vec<AdminAccount>, sessions: Arc<dyn SessionStore>, session_ttl: Duration) -> Self {
        Self {
            admins: Arc::new(admins),
            sessions,
            session_ttl,
        }
    }

    pub fn from_settings(settings: &Settings, sessions: Arc<dyn SessionStore>) -> Self {
        Self::new(
            settings.auth.admins.clone(),
            sessions,
            settings.redis.session_ttl(),
        )
    }

    /// Check credentials and open a new session
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim();
        let account = self
            .admins
            .iter()
            .find(|admin| admin.email.eq_ignore_ascii_case(email));

        let verified = account.is_some_and(|admin| verify_password(password, &admin.password_hash));
        log_sign_in(email, verified);
        if !verified {
            return Err(TechClubError::Auth("Invalid email or password".to_string()));
        }

        let session = Session::new(email, self.session_ttl);
        self.sessions.save(&session).await?;
        info!(email = %email, expires_at = %session.expires_at, "Admin session opened");
        Ok(session)
    }

    /// Current session for a token, `None` when unknown or expired
    pub async fn get_session(&self, token: &str) -> Result<Option<Session>> {
        if token.is_empty() {
            return Ok(None);
        }
        let session = self.sessions.load(token).await?;
        debug!(found = session.is_some(), "Session lookup");
        Ok(session.filter(|s| !s.is_expired()))
    }

    /// Persist draft and notification changes made during a request.
    /// A session closed in the meantime stays closed.
    pub async fn save_session(&self, session: &Session) -> Result<()> {
        if !self.sessions.update(session).await? {
            debug!(email = %session.email, "Session closed during request, changes dropped");
        }
        Ok(())
    }

    pub async fn sign_out(&self, token: &str) -> Result<()> {
        self.sessions.delete(token).await?;
        info!("Admin session closed");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        self.sessions.ping().await
    }
}
