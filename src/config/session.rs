use std::env;

use sha2::{Digest, Sha512};
use time::Duration;
use tower_sessions::{
    cookie::{Key, SameSite},
    service::SignedCookie,
    Expiry, MemoryStore, SessionManagerLayer,
};
use tracing::warn;

/// Signed session layer carrying the flash status between requests.
pub type SessionLayer = SessionManagerLayer<MemoryStore, SignedCookie>;

/// A flash only has to survive the redirect that follows a form post.
const FLASH_SESSION_IDLE: Duration = Duration::minutes(30);

/// Cookie settings for the session that holds the pending flash.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: &'static str,
    pub secure: bool,
    pub same_site: SameSite,
    pub idle_timeout: Duration,
    /// Passphrase the cookie signing key is derived from. `None` means a
    /// fresh random key per process, so flashes do not survive a restart.
    pub secret: Option<String>,
}

impl SessionConfig {
    /// Plain-HTTP cookie for local runs.
    pub fn development() -> Self {
        Self {
            cookie_name: "crud_session",
            secure: false,
            same_site: SameSite::Lax,
            idle_timeout: FLASH_SESSION_IDLE,
            secret: None,
        }
    }

    /// HTTPS-only, host-locked cookie.
    pub fn production() -> Self {
        Self {
            cookie_name: "__Host-crud_session",
            secure: true,
            same_site: SameSite::Strict,
            ..Self::development()
        }
    }

    /// Picks the profile from `ENVIRONMENT` and the key from `SESSION_SECRET`.
    pub fn from_env() -> Self {
        let base = if is_production() {
            Self::production()
        } else {
            Self::development()
        };

        Self {
            secret: env::var("SESSION_SECRET").ok().filter(|s| !s.is_empty()),
            ..base
        }
    }

    pub fn signing_key(&self) -> Key {
        match &self.secret {
            // SHA-512 yields exactly the 64 bytes a cookie Key needs
            Some(secret) => Key::from(Sha512::digest(secret.as_bytes()).as_slice()),
            None => {
                warn!("SESSION_SECRET not set; flash cookies are signed with a per-process key");
                Key::generate()
            }
        }
    }

    pub fn create_layer(&self, store: MemoryStore) -> SessionLayer {
        SessionManagerLayer::new(store)
            .with_name(self.cookie_name)
            .with_secure(self.secure)
            .with_http_only(true)
            .with_same_site(self.same_site)
            .with_expiry(Expiry::OnInactivity(self.idle_timeout))
            .with_signed(self.signing_key())
    }
}

pub fn is_production() -> bool {
    env::var("ENVIRONMENT")
        .map(|value| value == "production")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_secret_gives_same_key() {
        let config = SessionConfig {
            secret: Some("flash-signing".to_string()),
            ..SessionConfig::development()
        };
        assert_eq!(config.signing_key().master(), config.signing_key().master());
    }

    #[test]
    fn different_secrets_give_different_keys() {
        let a = SessionConfig {
            secret: Some("one".to_string()),
            ..SessionConfig::development()
        };
        let b = SessionConfig {
            secret: Some("two".to_string()),
            ..SessionConfig::development()
        };
        assert_ne!(a.signing_key().master(), b.signing_key().master());
    }

    #[test]
    fn production_profile_hardens_the_cookie() {
        let config = SessionConfig::production();
        assert!(config.secure);
        assert_eq!(config.same_site, SameSite::Strict);
        assert!(config.cookie_name.starts_with("__Host-"));
        assert_eq!(config.idle_timeout, SessionConfig::development().idle_timeout);
    }
}
