//! Application Configuration
//!
//! Explicit configuration for the identity use cases. Built once at startup
//! and shared behind an `Arc`; there is no process-global secret.

use std::fmt;
use std::time::Duration;

/// Session token lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for session tokens (at least 32 bytes)
    pub token_secret: Vec<u8>,
    /// Session token lifetime (24 hours)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    pub fn new(token_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            token_secret: token_secret.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
            password_pepper: None,
        }
    }

    /// Create config with a random token secret (tests, local runs)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self::new(secret.to_vec())
    }

    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        self.password_pepper = Some(pepper.into());
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_eq!(a.token_secret.len(), 32);
        assert_ne!(a.token_secret, b.token_secret);
        assert_eq!(a.token_ttl, DEFAULT_TOKEN_TTL);
    }

    #[test]
    fn test_pepper_is_optional() {
        assert!(AuthConfig::new(vec![1u8; 32]).pepper().is_none());
        let peppered = AuthConfig::new(vec![1u8; 32]).with_pepper(b"pimienta".to_vec());
        assert_eq!(peppered.pepper(), Some(b"pimienta".as_slice()));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig::new(b"a-very-secret-signing-key-0123456789".to_vec())
            .with_pepper(b"pepper".to_vec());
        let debug = format!("{config:?}");
        assert!(!debug.contains("a-very-secret"));
        assert!(!debug.contains("pepper\""));
        assert!(debug.contains("[REDACTED]"));
    }
}
