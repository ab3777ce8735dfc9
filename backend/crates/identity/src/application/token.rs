//! Session Token Issuer / Verifier
//!
//! Stateless: a token is valid from issuance until `exp`, and nothing is
//! stored server-side. Deactivating a credential does not invalidate tokens
//! already issued for it.

use chrono::{DateTime, Utc};
use platform::token::{TokenError, TokenSigner};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::{account_role::AccountRole, identity_key::IdentityKey};
use crate::error::{AuthError, AuthResult};

/// Claim set embedded in every session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub usuario_id: String,
    pub tipo_usuario: AccountRole,
    pub iat: i64,
    pub exp: i64,
}

/// The caller a verified token speaks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub identity_key: IdentityKey,
    pub role: AccountRole,
}

impl AuthenticatedAccount {
    /// Administrator, or the account that owns `key`
    pub fn is_self_or_administrator(&self, key: &IdentityKey) -> bool {
        self.role.is_administrator() || &self.identity_key == key
    }
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TokenIssuer {
    signer: TokenSigner,
    ttl: chrono::Duration,
}

impl TokenIssuer {
    /// Fails when the configured secret is too weak to sign with
    pub fn new(config: &AuthConfig) -> Result<Self, TokenError> {
        let ttl = chrono::Duration::from_std(config.token_ttl)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(Self {
            signer: TokenSigner::hs256(&config.token_secret)?,
            ttl,
        })
    }

    pub fn issue(&self, key: &IdentityKey, role: AccountRole) -> AuthResult<IssuedToken> {
        self.issue_at(key, role, Utc::now())
    }

    /// Issue as if the current time were `issued_at`
    pub fn issue_at(
        &self,
        key: &IdentityKey,
        role: AccountRole,
        issued_at: DateTime<Utc>,
    ) -> AuthResult<IssuedToken> {
        let expires_at = issued_at + self.ttl;
        let claims = SessionClaims {
            usuario_id: key.as_str().to_string(),
            tipo_usuario: role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = self.signer.sign(&claims)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Signature and expiry only; never consults the store
    pub fn verify(&self, token: &str) -> AuthResult<AuthenticatedAccount> {
        let claims: SessionClaims = self.signer.verify(token)?;
        let identity_key =
            IdentityKey::new(claims.usuario_id).map_err(|_| AuthError::TokenInvalid)?;

        Ok(AuthenticatedAccount {
            identity_key,
            role: claims.tipo_usuario,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&AuthConfig::with_random_secret()).unwrap()
    }

    fn key(raw: &str) -> IdentityKey {
        IdentityKey::new(raw).unwrap()
    }

    #[test]
    fn test_issue_then_verify() {
        let issuer = issuer();
        let issued = issuer.issue(&key("J-001"), AccountRole::Company).unwrap();

        let account = issuer.verify(&issued.token).unwrap();
        assert_eq!(account.identity_key, key("J-001"));
        assert_eq!(account.role, AccountRole::Company);
    }

    #[test]
    fn test_expiry_is_24_hours_after_issue() {
        let issuer = issuer();
        let now = Utc::now();
        let issued = issuer.issue_at(&key("J-001"), AccountRole::Company, now).unwrap();
        assert_eq!(issued.expires_at - now, chrono::Duration::hours(24));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let issuer = issuer();
        let issued_at = Utc::now() - chrono::Duration::hours(24) - chrono::Duration::seconds(1);
        let issued = issuer
            .issue_at(&key("J-001"), AccountRole::Company, issued_at)
            .unwrap();

        assert!(matches!(issuer.verify(&issued.token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let issued = issuer().issue(&key("J-001"), AccountRole::Administrator).unwrap();
        assert!(matches!(issuer().verify(&issued.token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_weak_secret_refused() {
        let config = AuthConfig::new(b"too-short".to_vec());
        assert!(TokenIssuer::new(&config).is_err());
    }

    #[test]
    fn test_self_or_administrator() {
        let company = AuthenticatedAccount {
            identity_key: key("J-001"),
            role: AccountRole::Company,
        };
        assert!(company.is_self_or_administrator(&key("J-001")));
        assert!(!company.is_self_or_administrator(&key("J-002")));

        let admin = AuthenticatedAccount {
            identity_key: key("ADMIN-1"),
            role: AccountRole::Administrator,
        };
        assert!(admin.is_self_or_administrator(&key("J-002")));
    }
}
