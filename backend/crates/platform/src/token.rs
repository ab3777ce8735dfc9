//! Signed Claim Tokens
//!
//! HS256 JWT signing and verification over any serde claim set.
//! Verification is purely cryptographic and clock-based: signature, then
//! `exp` with zero leeway. Nothing here touches storage.

use std::fmt;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Minimum accepted HMAC secret length in bytes
pub const MIN_SECRET_LENGTH: usize = 32;

/// Token signing / verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Signing secret must be at least {min} bytes (got {actual})")]
    WeakSecret { min: usize, actual: usize },

    #[error("Token has expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl TokenError {
    /// Whether the token itself was rejected (as opposed to a signer fault)
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::Expired | TokenError::InvalidSignature | TokenError::Malformed
        )
    }
}

/// HS256 signer/verifier bound to one secret
///
/// ## Examples
/// ```rust
/// use platform::token::TokenSigner;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Claims { sub: String, exp: i64 }
///
/// let signer = TokenSigner::hs256(&[7u8; 32]).unwrap();
/// let exp = chrono::Utc::now().timestamp() + 60;
/// let token = signer.sign(&Claims { sub: "J-001".into(), exp }).unwrap();
/// let claims: Claims = signer.verify(&token).unwrap();
/// assert_eq!(claims.sub, "J-001");
/// ```
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    /// Build a signer from a shared secret
    pub fn hs256(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::WeakSecret {
                min: MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Sign a claim set
    pub fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify signature and expiry, then decode the claim set
    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        decode::<C>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &"HS256")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestClaims {
        sub: String,
        exp: i64,
    }

    fn signer() -> TokenSigner {
        TokenSigner::hs256(b"0123456789abcdef0123456789abcdef").unwrap()
    }

    fn claims_expiring_in(secs: i64) -> TestClaims {
        TestClaims {
            sub: "J-001".to_string(),
            exp: chrono::Utc::now().timestamp() + secs,
        }
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = signer();
        let claims = claims_expiring_in(3600);
        let token = signer.sign(&claims).unwrap();

        let decoded: TestClaims = signer.verify(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = signer();
        let token = signer.sign(&claims_expiring_in(-1)).unwrap();

        let result = signer.verify::<TestClaims>(&token);
        assert_eq!(result.unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_other_secret_rejected() {
        let token = signer().sign(&claims_expiring_in(3600)).unwrap();
        let other = TokenSigner::hs256(&[9u8; 32]).unwrap();

        let result = other.verify::<TestClaims>(&token);
        assert_eq!(result.unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = signer();
        let token = signer.sign(&claims_expiring_in(3600)).unwrap();
        let forged_payload = signer
            .sign(&TestClaims {
                sub: "V-999".to_string(),
                exp: chrono::Utc::now().timestamp() + 3600,
            })
            .unwrap();

        // header.payload-from-another-token.signature
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged_payload.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(
            signer.verify::<TestClaims>(&spliced).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_garbage_rejected() {
        let result = signer().verify::<TestClaims>("not.a.jwt");
        assert!(result.unwrap_err().is_rejection());
    }

    #[test]
    fn test_missing_exp_rejected() {
        #[derive(Serialize)]
        struct NoExp {
            sub: String,
        }

        let signer = signer();
        let token = signer
            .sign(&NoExp {
                sub: "J-001".to_string(),
            })
            .unwrap();

        assert_eq!(
            signer.verify::<TestClaims>(&token).unwrap_err(),
            TokenError::Malformed
        );
    }

    #[test]
    fn test_weak_secret_refused() {
        let result = TokenSigner::hs256(b"short");
        assert_eq!(
            result.unwrap_err(),
            TokenError::WeakSecret { min: 32, actual: 5 }
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", signer());
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("0123456789"));
    }
}
