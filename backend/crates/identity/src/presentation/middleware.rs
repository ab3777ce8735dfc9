//! Authorization Gate
//!
//! [`require_bearer`] authenticates: it verifies the `Authorization: Bearer`
//! token and stores the [`AuthenticatedAccount`] in the request extensions.
//! Handlers then authorize by extracting [`CurrentAccount`] (any role) or
//! [`AdministratorOnly`].

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::token::{AuthenticatedAccount, TokenIssuer};
use crate::error::AuthError;

/// `Authorization: Bearer <token>` の token 部分
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Middleware that requires a valid, unexpired session token
///
/// The store is not consulted: a token stays valid for its whole lifetime
/// even if the account is deactivated after issuance.
pub async fn require_bearer(
    State(tokens): State<Arc<TokenIssuer>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer(req.headers()).ok_or(AuthError::TokenInvalid)?;
    let account = tokens.verify(token)?;

    tracing::debug!(
        identity_key = %account.identity_key,
        role = %account.role,
        "Bearer token accepted"
    );

    req.extensions_mut().insert(account);
    Ok(next.run(req).await)
}

/// Any authenticated caller
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub AuthenticatedAccount);

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAccount>()
            .cloned()
            .map(CurrentAccount)
            .ok_or(AuthError::TokenInvalid)
    }
}

/// Authenticated caller whose role is Administrator (403 otherwise)
#[derive(Debug, Clone)]
pub struct AdministratorOnly(pub AuthenticatedAccount);

impl<S> FromRequestParts<S> for AdministratorOnly
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentAccount(account) = CurrentAccount::from_request_parts(parts, state).await?;
        if !account.role.is_administrator() {
            return Err(AuthError::forbidden("administrator role required"));
        }
        Ok(AdministratorOnly(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(extract_bearer(&headers("Bearer  abc ")), Some("abc"));
    }

    #[test]
    fn test_extract_bearer_rejects_other_schemes() {
        assert_eq!(extract_bearer(&headers("Basic dXNlcjpwdw==")), None);
        assert_eq!(extract_bearer(&headers("abc.def.ghi")), None);
        assert_eq!(extract_bearer(&headers("Bearer ")), None);
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
    }
}
