//! Sign In Use Case
//!
//! validate → look up by login name → active check → password verify → issue.
//! An unknown login name and a wrong password fail identically, and both
//! run one Argon2 verification.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::application::hashing::{verify_against_dummy, verify_password};
use crate::application::token::TokenIssuer;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{
    account_role::AccountRole, login_name::LoginName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub login_name: String,
    pub password: String,
}

#[derive(Debug)]
pub struct SignInOutput {
    pub token: String,
    pub role: AccountRole,
    pub identity_key: String,
    pub expires_at: DateTime<Utc>,
}

pub struct SignInUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenIssuer>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.login_name.trim().is_empty() {
            return Err(AuthError::validation("usuario is required"));
        }
        if input.password.trim().is_empty() {
            return Err(AuthError::validation("contrasena is required"));
        }

        // A name that could never have been registered cannot match anything
        let login_name =
            LoginName::new(input.login_name).map_err(|_| AuthError::InvalidCredentials)?;

        let Some(credential) = self.repo.find_by_login_name(&login_name).await? else {
            // Pay the same Argon2 cost as a wrong password
            if let Ok(raw_password) = RawPassword::new(input.password) {
                verify_against_dummy(raw_password, self.config.clone()).await?;
            }
            return Err(AuthError::InvalidCredentials);
        };

        if !credential.active {
            return Err(AuthError::AccountInactive);
        }

        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let matches = verify_password(
            credential.password_hash.clone(),
            raw_password,
            self.config.clone(),
        )
        .await?;

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.tokens.issue(&credential.identity_key, credential.role)?;

        tracing::info!(
            identity_key = %credential.identity_key,
            role = %credential.role,
            "Account signed in"
        );

        Ok(SignInOutput {
            token: issued.token,
            role: credential.role,
            identity_key: credential.identity_key.to_string(),
            expires_at: issued.expires_at,
        })
    }
}
