//! Change Password Use Case
//!
//! - Administrator: may reset any account without the current password.
//! - Anyone else: only their own account, and the current password must verify.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::hashing::{hash_password, verify_password};
use crate::application::token::AuthenticatedAccount;
use crate::domain::entity::CredentialChanges;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{identity_key::IdentityKey, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct ChangePasswordInput {
    pub identity_key: String,
    pub new_password: String,
    pub current_password: Option<String>,
}

pub struct ChangePasswordUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ChangePasswordUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        actor: &AuthenticatedAccount,
        input: ChangePasswordInput,
    ) -> AuthResult<()> {
        let key = IdentityKey::new(input.identity_key)?;
        if !actor.is_self_or_administrator(&key) {
            return Err(AuthError::forbidden("cannot change another account's password"));
        }

        let new_password = RawPassword::named("nuevaContrasena", input.new_password)?;

        let credential = self
            .repo
            .find_by_identity_key(&key)
            .await?
            .ok_or_else(|| AuthError::not_found("account not found"))?;

        if !actor.role.is_administrator() {
            // Omitted counts as not verifying
            let current = input
                .current_password
                .filter(|value| !value.trim().is_empty())
                .ok_or(AuthError::CurrentPasswordMismatch)?;

            let current = RawPassword::named("contrasenaActual", current)
                .map_err(|_| AuthError::CurrentPasswordMismatch)?;

            let matches = verify_password(
                credential.password_hash.clone(),
                current,
                self.config.clone(),
            )
            .await?;
            if !matches {
                return Err(AuthError::CurrentPasswordMismatch);
            }
        }

        let changes = CredentialChanges {
            login_name: None,
            password_hash: Some(hash_password(new_password, self.config.clone()).await?),
        };

        if !self.repo.update(&key, &changes).await? {
            return Err(AuthError::not_found("account not found"));
        }

        tracing::info!(
            identity_key = %key,
            changed_by = %actor.identity_key,
            "Password changed"
        );

        Ok(())
    }
}
