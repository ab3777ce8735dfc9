//! Update Account Use Case
//!
//! Applies an [`AccountPatch`] to a credential. Self or administrator.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::hashing::hash_password;
use crate::application::token::AuthenticatedAccount;
use crate::domain::entity::CredentialChanges;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{account_patch::AccountPatch, identity_key::IdentityKey};
use crate::error::{AuthError, AuthResult};

pub struct UpdateAccountInput {
    pub identity_key: String,
    pub login_name: Option<String>,
    pub password: Option<String>,
}

pub struct UpdateAccountUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> UpdateAccountUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        actor: &AuthenticatedAccount,
        input: UpdateAccountInput,
    ) -> AuthResult<()> {
        let key = IdentityKey::new(input.identity_key)?;
        if !actor.is_self_or_administrator(&key) {
            return Err(AuthError::forbidden("cannot update another account"));
        }

        let patch = AccountPatch::new(input.login_name, input.password)?;

        let password_hash = match patch.password {
            Some(raw) => Some(hash_password(raw, self.config.clone()).await?),
            None => None,
        };
        let changes = CredentialChanges {
            login_name: patch.login_name,
            password_hash,
        };

        if !self.repo.update(&key, &changes).await? {
            return Err(AuthError::not_found("account not found"));
        }

        tracing::info!(
            identity_key = %key,
            login_name_changed = changes.login_name.is_some(),
            password_changed = changes.password_hash.is_some(),
            "Account updated"
        );

        Ok(())
    }
}
