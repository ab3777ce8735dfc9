//! Register Administrator Use Case
//!
//! Administrators are the only credentials without a paired domain entity.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::hashing::hash_password;
use crate::domain::entity::Credential;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{
    account_role::AccountRole, identity_key::IdentityKey, login_name::LoginName,
    user_password::RawPassword,
};
use crate::error::AuthResult;

pub struct RegisterAdministratorInput {
    pub identity_key: String,
    pub login_name: String,
    pub password: String,
}

#[derive(Debug)]
pub struct RegisterAdministratorOutput {
    pub identity_key: String,
    pub login_name: String,
}

pub struct RegisterAdministratorUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterAdministratorUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        input: RegisterAdministratorInput,
    ) -> AuthResult<RegisterAdministratorOutput> {
        let identity_key = IdentityKey::named("rif_cedula", input.identity_key)?;
        let login_name = LoginName::new(input.login_name)?;
        let raw_password = RawPassword::new(input.password)?;

        let password_hash = hash_password(raw_password, self.config.clone()).await?;
        let credential = Credential::new(
            identity_key,
            login_name,
            password_hash,
            AccountRole::Administrator,
        );

        self.repo.create(&credential).await?;

        tracing::info!(
            identity_key = %credential.identity_key,
            login_name = %credential.login_name,
            "Administrator registered"
        );

        Ok(RegisterAdministratorOutput {
            identity_key: credential.identity_key.to_string(),
            login_name: credential.login_name.to_string(),
        })
    }

    /// Startup bootstrap: create the administrator unless the login name exists.
    ///
    /// Returns `true` when a credential was created.
    pub async fn ensure(&self, input: RegisterAdministratorInput) -> AuthResult<bool> {
        let login_name = LoginName::new(input.login_name.clone())?;
        if self.repo.find_by_login_name(&login_name).await?.is_some() {
            tracing::debug!(login_name = %login_name, "Bootstrap administrator already present");
            return Ok(false);
        }

        self.execute(input).await.map(|_| true)
    }
}
