use std::sync::Arc;

use crate::application::token::AuthenticatedAccount;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{account_role::AccountRole, identity_key::IdentityKey};
use crate::error::{AuthError, AuthResult};

/// Public view of a credential (no hash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountView {
    pub identity_key: String,
    pub login_name: String,
    pub role: AccountRole,
    pub active: bool,
}

pub struct GetAccountUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
}

impl<R> GetAccountUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        actor: &AuthenticatedAccount,
        identity_key: String,
    ) -> AuthResult<AccountView> {
        let key = IdentityKey::new(identity_key)?;
        if !actor.is_self_or_administrator(&key) {
            return Err(AuthError::forbidden("cannot read another account"));
        }

        let credential = self
            .repo
            .find_by_identity_key(&key)
            .await?
            .ok_or_else(|| AuthError::not_found("account not found"))?;

        Ok(AccountView {
            identity_key: credential.identity_key.to_string(),
            login_name: credential.login_name.to_string(),
            role: credential.role,
            active: credential.active,
        })
    }
}
