//! Status toggles
//!
//! `activar` / `desactivar` for credentials and for the domain entities.
//! The flags are independent: deactivating a company leaves its credential
//! untouched and vice versa.

use std::sync::Arc;

use crate::domain::entity::EntityKind;
use crate::domain::repository::{CredentialRepository, EntityStatusRepository};
use crate::domain::value_object::{identity_key::IdentityKey, status_action::StatusAction};
use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
pub struct StatusOutput {
    pub active: bool,
    pub action: StatusAction,
}

pub struct SetAccountStatusUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
}

impl<R> SetAccountStatusUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, identity_key: String, action: &str) -> AuthResult<StatusOutput> {
        let action = StatusAction::parse(action)?;
        let key = IdentityKey::new(identity_key)?;

        if !self.repo.set_active(&key, action.active()).await? {
            return Err(AuthError::not_found("account not found"));
        }

        tracing::info!(identity_key = %key, active = action.active(), "Account status changed");

        Ok(StatusOutput {
            active: action.active(),
            action,
        })
    }
}

pub struct SetEntityStatusUseCase<R>
where
    R: EntityStatusRepository,
{
    repo: Arc<R>,
}

impl<R> SetEntityStatusUseCase<R>
where
    R: EntityStatusRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        kind: EntityKind,
        identity_key: String,
        action: &str,
    ) -> AuthResult<StatusOutput> {
        let action = StatusAction::parse(action)?;
        let key = IdentityKey::new(identity_key)?;

        if !self.repo.set_entity_active(kind, &key, action.active()).await? {
            return Err(AuthError::not_found(format!("{} not found", kind.label())));
        }

        tracing::info!(
            entity = kind.label(),
            identity_key = %key,
            active = action.active(),
            "Entity status changed"
        );

        Ok(StatusOutput {
            active: action.active(),
            action,
        })
    }
}
