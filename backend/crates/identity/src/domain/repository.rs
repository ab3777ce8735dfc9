//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure
//! layer. Uniqueness of identity keys and login names is the store's job: a
//! duplicate insert must fail with `AuthError::Conflict` even when no
//! application-level pre-check ran.

use crate::domain::entity::{Credential, CredentialChanges, EntityKind, PairedEntity};
use crate::domain::value_object::{identity_key::IdentityKey, login_name::LoginName};
use crate::error::AuthResult;

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Insert a credential with no paired entity (administrators)
    async fn create(&self, credential: &Credential) -> AuthResult<()>;

    async fn find_by_login_name(&self, login_name: &LoginName) -> AuthResult<Option<Credential>>;

    async fn find_by_identity_key(&self, key: &IdentityKey) -> AuthResult<Option<Credential>>;

    /// Returns `false` when no credential has this key
    async fn set_active(&self, key: &IdentityKey, active: bool) -> AuthResult<bool>;

    /// Apply a non-empty change set. Returns `false` when no credential has this key
    async fn update(&self, key: &IdentityKey, changes: &CredentialChanges) -> AuthResult<bool>;
}

/// Paired registration: one domain entity plus its credential, atomically
#[trait_variant::make(PairedAccountRepository: Send)]
pub trait LocalPairedAccountRepository {
    /// Insert `entity` and `credential` as one unit.
    ///
    /// Either both rows exist afterwards or neither does. Fails with
    /// `Conflict` when the identity key or login name is taken (including a
    /// concurrent insert that wins the race), and with `Validation` when an
    /// employee's company does not exist.
    async fn register(&self, entity: &PairedEntity, credential: &Credential) -> AuthResult<()>;
}

/// Domain entity flags
#[trait_variant::make(EntityStatusRepository: Send)]
pub trait LocalEntityStatusRepository {
    /// Returns `false` when the entity does not exist
    async fn set_entity_active(
        &self,
        kind: EntityKind,
        key: &IdentityKey,
        active: bool,
    ) -> AuthResult<bool>;
}
