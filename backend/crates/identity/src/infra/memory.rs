//! In-memory repository
//!
//! Same contract as [`PgAuthRepository`](super::PgAuthRepository) with every
//! mutation applied under one write lock, so a paired registration is visible
//! in full or not at all. Intended for tests and local runs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entity::{
    Company, Credential, CredentialChanges, Employee, EntityKind, PairedEntity,
};
use crate::domain::repository::{
    CredentialRepository, EntityStatusRepository, PairedAccountRepository,
};
use crate::domain::value_object::{identity_key::IdentityKey, login_name::LoginName};
use crate::error::{AuthError, AuthResult};
use crate::infra::postgres::{COMPANY_NOT_REGISTERED, IDENTITY_TAKEN, LOGIN_NAME_TAKEN};

#[derive(Debug, Default)]
struct State {
    companies: HashMap<String, Company>,
    employees: HashMap<String, Employee>,
    credentials: HashMap<String, Credential>,
}

impl State {
    fn identity_in_use(&self, key: &IdentityKey) -> bool {
        self.companies.contains_key(key.as_str())
            || self.employees.contains_key(key.as_str())
            || self.credentials.contains_key(key.as_str())
    }

    fn login_name_in_use(&self, login_name: &LoginName, except: Option<&IdentityKey>) -> bool {
        self.credentials.values().any(|c| {
            &c.login_name == login_name && except.is_none_or(|key| &c.identity_key != key)
        })
    }

    fn ensure_free(&self, credential: &Credential) -> AuthResult<()> {
        if self.identity_in_use(&credential.identity_key) {
            return Err(AuthError::conflict(IDENTITY_TAKEN));
        }
        if self.login_name_in_use(&credential.login_name, None) {
            return Err(AuthError::conflict(LOGIN_NAME_TAKEN));
        }
        Ok(())
    }
}

/// Shared, cloneable in-memory store
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AuthResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| AuthError::Internal("identity store lock poisoned".to_string()))
    }

    fn write(&self) -> AuthResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| AuthError::Internal("identity store lock poisoned".to_string()))
    }

    pub fn company_count(&self) -> usize {
        self.read().map(|s| s.companies.len()).unwrap_or_default()
    }

    pub fn employee_count(&self) -> usize {
        self.read().map(|s| s.employees.len()).unwrap_or_default()
    }

    pub fn credential_count(&self) -> usize {
        self.read().map(|s| s.credentials.len()).unwrap_or_default()
    }

    pub fn company(&self, rif: &str) -> Option<Company> {
        self.read().ok()?.companies.get(rif).cloned()
    }

    pub fn employee(&self, cedula: &str) -> Option<Employee> {
        self.read().ok()?.employees.get(cedula).cloned()
    }
}

impl PairedAccountRepository for InMemoryAuthRepository {
    async fn register(&self, entity: &PairedEntity, credential: &Credential) -> AuthResult<()> {
        let mut state = self.write()?;
        state.ensure_free(credential)?;

        match entity {
            PairedEntity::Company(company) => {
                state
                    .companies
                    .insert(company.rif.as_str().to_string(), company.clone());
            }
            PairedEntity::Employee(employee) => {
                if !state.companies.contains_key(employee.company_rif.as_str()) {
                    return Err(AuthError::validation(COMPANY_NOT_REGISTERED));
                }
                state
                    .employees
                    .insert(employee.cedula.as_str().to_string(), employee.clone());
            }
        }

        state
            .credentials
            .insert(credential.identity_key.as_str().to_string(), credential.clone());
        Ok(())
    }
}

impl CredentialRepository for InMemoryAuthRepository {
    async fn create(&self, credential: &Credential) -> AuthResult<()> {
        let mut state = self.write()?;
        state.ensure_free(credential)?;
        state
            .credentials
            .insert(credential.identity_key.as_str().to_string(), credential.clone());
        Ok(())
    }

    async fn find_by_login_name(&self, login_name: &LoginName) -> AuthResult<Option<Credential>> {
        let state = self.read()?;
        Ok(state
            .credentials
            .values()
            .find(|c| &c.login_name == login_name)
            .cloned())
    }

    async fn find_by_identity_key(&self, key: &IdentityKey) -> AuthResult<Option<Credential>> {
        Ok(self.read()?.credentials.get(key.as_str()).cloned())
    }

    async fn set_active(&self, key: &IdentityKey, active: bool) -> AuthResult<bool> {
        let mut state = self.write()?;
        match state.credentials.get_mut(key.as_str()) {
            Some(credential) => {
                credential.active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update(&self, key: &IdentityKey, changes: &CredentialChanges) -> AuthResult<bool> {
        if changes.is_empty() {
            return Err(AuthError::validation("no fields to update"));
        }

        let mut state = self.write()?;
        if let Some(login_name) = &changes.login_name {
            if state.login_name_in_use(login_name, Some(key)) {
                return Err(AuthError::conflict(LOGIN_NAME_TAKEN));
            }
        }

        let Some(credential) = state.credentials.get_mut(key.as_str()) else {
            return Ok(false);
        };
        if let Some(login_name) = &changes.login_name {
            credential.login_name = login_name.clone();
        }
        if let Some(password_hash) = &changes.password_hash {
            credential.password_hash = password_hash.clone();
        }
        Ok(true)
    }
}

impl EntityStatusRepository for InMemoryAuthRepository {
    async fn set_entity_active(
        &self,
        kind: EntityKind,
        key: &IdentityKey,
        active: bool,
    ) -> AuthResult<bool> {
        let mut state = self.write()?;
        let flag = match kind {
            EntityKind::Company => state.companies.get_mut(key.as_str()).map(|c| &mut c.active),
            EntityKind::Employee => state.employees.get_mut(key.as_str()).map(|e| &mut e.active),
        };

        match flag {
            Some(flag) => {
                *flag = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
