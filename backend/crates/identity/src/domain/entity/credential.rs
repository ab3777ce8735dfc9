//! Credential Entity
//!
//! The login-name / password-hash / role / active tuple. Keyed by the same
//! identity key as its paired company or employee (administrators have no
//! paired entity).

use crate::domain::value_object::{
    account_role::AccountRole, identity_key::IdentityKey, login_name::LoginName,
    user_password::UserPassword,
};

#[derive(Debug, Clone)]
pub struct Credential {
    pub identity_key: IdentityKey,
    /// Globally unique across all roles
    pub login_name: LoginName,
    /// Never leaves the subsystem
    pub password_hash: UserPassword,
    pub role: AccountRole,
    /// Checked at login only
    pub active: bool,
}

impl Credential {
    /// New credentials start active
    pub fn new(
        identity_key: IdentityKey,
        login_name: LoginName,
        password_hash: UserPassword,
        role: AccountRole,
    ) -> Self {
        Self {
            identity_key,
            login_name,
            password_hash,
            role,
            active: true,
        }
    }
}

/// Validated, already-hashed changes for one credential
///
/// Each `Some` maps to exactly one column; `None` leaves the column as is.
#[derive(Debug, Clone, Default)]
pub struct CredentialChanges {
    pub login_name: Option<LoginName>,
    pub password_hash: Option<UserPassword>,
}

impl CredentialChanges {
    pub fn is_empty(&self) -> bool {
        self.login_name.is_none() && self.password_hash.is_none()
    }
}
