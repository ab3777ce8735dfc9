//! Domain Entities

pub mod company;
pub mod credential;
pub mod employee;

pub use company::Company;
pub use credential::{Credential, CredentialChanges};
pub use employee::{Employee, EmployeeProfile};

use crate::domain::value_object::{account_role::AccountRole, identity_key::IdentityKey};

/// Domain entity registered together with its credential
#[derive(Debug, Clone)]
pub enum PairedEntity {
    Company(Company),
    Employee(Employee),
}

impl PairedEntity {
    pub fn identity_key(&self) -> &IdentityKey {
        match self {
            PairedEntity::Company(company) => &company.rif,
            PairedEntity::Employee(employee) => &employee.cedula,
        }
    }

    /// Role of the credential paired with this entity
    pub fn role(&self) -> AccountRole {
        match self {
            PairedEntity::Company(_) => AccountRole::Company,
            PairedEntity::Employee(_) => AccountRole::Employee,
        }
    }
}

/// Which domain table a status toggle targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Company,
    Employee,
}

impl EntityKind {
    pub const fn label(&self) -> &'static str {
        match self {
            EntityKind::Company => "company",
            EntityKind::Employee => "employee",
        }
    }
}
