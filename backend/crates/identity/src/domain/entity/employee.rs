use crate::domain::value_object::{email::Email, identity_key::IdentityKey, non_blank::NonBlank};

/// Employee entity, keyed by national ID (cédula)
#[derive(Debug, Clone)]
pub struct Employee {
    pub cedula: IdentityKey,
    pub names: NonBlank,
    pub surnames: NonBlank,
    /// Owning company; must already exist
    pub company_rif: IdentityKey,
    pub email: Email,
    pub job_title: NonBlank,
    pub phone: NonBlank,
    pub active: bool,
}

/// Employee fields before the entity is built
#[derive(Debug, Clone)]
pub struct EmployeeProfile {
    pub names: NonBlank,
    pub surnames: NonBlank,
    pub email: Email,
    pub job_title: NonBlank,
    pub phone: NonBlank,
}

impl Employee {
    pub const NAME_MAX_LENGTH: usize = 100;
    pub const JOB_TITLE_MAX_LENGTH: usize = 100;
    pub const PHONE_MAX_LENGTH: usize = 20;

    pub fn new(cedula: IdentityKey, company_rif: IdentityKey, profile: EmployeeProfile) -> Self {
        Self {
            cedula,
            names: profile.names,
            surnames: profile.surnames,
            company_rif,
            email: profile.email,
            job_title: profile.job_title,
            phone: profile.phone,
            active: true,
        }
    }
}
