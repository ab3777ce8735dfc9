//! Register Paired Account Use Case
//!
//! Creates a company or employee together with its credential. The two
//! rows are written by a single repository call that commits or rolls back
//! as one unit.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::hashing::hash_password;
use crate::domain::entity::{Company, Credential, Employee, EmployeeProfile, PairedEntity};
use crate::domain::repository::PairedAccountRepository;
use crate::domain::value_object::{
    account_role::AccountRole, email::Email, identity_key::IdentityKey, login_name::LoginName,
    non_blank::NonBlank, user_password::RawPassword,
};
use crate::error::AuthResult;

/// Company fields as received
pub struct CompanyFields {
    pub rif: String,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
}

/// Employee fields as received
pub struct EmployeeFields {
    pub cedula: String,
    pub names: String,
    pub surnames: String,
    pub company_rif: String,
    pub email: String,
    pub job_title: String,
    pub phone: String,
}

pub enum EntityFields {
    Company(CompanyFields),
    Employee(EmployeeFields),
}

impl EntityFields {
    fn into_entity(self) -> AuthResult<PairedEntity> {
        let entity = match self {
            EntityFields::Company(f) => PairedEntity::Company(Company::new(
                IdentityKey::named("rif", f.rif)?,
                NonBlank::new("nombre", f.name, Company::NAME_MAX_LENGTH)?,
                Email::new(f.email)?,
                NonBlank::optional("direccion", f.address, Company::ADDRESS_MAX_LENGTH)?,
            )),
            EntityFields::Employee(f) => {
                let cedula = IdentityKey::named("cedula", f.cedula)?;
                let profile = EmployeeProfile {
                    names: NonBlank::new("nombres", f.names, Employee::NAME_MAX_LENGTH)?,
                    surnames: NonBlank::new("apellidos", f.surnames, Employee::NAME_MAX_LENGTH)?,
                    email: Email::new(f.email)?,
                    job_title: NonBlank::new("cargo", f.job_title, Employee::JOB_TITLE_MAX_LENGTH)?,
                    phone: NonBlank::new("numero_tlf", f.phone, Employee::PHONE_MAX_LENGTH)?,
                };
                let company_rif = IdentityKey::named("rif_empresa", f.company_rif)?;
                PairedEntity::Employee(Employee::new(cedula, company_rif, profile))
            }
        };
        Ok(entity)
    }
}

pub struct RegisterInput {
    pub entity: EntityFields,
    pub login_name: String,
    pub password: String,
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub identity_key: String,
    pub login_name: String,
    pub role: AccountRole,
}

pub struct RegisterPairedAccountUseCase<R>
where
    R: PairedAccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterPairedAccountUseCase<R>
where
    R: PairedAccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let entity = input.entity.into_entity()?;
        let login_name = LoginName::new(input.login_name)?;
        let raw_password = RawPassword::new(input.password)?;

        // Hash before the store transaction opens so it never waits on Argon2
        let password_hash = hash_password(raw_password, self.config.clone()).await?;

        let credential = Credential::new(
            entity.identity_key().clone(),
            login_name,
            password_hash,
            entity.role(),
        );

        self.repo.register(&entity, &credential).await?;

        tracing::info!(
            identity_key = %credential.identity_key,
            login_name = %credential.login_name,
            role = %credential.role,
            "Paired account registered"
        );

        Ok(RegisterOutput {
            identity_key: credential.identity_key.to_string(),
            login_name: credential.login_name.to_string(),
            role: credential.role,
        })
    }
}
