//! Application Layer
//!
//! Use cases and application services.

pub mod account_status;
pub mod change_password;
pub mod config;
pub mod get_account;
pub(crate) mod hashing;
pub mod register;
pub mod register_admin;
pub mod sign_in;
pub mod token;
pub mod update_account;

// Re-exports
pub use account_status::{SetAccountStatusUseCase, SetEntityStatusUseCase, StatusOutput};
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::AuthConfig;
pub use get_account::{AccountView, GetAccountUseCase};
pub use register::{
    CompanyFields, EmployeeFields, EntityFields, RegisterInput, RegisterOutput,
    RegisterPairedAccountUseCase,
};
pub use register_admin::{
    RegisterAdministratorInput, RegisterAdministratorOutput, RegisterAdministratorUseCase,
};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use token::{AuthenticatedAccount, IssuedToken, SessionClaims, TokenIssuer};
pub use update_account::{UpdateAccountInput, UpdateAccountUseCase};
