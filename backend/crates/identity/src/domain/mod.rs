//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Company, Credential, Employee, EntityKind, PairedEntity};
pub use repository::{CredentialRepository, EntityStatusRepository, PairedAccountRepository};
