//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AdministratorOnly, CurrentAccount, extract_bearer, require_bearer};
pub use router::{identity_router, identity_router_generic};
