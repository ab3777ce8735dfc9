//! Shared Kernel - Domain-crossing minimal core
//!
//! Holds the error vocabulary every backend crate agrees on:
//! - [`error::app_error::AppError`] and the `AppResult<T>` alias
//! - [`error::kind::ErrorKind`], the tag that decides the transport status
//! - SQLSTATE classification and the axum response shape
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
