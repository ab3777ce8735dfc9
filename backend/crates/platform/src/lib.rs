//! Platform Crate - Technical Infrastructure
//!
//! Domain-agnostic security primitives shared by the backend crates:
//! - Password hashing (Argon2id, salted, pepper-aware)
//! - HS256 signed claim tokens with expiry

pub mod password;
pub mod token;
