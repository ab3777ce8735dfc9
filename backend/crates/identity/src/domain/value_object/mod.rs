//! Value Object Module

pub mod account_patch;
pub mod account_role;
pub mod email;
pub mod identity_key;
pub mod login_name;
pub mod non_blank;
pub mod status_action;
pub mod user_password;
