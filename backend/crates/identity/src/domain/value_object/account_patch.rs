//! Account Patch Value Object
//!
//! Partial update of a credential. Each field is independently optional;
//! blank input counts as "not supplied". Role and identity key are not
//! patchable at all.

use kernel::error::app_error::{AppError, AppResult};

use crate::domain::value_object::{login_name::LoginName, user_password::RawPassword};

#[derive(Debug)]
pub struct AccountPatch {
    pub login_name: Option<LoginName>,
    pub password: Option<RawPassword>,
}

impl AccountPatch {
    pub fn new(login_name: Option<String>, password: Option<String>) -> AppResult<Self> {
        let login_name = supplied(login_name).map(LoginName::new).transpose()?;
        let password = supplied(password).map(RawPassword::new).transpose()?;

        if login_name.is_none() && password.is_none() {
            return Err(AppError::bad_request("no fields to update")
                .with_action("Send usuario and/or contrasena"));
        }

        Ok(Self {
            login_name,
            password,
        })
    }
}

fn supplied(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_rejected() {
        let err = AccountPatch::new(None, Some("   ".into())).unwrap_err();
        assert_eq!(err.message(), "no fields to update");
    }

    #[test]
    fn test_login_only() {
        let patch = AccountPatch::new(Some("acme2".into()), None).unwrap();
        assert_eq!(patch.login_name.unwrap().as_str(), "acme2");
        assert!(patch.password.is_none());
    }

    #[test]
    fn test_fields_are_validated() {
        assert!(AccountPatch::new(Some("abc".into()), None).is_err());
        assert!(AccountPatch::new(None, Some("short".into())).is_err());
    }
}
