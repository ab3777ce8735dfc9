use serde::{Deserialize, Serialize};
use std::fmt;

/// Role carried by a credential and by every session token.
///
/// The wire/store code is the historical `tipo` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountRole {
    #[serde(rename = "Administrador")]
    Administrator,
    #[serde(rename = "empresa")]
    Company,
    #[serde(rename = "empleado")]
    Employee,
}

impl AccountRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use AccountRole::*;
        match self {
            Administrator => "Administrador",
            Company => "empresa",
            Employee => "empleado",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use AccountRole::*;
        match code {
            "Administrador" => Some(Administrator),
            "empresa" => Some(Company),
            "empleado" => Some(Employee),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_administrator(&self) -> bool {
        matches!(self, AccountRole::Administrator)
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for role in [
            AccountRole::Administrator,
            AccountRole::Company,
            AccountRole::Employee,
        ] {
            assert_eq!(AccountRole::from_code(role.code()), Some(role));
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(AccountRole::from_code("admin"), None);
        assert_eq!(AccountRole::from_code("administrador"), None);
    }

    #[test]
    fn test_serde_uses_code() {
        let json = serde_json::to_string(&AccountRole::Company).unwrap();
        assert_eq!(json, "\"empresa\"");
        let role: AccountRole = serde_json::from_str("\"Administrador\"").unwrap();
        assert_eq!(role, AccountRole::Administrator);
    }

    #[test]
    fn test_role_checks() {
        assert!(AccountRole::Administrator.is_administrator());
        assert!(!AccountRole::Company.is_administrator());
        assert!(!AccountRole::Employee.is_administrator());
    }
}
