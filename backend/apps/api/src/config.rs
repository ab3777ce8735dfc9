//! Server configuration
//!
//! Read once at startup. A missing `DATABASE_URL` or `JWT_SECRET` aborts
//! startup; everything else has a default.

use anyhow::{Context, bail, ensure};
use identity::config::AuthConfig;
use identity::application::RegisterAdministratorInput;
use platform::token::MIN_SECRET_LENGTH;
use std::fmt;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    jwt_secret: Vec<u8>,
    password_pepper: Option<Vec<u8>>,
    bootstrap_admin: Option<BootstrapAdmin>,
}

#[derive(Clone)]
pub struct BootstrapAdmin {
    pub identity_key: String,
    pub login_name: String,
    pub password: String,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `lookup` は環境変数の代わり (テストで差し替え可能)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let jwt_secret = var("JWT_SECRET").context("JWT_SECRET must be set")?.into_bytes();
        ensure!(
            jwt_secret.len() >= MIN_SECRET_LENGTH,
            "JWT_SECRET must be at least {MIN_SECRET_LENGTH} bytes"
        );

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse().context("PORT must be a port number")?,
            None => DEFAULT_PORT,
        };

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        ensure!(
            database_max_connections > 0,
            "DATABASE_MAX_CONNECTIONS must be a positive integer"
        );

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let bootstrap_admin = match (
            var("BOOTSTRAP_ADMIN_ID"),
            var("BOOTSTRAP_ADMIN_LOGIN"),
            var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(identity_key), Some(login_name), Some(password)) => Some(BootstrapAdmin {
                identity_key,
                login_name,
                password,
            }),
            (None, None, None) => None,
            _ => bail!(
                "BOOTSTRAP_ADMIN_ID, BOOTSTRAP_ADMIN_LOGIN and BOOTSTRAP_ADMIN_PASSWORD must be set together"
            ),
        };

        Ok(Self {
            database_url,
            database_max_connections,
            port,
            frontend_origins,
            jwt_secret,
            password_pepper: var("PASSWORD_PEPPER").map(String::into_bytes),
            bootstrap_admin,
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        let config = AuthConfig::new(self.jwt_secret.clone());
        match &self.password_pepper {
            Some(pepper) => config.with_pepper(pepper.clone()),
            None => config,
        }
    }

    pub fn bootstrap_admin(&self) -> Option<RegisterAdministratorInput> {
        self.bootstrap_admin
            .clone()
            .map(|admin| RegisterAdministratorInput {
                identity_key: admin.identity_key,
                login_name: admin.login_name,
                password: admin.password,
            })
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("port", &self.port)
            .field("frontend_origins", &self.frontend_origins)
            .field("jwt_secret", &"[REDACTED]")
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field(
                "bootstrap_admin",
                &self.bootstrap_admin.as_ref().map(|a| a.login_name.as_str()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/ferry"), ("JWT_SECRET", SECRET)])
            .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.frontend_origins.len(), 2);
        assert!(config.bootstrap_admin().is_none());
        assert!(config.auth_config().pepper().is_none());
    }

    #[test]
    fn test_required_variables() {
        assert!(load(&[("JWT_SECRET", SECRET)]).is_err());
        assert!(load(&[("DATABASE_URL", "postgres://localhost/ferry")]).is_err());
    }

    #[test]
    fn test_short_secret_refused() {
        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/ferry"),
            ("JWT_SECRET", "short"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_partial_bootstrap_admin_refused() {
        let result = load(&[
            ("DATABASE_URL", "postgres://localhost/ferry"),
            ("JWT_SECRET", SECRET),
            ("BOOTSTRAP_ADMIN_LOGIN", "root-admin"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_full_configuration() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/ferry"),
            ("JWT_SECRET", SECRET),
            ("PASSWORD_PEPPER", "pimienta"),
            ("PORT", "9090"),
            ("FRONTEND_ORIGINS", "https://ferry.example, "),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("BOOTSTRAP_ADMIN_ID", "ADMIN-1"),
            ("BOOTSTRAP_ADMIN_LOGIN", "root-admin"),
            ("BOOTSTRAP_ADMIN_PASSWORD", "admin-password"),
        ])
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.database_max_connections, 12);
        assert_eq!(config.frontend_origins, vec!["https://ferry.example".to_string()]);
        assert_eq!(config.auth_config().pepper(), Some(b"pimienta".as_slice()));
        assert_eq!(config.bootstrap_admin().unwrap().identity_key, "ADMIN-1");
        assert!(!format!("{config:?}").contains(SECRET));
    }
}
