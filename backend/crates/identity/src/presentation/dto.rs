//! API DTOs (Data Transfer Objects)
//!
//! Wire names follow the ferry frontend (`usuario`, `contrasena`, ...).
//! Required string fields default to empty so that a missing field reaches
//! validation and is reported as a 400 with the field's name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::account_role::AccountRole;

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub contrasena: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub mensaje: String,
    pub token: String,
    pub tipo: AccountRole,
    pub identity_key: String,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Registration
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterCompanyRequest {
    #[serde(default)]
    pub rif: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub email: String,
    pub direccion: Option<String>,
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub contrasena: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterEmployeeRequest {
    #[serde(default)]
    pub cedula: String,
    #[serde(default)]
    pub nombres: String,
    #[serde(default)]
    pub apellidos: String,
    #[serde(default)]
    pub rif_empresa: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub cargo: String,
    #[serde(default)]
    pub numero_tlf: String,
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub contrasena: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterAdministratorRequest {
    #[serde(default)]
    pub rif_cedula: String,
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub contrasena: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub mensaje: String,
    pub identity_key: String,
    pub usuario: String,
}

// ============================================================================
// Account management
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub identity_key: String,
    pub usuario: String,
    pub tipo: AccountRole,
    pub activo: bool,
}

/// `PUT /account/{identityKey}`; blank fields count as absent
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAccountRequest {
    pub usuario: Option<String>,
    pub contrasena: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub nueva_contrasena: String,
    pub contrasena_actual: Option<String>,
}

/// `{mensaje, estado}` for status toggles
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub mensaje: String,
    pub estado: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub mensaje: String,
}

impl MessageResponse {
    pub fn new(mensaje: impl Into<String>) -> Self {
        Self {
            mensaje: mensaje.into(),
        }
    }
}
