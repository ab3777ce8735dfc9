//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, CompanyFields, EmployeeFields, EntityFields,
    GetAccountUseCase, RegisterAdministratorInput, RegisterAdministratorUseCase, RegisterInput,
    RegisterPairedAccountUseCase, SetAccountStatusUseCase, SetEntityStatusUseCase, SignInInput,
    SignInUseCase, StatusOutput, UpdateAccountInput, UpdateAccountUseCase,
};
use crate::domain::entity::EntityKind;
use crate::domain::repository::{
    CredentialRepository, EntityStatusRepository, PairedAccountRepository,
};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AccountResponse, ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    RegisterAdministratorRequest, RegisterCompanyRequest, RegisterEmployeeRequest,
    RegisterResponse, StatusResponse, UpdateAccountRequest,
};
use crate::presentation::middleware::{AdministratorOnly, CurrentAccount};

/// Shared state for identity handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: CredentialRepository
        + PairedAccountRepository
        + EntityStatusRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenIssuer>,
}

/// 壊れた JSON は axum 既定のレスポンスではなく 400 `{"error": ..}` にする
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| {
            AuthError::validation(format!("invalid request body: {}", rejection.body_text()))
        })
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>>
where
    R: CredentialRepository
        + PairedAccountRepository
        + EntityStatusRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let req = json_body(payload)?;
    let use_case = SignInUseCase::new(state.repo.clone(), state.tokens.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            login_name: req.usuario,
            password: req.contrasena,
        })
        .await?;

    Ok(Json(LoginResponse {
        mensaje: "login successful".to_string(),
        token: output.token,
        tipo: output.role,
        identity_key: output.identity_key,
        expires_at: output.expires_at,
    }))
}

// ============================================================================
// Registration (Administrator)
// ============================================================================

/// POST /api/company/register
pub async fn register_company<R>(
    State(state): State<AuthAppState<R>>,
    _admin: AdministratorOnly,
    payload: Result<Json<RegisterCompanyRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: CredentialRepository
        + PairedAccountRepository
        + EntityStatusRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let req = json_body(payload)?;
    let input = RegisterInput {
        entity: EntityFields::Company(CompanyFields {
            rif: req.rif,
            name: req.nombre,
            email: req.email,
            address: req.direccion,
        }),
        login_name: req.usuario,
        password: req.contrasena,
    };

    register_paired(&state, input, "company registered").await
}

/// POST /api/employee/register
pub async fn register_employee<R>(
    State(state): State<AuthAppState<R>>,
    _admin: AdministratorOnly,
    payload: Result<Json<RegisterEmployeeRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: CredentialRepository
        + PairedAccountRepository
        + EntityStatusRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let req = json_body(payload)?;
    let input = RegisterInput {
        entity: EntityFields::Employee(EmployeeFields {
            cedula: req.cedula,
            names: req.nombres,
            surnames: req.apellidos,
            company_rif: req.rif_empresa,
            email: req.email,
            job_title: req.cargo,
            phone: req.numero_tlf,
        }),
        login_name: req.usuario,
        password: req.contrasena,
    };

    register_paired(&state, input, "employee registered").await
}

async fn register_paired<R>(
    state: &AuthAppState<R>,
    input: RegisterInput,
    mensaje: &str,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: CredentialRepository
        + PairedAccountRepository
        + EntityStatusRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case = RegisterPairedAccountUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            mensaje: mensaje.to_string(),
            identity_key: output.identity_key,
            usuario: output.login_name,
        }),
    ))
}

/// POST /api/account/register
pub async fn register_administrator<R>(
    State(state): State<AuthAppState<R>>,
    _admin: AdministratorOnly,
    payload: Result<Json<RegisterAdministratorRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: CredentialRepository
        + PairedAccountRepository
        + EntityStatusRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let req = json_body(payload)?;
    let use_case = RegisterAdministratorUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterAdministratorInput {
            identity_key: req.rif_cedula,
            login_name: req.usuario,
            password: req.contrasena,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            mensaje: "administrator registered".to_string(),
            identity_key: output.identity_key,
            usuario: output.login_name,
        }),
    ))
}

// ============================================================================
// Account (self or Administrator)
// ============================================================================

/// GET /api/account/{identity_key}
pub async fn get_account<R>(
    State(state): State<AuthAppState<R>>,
    CurrentAccount(actor): CurrentAccount,
    Path(identity_key): Path<String>,
) -> AuthResult<Json<AccountResponse>>
where
    R: CredentialRepository
        + PairedAccountRepository
        + EntityStatusRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let view = GetAccountUseCase::new(state.repo.clone())
        .execute(&actor, identity_key)
        .await?;

    Ok(Json(AccountResponse {
        identity_key: view.identity_key,
        usuario: view.login_name,
        tipo: view.role,
        activo: view.active,
    }))
}

/// PUT /api/account/{identity_key}
pub async fn update_account<R>(
    State(state): State<AuthAppState<R>>,
    CurrentAccount(actor): CurrentAccount,
    Path(identity_key): Path<String>,
    payload: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    R: CredentialRepository
        + PairedAccountRepository
        + EntityStatusRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let req = json_body(payload)?;
    let use_case = UpdateAccountUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(
            &actor,
            UpdateAccountInput {
                identity_key,
                login_name: req.usuario,
                password: req.contrasena,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("account updated")))
}

/// PUT /api/account/{identity_key}/password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    CurrentAccount(actor): CurrentAccount,
    Path(identity_key): Path<String>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    R: CredentialRepository
        + PairedAccountRepository
        + EntityStatusRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let req = json_body(payload)?;
    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(
            &actor,
            ChangePasswordInput {
                identity_key,
                new_password: req.nueva_contrasena,
                current_password: req.contrasena_actual,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("password updated")))
}

// ============================================================================
// Status toggles (Administrator)
// ============================================================================

fn status_response(subject: &str, output: StatusOutput) -> Json<StatusResponse> {
    Json(StatusResponse {
        mensaje: format!("{} {}", subject, output.action.done()),
        estado: output.active,
    })
}

/// PUT /api/account/{identity_key}/{action}
pub async fn set_account_status<R>(
    State(state): State<AuthAppState<R>>,
    _admin: AdministratorOnly,
    Path((identity_key, action)): Path<(String, String)>,
) -> AuthResult<Json<StatusResponse>>
where
    R: CredentialRepository
        + PairedAccountRepository
        + EntityStatusRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let output = SetAccountStatusUseCase::new(state.repo.clone())
        .execute(identity_key, &action)
        .await?;

    Ok(status_response("account", output))
}

/// PUT /api/company/{rif}/{action}
pub async fn set_company_status<R>(
    State(state): State<AuthAppState<R>>,
    _admin: AdministratorOnly,
    Path((rif, action)): Path<(String, String)>,
) -> AuthResult<Json<StatusResponse>>
where
    R: CredentialRepository
        + PairedAccountRepository
        + EntityStatusRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    set_entity_status(&state, EntityKind::Company, rif, &action).await
}

/// PUT /api/employee/{cedula}/{action}
pub async fn set_employee_status<R>(
    State(state): State<AuthAppState<R>>,
    _admin: AdministratorOnly,
    Path((cedula, action)): Path<(String, String)>,
) -> AuthResult<Json<StatusResponse>>
where
    R: CredentialRepository
        + PairedAccountRepository
        + EntityStatusRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    set_entity_status(&state, EntityKind::Employee, cedula, &action).await
}

async fn set_entity_status<R>(
    state: &AuthAppState<R>,
    kind: EntityKind,
    identity_key: String,
    action: &str,
) -> AuthResult<Json<StatusResponse>>
where
    R: CredentialRepository
        + PairedAccountRepository
        + EntityStatusRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let output = SetEntityStatusUseCase::new(state.repo.clone())
        .execute(kind, identity_key, action)
        .await?;

    Ok(status_response(kind.label(), output))
}
