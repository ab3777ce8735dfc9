//! Identity Router
//!
//! `/login` is public. Every other route sits behind [`require_bearer`];
//! handlers add the role check through their extractors.

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use platform::token::TokenError;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::repository::{
    CredentialRepository, EntityStatusRepository, PairedAccountRepository,
};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer;

/// Create the identity router with PostgreSQL repository
///
/// Fails when the configured token secret is too weak to sign with.
pub fn identity_router(repo: PgAuthRepository, config: AuthConfig) -> Result<Router, TokenError> {
    identity_router_generic(repo, config)
}

/// Create the identity router for any repository implementation
pub fn identity_router_generic<R>(repo: R, config: AuthConfig) -> Result<Router, TokenError>
where
    R: CredentialRepository
        + PairedAccountRepository
        + EntityStatusRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let tokens = Arc::new(TokenIssuer::new(&config)?);
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        tokens: tokens.clone(),
    };

    let protected = Router::new()
        .route("/company/register", post(handlers::register_company::<R>))
        .route("/employee/register", post(handlers::register_employee::<R>))
        .route("/account/register", post(handlers::register_administrator::<R>))
        .route(
            "/account/{identity_key}",
            get(handlers::get_account::<R>).put(handlers::update_account::<R>),
        )
        .route(
            "/account/{identity_key}/password",
            put(handlers::change_password::<R>),
        )
        .route(
            "/account/{identity_key}/{action}",
            put(handlers::set_account_status::<R>),
        )
        .route("/company/{rif}/{action}", put(handlers::set_company_status::<R>))
        .route(
            "/employee/{cedula}/{action}",
            put(handlers::set_employee_status::<R>),
        )
        .route_layer(middleware::from_fn_with_state(tokens, require_bearer));

    Ok(Router::new()
        .route("/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state))
}
