//! Off-runtime password hashing
//!
//! Argon2 is deliberately slow, so both directions run on the blocking pool
//! and only the handling task waits for them.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

pub(crate) async fn hash_password(
    raw: RawPassword,
    config: Arc<AuthConfig>,
) -> AuthResult<UserPassword> {
    tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw, config.pepper()))
        .await
        .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| AuthError::Hashing(e.message().to_string()))
}

pub(crate) async fn verify_password(
    hash: UserPassword,
    raw: RawPassword,
    config: Arc<AuthConfig>,
) -> AuthResult<bool> {
    tokio::task::spawn_blocking(move || hash.verify(&raw, config.pepper()))
        .await
        .map_err(|e| AuthError::Internal(format!("verify task failed: {e}")))
}

/// Stand-in hash for login names that do not exist
static DUMMY_HASH: OnceCell<UserPassword> = OnceCell::const_new();

/// 存在しないログイン名でも同じコストの検証を行う
///
/// The result is always discarded; only the elapsed time matters.
pub(crate) async fn verify_against_dummy(
    raw: RawPassword,
    config: Arc<AuthConfig>,
) -> AuthResult<()> {
    let dummy = DUMMY_HASH
        .get_or_try_init(|| async {
            let seed = RawPassword::new("unregistered-login-name".to_string())
                .map_err(AuthError::from)?;
            hash_password(seed, config.clone()).await
        })
        .await?
        .clone();

    verify_password(dummy, raw, config).await?;
    Ok(())
}
