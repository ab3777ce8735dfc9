//! PostgreSQL Repository Implementations

use sqlx::{PgConnection, PgPool};

use crate::domain::entity::{
    Company, Credential, CredentialChanges, Employee, EntityKind, PairedEntity,
};
use crate::domain::repository::{
    CredentialRepository, EntityStatusRepository, PairedAccountRepository,
};
use crate::domain::value_object::{
    account_role::AccountRole, identity_key::IdentityKey, login_name::LoginName,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};
use kernel::error::{conversions::classify_sqlstate, kind::ErrorKind};

const LOGIN_NAME_CONSTRAINT: &str = "usuarios_usuario_key";
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub(crate) const IDENTITY_TAKEN: &str = "identity already registered";
pub(crate) const LOGIN_NAME_TAKEN: &str = "login name already taken";
pub(crate) const COMPANY_NOT_REGISTERED: &str = "company not registered";

/// PostgreSQL-backed identity repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Paired Registration
// ============================================================================

impl PairedAccountRepository for PgAuthRepository {
    async fn register(&self, entity: &PairedEntity, credential: &Credential) -> AuthResult<()> {
        // Dropping `tx` on any early return rolls the whole unit back
        let mut tx = self.pool.begin().await?;

        if identity_in_use(&mut tx, entity.identity_key()).await? {
            return Err(AuthError::conflict(IDENTITY_TAKEN));
        }
        if login_name_in_use(&mut tx, &credential.login_name).await? {
            return Err(AuthError::conflict(LOGIN_NAME_TAKEN));
        }

        match entity {
            PairedEntity::Company(company) => insert_company(&mut tx, company).await?,
            PairedEntity::Employee(employee) => {
                if !company_exists(&mut tx, &employee.company_rif).await? {
                    return Err(AuthError::validation(COMPANY_NOT_REGISTERED));
                }
                insert_employee(&mut tx, employee).await?;
            }
        }

        insert_credential(&mut tx, credential).await?;

        tx.commit().await?;
        Ok(())
    }
}

// ============================================================================
// Credential Repository Implementation
// ============================================================================

impl CredentialRepository for PgAuthRepository {
    async fn create(&self, credential: &Credential) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        if identity_in_use(&mut tx, &credential.identity_key).await? {
            return Err(AuthError::conflict(IDENTITY_TAKEN));
        }
        if login_name_in_use(&mut tx, &credential.login_name).await? {
            return Err(AuthError::conflict(LOGIN_NAME_TAKEN));
        }

        insert_credential(&mut tx, credential).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_login_name(&self, login_name: &LoginName) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                rif_cedula,
                usuario,
                contrasena,
                tipo,
                estado
            FROM usuarios
            WHERE usuario = $1
            "#,
        )
        .bind(login_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credential()).transpose()
    }

    async fn find_by_identity_key(&self, key: &IdentityKey) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                rif_cedula,
                usuario,
                contrasena,
                tipo,
                estado
            FROM usuarios
            WHERE rif_cedula = $1
            "#,
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credential()).transpose()
    }

    async fn set_active(&self, key: &IdentityKey, active: bool) -> AuthResult<bool> {
        let updated = sqlx::query("UPDATE usuarios SET estado = $2 WHERE rif_cedula = $1")
            .bind(key.as_str())
            .bind(active)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    async fn update(&self, key: &IdentityKey, changes: &CredentialChanges) -> AuthResult<bool> {
        if changes.is_empty() {
            return Err(AuthError::validation("no fields to update"));
        }

        let updated = sqlx::query(
            r#"
            UPDATE usuarios SET
                usuario = COALESCE($2, usuario),
                contrasena = COALESCE($3, contrasena)
            WHERE rif_cedula = $1
            "#,
        )
        .bind(key.as_str())
        .bind(changes.login_name.as_ref().map(|n| n.as_str()))
        .bind(changes.password_hash.as_ref().map(|h| h.as_phc_string()))
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?
        .rows_affected();

        Ok(updated > 0)
    }
}

// ============================================================================
// Entity Status Repository Implementation
// ============================================================================

impl EntityStatusRepository for PgAuthRepository {
    async fn set_entity_active(
        &self,
        kind: EntityKind,
        key: &IdentityKey,
        active: bool,
    ) -> AuthResult<bool> {
        let sql = match kind {
            EntityKind::Company => "UPDATE empresa SET estado = $2 WHERE rif = $1",
            EntityKind::Employee => "UPDATE empleados SET estado = $2 WHERE cedula = $1",
        };

        let updated = sqlx::query(sql)
            .bind(key.as_str())
            .bind(active)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }
}

// ============================================================================
// Transaction steps
// ============================================================================

/// Key already used by a company, an employee or a credential
async fn identity_in_use(conn: &mut PgConnection, key: &IdentityKey) -> AuthResult<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT
            EXISTS(SELECT 1 FROM empresa WHERE rif = $1)
            OR EXISTS(SELECT 1 FROM empleados WHERE cedula = $1)
            OR EXISTS(SELECT 1 FROM usuarios WHERE rif_cedula = $1)
        "#,
    )
    .bind(key.as_str())
    .fetch_one(conn)
    .await?;

    Ok(exists)
}

async fn login_name_in_use(conn: &mut PgConnection, login_name: &LoginName) -> AuthResult<bool> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM usuarios WHERE usuario = $1)")
            .bind(login_name.as_str())
            .fetch_one(conn)
            .await?;

    Ok(exists)
}

async fn company_exists(conn: &mut PgConnection, rif: &IdentityKey) -> AuthResult<bool> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM empresa WHERE rif = $1)")
            .bind(rif.as_str())
            .fetch_one(conn)
            .await?;

    Ok(exists)
}

async fn insert_company(conn: &mut PgConnection, company: &Company) -> AuthResult<()> {
    sqlx::query(
        r#"
        INSERT INTO empresa (
            rif,
            nombre,
            email,
            direccion,
            estado
        ) VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(company.rif.as_str())
    .bind(company.name.as_str())
    .bind(company.email.as_str())
    .bind(company.address.as_ref().map(|a| a.as_str()))
    .bind(company.active)
    .execute(conn)
    .await
    .map_err(map_write_error)?;

    Ok(())
}

async fn insert_employee(conn: &mut PgConnection, employee: &Employee) -> AuthResult<()> {
    sqlx::query(
        r#"
        INSERT INTO empleados (
            cedula,
            nombres,
            apellidos,
            rif_empresa,
            email,
            cargo,
            numero_tlf,
            estado
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(employee.cedula.as_str())
    .bind(employee.names.as_str())
    .bind(employee.surnames.as_str())
    .bind(employee.company_rif.as_str())
    .bind(employee.email.as_str())
    .bind(employee.job_title.as_str())
    .bind(employee.phone.as_str())
    .bind(employee.active)
    .execute(conn)
    .await
    .map_err(map_write_error)?;

    Ok(())
}

async fn insert_credential(conn: &mut PgConnection, credential: &Credential) -> AuthResult<()> {
    sqlx::query(
        r#"
        INSERT INTO usuarios (
            rif_cedula,
            usuario,
            contrasena,
            tipo,
            estado
        ) VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(credential.identity_key.as_str())
    .bind(credential.login_name.as_str())
    .bind(credential.password_hash.as_phc_string())
    .bind(credential.role.code())
    .bind(credential.active)
    .execute(conn)
    .await
    .map_err(map_write_error)?;

    Ok(())
}

/// Constraint violations that lost a race with a concurrent writer
fn map_write_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(code) = db_err.code() {
            if let Some(mapped) = classify_violation(&code, db_err.constraint()) {
                return mapped;
            }
        }
    }
    AuthError::Database(err)
}

fn classify_violation(code: &str, constraint: Option<&str>) -> Option<AuthError> {
    match classify_sqlstate(code) {
        ErrorKind::Conflict if constraint == Some(LOGIN_NAME_CONSTRAINT) => {
            Some(AuthError::conflict(LOGIN_NAME_TAKEN))
        }
        ErrorKind::Conflict => Some(AuthError::conflict(IDENTITY_TAKEN)),
        ErrorKind::BadRequest if code == FOREIGN_KEY_VIOLATION => {
            Some(AuthError::validation(COMPANY_NOT_REGISTERED))
        }
        _ => None,
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct CredentialRow {
    rif_cedula: String,
    usuario: String,
    contrasena: String,
    tipo: String,
    estado: bool,
}

impl CredentialRow {
    fn into_credential(self) -> AuthResult<Credential> {
        let identity_key = IdentityKey::new(self.rif_cedula)
            .map_err(|e| AuthError::Internal(format!("Invalid rif_cedula: {}", e)))?;
        let login_name = LoginName::new(self.usuario)
            .map_err(|e| AuthError::Internal(format!("Invalid usuario: {}", e)))?;
        let password_hash = UserPassword::from_phc_string(self.contrasena)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;
        let role = AccountRole::from_code(&self.tipo)
            .ok_or_else(|| AuthError::Internal(format!("Unknown tipo: {}", self.tipo)))?;

        Ok(Credential {
            identity_key,
            login_name,
            password_hash,
            role,
            active: self.estado,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_name_race_maps_to_login_conflict() {
        let err = classify_violation("23505", Some("usuarios_usuario_key")).unwrap();
        assert!(matches!(&err, AuthError::Conflict(msg) if msg == LOGIN_NAME_TAKEN));
    }

    #[test]
    fn test_identity_key_races_map_to_identity_conflict() {
        for constraint in ["empresa_pkey", "empleados_pkey", "usuarios_pkey"] {
            let err = classify_violation("23505", Some(constraint)).unwrap();
            assert!(matches!(&err, AuthError::Conflict(msg) if msg == IDENTITY_TAKEN));
        }
        let err = classify_violation("23505", None).unwrap();
        assert!(matches!(&err, AuthError::Conflict(msg) if msg == IDENTITY_TAKEN));
    }

    #[test]
    fn test_company_removed_mid_registration_is_validation() {
        let err = classify_violation("23503", Some("empleados_rif_empresa_fkey")).unwrap();
        assert!(matches!(&err, AuthError::Validation(msg) if msg == COMPANY_NOT_REGISTERED));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_other_failures_stay_internal() {
        assert!(classify_violation("23514", Some("usuarios_tipo_check")).is_none());
        assert!(classify_violation("40001", None).is_none());
        assert!(classify_violation("57P01", None).is_none());
    }
}
