//! PostgreSQL adapter tests
//!
//! Need a running Postgres reachable through `DATABASE_URL`:
//! `cargo test -p identity -- --ignored`

use std::sync::Arc;

use identity::application::{
    CompanyFields, EmployeeFields, EntityFields, RegisterInput, RegisterPairedAccountUseCase,
    SignInInput, SignInUseCase, UpdateAccountInput, UpdateAccountUseCase,
};
use identity::domain::repository::CredentialRepository;
use identity::models::account_role::AccountRole;
use identity::models::identity_key::IdentityKey;
use identity::{AuthConfig, AuthError, AuthenticatedAccount, PgAuthRepository, TokenIssuer};
use sqlx::PgPool;

fn company(rif: &str, login_name: &str) -> RegisterInput {
    RegisterInput {
        entity: EntityFields::Company(CompanyFields {
            rif: rif.to_string(),
            name: "Acme Ferries".to_string(),
            email: "a@acme.com".to_string(),
            address: Some("Muelle 3, Puerto La Cruz".to_string()),
        }),
        login_name: login_name.to_string(),
        password: "secretpw".to_string(),
    }
}

fn employee(cedula: &str, company_rif: &str, login_name: &str) -> RegisterInput {
    RegisterInput {
        entity: EntityFields::Employee(EmployeeFields {
            cedula: cedula.to_string(),
            names: "Ana".to_string(),
            surnames: "Pérez".to_string(),
            company_rif: company_rif.to_string(),
            email: "ana@acme.com".to_string(),
            job_title: "Capitana".to_string(),
            phone: "0414-5550000".to_string(),
        }),
        login_name: login_name.to_string(),
        password: "marinera1".to_string(),
    }
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

fn use_case(pool: &PgPool) -> RegisterPairedAccountUseCase<PgAuthRepository> {
    RegisterPairedAccountUseCase::new(
        Arc::new(PgAuthRepository::new(pool.clone())),
        Arc::new(AuthConfig::with_random_secret()),
    )
}

#[sqlx::test(migrations = "../../../database/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn registers_company_and_credential_together(pool: PgPool) {
    use_case(&pool).execute(company("J-001", "acme1")).await.unwrap();

    assert_eq!(count(&pool, "empresa").await, 1);
    assert_eq!(count(&pool, "usuarios").await, 1);

    let tipo: String = sqlx::query_scalar("SELECT tipo FROM usuarios WHERE rif_cedula = 'J-001'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(tipo, "empresa");
}

#[sqlx::test(migrations = "../../../database/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_login_name_rolls_back_entity(pool: PgPool) {
    let use_case = use_case(&pool);
    use_case.execute(company("J-001", "acme1")).await.unwrap();

    let err = use_case.execute(company("J-002", "acme1")).await.unwrap_err();

    assert!(matches!(err, AuthError::Conflict(_)));
    assert_eq!(count(&pool, "empresa").await, 1);
    assert_eq!(count(&pool, "usuarios").await, 1);
}

#[sqlx::test(migrations = "../../../database/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn employee_needs_existing_company(pool: PgPool) {
    let use_case = use_case(&pool);

    let err = use_case
        .execute(employee("V-100", "J-404", "ana.perez"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation(ref m) if m == "company not registered"));
    assert_eq!(count(&pool, "empleados").await, 0);
    assert_eq!(count(&pool, "usuarios").await, 0);

    use_case.execute(company("J-001", "acme1")).await.unwrap();
    use_case
        .execute(employee("V-100", "J-001", "ana.perez"))
        .await
        .unwrap();
    assert_eq!(count(&pool, "empleados").await, 1);
}

#[sqlx::test(migrations = "../../../database/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn concurrent_registrations_on_one_key(pool: PgPool) {
    let handles: Vec<_> = (0..6)
        .map(|i| {
            let use_case = use_case(&pool);
            tokio::spawn(async move {
                use_case
                    .execute(company("J-777", &format!("racer{i}")))
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AuthError::Conflict(_)) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(count(&pool, "empresa").await, 1);
    assert_eq!(count(&pool, "usuarios").await, 1);
}

#[sqlx::test(migrations = "../../../database/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn login_status_and_patch_round(pool: PgPool) {
    let config = Arc::new(AuthConfig::with_random_secret());
    let repo = Arc::new(PgAuthRepository::new(pool.clone()));
    RegisterPairedAccountUseCase::new(repo.clone(), config.clone())
        .execute(company("J-001", "acme1"))
        .await
        .unwrap();

    let sign_in = SignInUseCase::new(
        repo.clone(),
        Arc::new(TokenIssuer::new(&config).unwrap()),
        config.clone(),
    );
    let login = |name: &str| SignInInput {
        login_name: name.to_string(),
        password: "secretpw".to_string(),
    };

    assert!(sign_in.execute(login("acme1")).await.is_ok());

    let key = IdentityKey::new("J-001").unwrap();
    assert!(repo.set_active(&key, false).await.unwrap());
    assert!(matches!(
        sign_in.execute(login("acme1")).await,
        Err(AuthError::AccountInactive)
    ));
    assert!(repo.set_active(&key, true).await.unwrap());

    let me = AuthenticatedAccount {
        identity_key: key,
        role: AccountRole::Company,
    };
    UpdateAccountUseCase::new(repo.clone(), config.clone())
        .execute(
            &me,
            UpdateAccountInput {
                identity_key: "J-001".to_string(),
                login_name: Some("acme-renamed".to_string()),
                password: None,
            },
        )
        .await
        .unwrap();

    assert!(sign_in.execute(login("acme-renamed")).await.is_ok());
    assert!(matches!(
        sign_in.execute(login("acme1")).await,
        Err(AuthError::InvalidCredentials)
    ));
}
