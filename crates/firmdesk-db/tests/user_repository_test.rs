//! Integration tests for the user repository.

use firmdesk_core::error::FirmError;
use firmdesk_core::models::user::{CreateUser, Role};
use firmdesk_core::repository::UserRepository;
use firmdesk_db::repository::SurrealUserRepository;
use firmdesk_db::verify_password;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> SurrealUserRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    firmdesk_db::run_migrations(&db).await.unwrap();
    SurrealUserRepository::new(db)
}

fn ivanov() -> CreateUser {
    CreateUser {
        username: "ivanov".into(),
        surname: "Иванов".into(),
        name: "Иван".into(),
        patronymic: "Иванович".into(),
        email: "ivanov@example.com".into(),
        password: "Sup3rSecret!".into(),
        role: Role::User,
    }
}

#[tokio::test]
async fn create_hashes_the_password() {
    let repo = setup().await;
    let user = repo.create(ivanov()).await.unwrap();

    assert_ne!(user.password_hash, "Sup3rSecret!");
    assert!(user.password_hash.starts_with("$argon2id$"));
    assert!(verify_password("Sup3rSecret!", &user.password_hash, None).unwrap());
    assert!(!verify_password("WrongPass1!", &user.password_hash, None).unwrap());
}

#[tokio::test]
async fn lookup_by_username_and_email() {
    let repo = setup().await;
    let created = repo.create(ivanov()).await.unwrap();

    let by_username = repo.get_by_username("ivanov").await.unwrap();
    assert_eq!(by_username.id, created.id);

    let by_email = repo.get_by_email("ivanov@example.com").await.unwrap();
    assert_eq!(by_email.id, created.id);
    assert_eq!(by_email.role, Role::User);

    let err = repo.get_by_username("nobody").await.unwrap_err();
    assert!(matches!(err, FirmError::NotFound { .. }));
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let repo = setup().await;
    repo.create(ivanov()).await.unwrap();

    let mut second = ivanov();
    second.email = "other@example.com".into();
    let err = repo.create(second).await.unwrap_err();
    assert!(matches!(err, FirmError::Duplicate { .. }));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let repo = setup().await;
    repo.create(ivanov()).await.unwrap();

    let mut second = ivanov();
    second.username = "ivanov2".into();
    let err = repo.create(second).await.unwrap_err();
    assert!(matches!(err, FirmError::Duplicate { .. }));
}

#[tokio::test]
async fn set_password_replaces_the_hash() {
    let repo = setup().await;
    let user = repo.create(ivanov()).await.unwrap();

    repo.set_password(user.id, "N3wSecret!").await.unwrap();

    let reloaded = repo.get_by_id(user.id).await.unwrap();
    assert!(verify_password("N3wSecret!", &reloaded.password_hash, None).unwrap());
    assert!(!verify_password("Sup3rSecret!", &reloaded.password_hash, None).unwrap());
}
