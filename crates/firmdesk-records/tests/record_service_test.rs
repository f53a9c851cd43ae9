//! Integration tests for the record services: validation and the
//! row-level access policy, over the in-memory database.

use firmdesk_core::Requester;
use firmdesk_core::error::FirmError;
use firmdesk_core::models::category::CreateCategory;
use firmdesk_core::models::client::ClientDraft;
use firmdesk_core::models::order::OrderDraft;
use firmdesk_core::models::product::ProductDraft;
use firmdesk_core::models::user::{CreateUser, Role};
use firmdesk_core::repository::{Pagination, UserRepository};
use firmdesk_db::repository::{
    SurrealCategoryRepository, SurrealClientRepository, SurrealOrderRepository,
    SurrealProductRepository, SurrealUserRepository,
};
use firmdesk_records::{CatalogService, ClientService, OrderService};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

type Db = surrealdb::engine::local::Db;

async fn setup() -> (Surreal<Db>, Requester, Requester) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    firmdesk_db::run_migrations(&db).await.unwrap();

    let users = SurrealUserRepository::new(db.clone());
    let admin = users
        .create(CreateUser {
            username: "admin".into(),
            surname: "Админов".into(),
            name: "Андрей".into(),
            patronymic: String::new(),
            email: "admin@example.com".into(),
            password: "Sup3rSecret!".into(),
            role: Role::Admin,
        })
        .await
        .unwrap();
    let user = users
        .create(CreateUser {
            username: "ivanov".into(),
            surname: "Иванов".into(),
            name: "Иван".into(),
            patronymic: String::new(),
            email: "ivanov@example.com".into(),
            password: "Sup3rSecret!".into(),
            role: Role::User,
        })
        .await
        .unwrap();

    (
        db,
        Requester {
            id: admin.id,
            role: admin.role,
        },
        Requester {
            id: user.id,
            role: user.role,
        },
    )
}

fn clients(db: &Surreal<Db>) -> ClientService<SurrealClientRepository<Db>> {
    ClientService::new(SurrealClientRepository::new(db.clone()))
}

fn draft(n: u32) -> ClientDraft {
    ClientDraft {
        surname: "Петров".into(),
        name: "Пётр".into(),
        email: format!("client{n}@example.com"),
    }
}

#[tokio::test]
async fn invalid_draft_collects_field_errors() {
    let (db, _admin, user) = setup().await;
    let svc = clients(&db);

    let err = svc
        .create(
            &user,
            ClientDraft {
                surname: "petrov".into(),
                name: "".into(),
                email: "broken".into(),
            },
        )
        .await
        .unwrap_err();

    match err {
        FirmError::Validation(errors) => {
            let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, ["surname", "name", "email"]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_email_gets_a_friendly_field_error() {
    let (db, _admin, user) = setup().await;
    let svc = clients(&db);
    svc.create(&user, draft(1)).await.unwrap();

    let err = svc.create(&user, draft(1)).await.unwrap_err();
    match err {
        FirmError::Validation(errors) => {
            assert_eq!(errors.errors()[0].field, "email");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn user_cannot_touch_anothers_client() {
    let (db, admin, user) = setup().await;
    let svc = clients(&db);
    let foreign = svc.create(&admin, draft(1)).await.unwrap();

    let err = svc.get(&user, foreign.id).await.unwrap_err();
    assert!(matches!(err, FirmError::Forbidden { .. }));

    let err = svc.update(&user, foreign.id, draft(2)).await.unwrap_err();
    assert!(matches!(err, FirmError::Forbidden { .. }));

    let err = svc.delete(&user, foreign.id).await.unwrap_err();
    assert!(matches!(err, FirmError::Forbidden { .. }));

    // The record is untouched.
    let reloaded = svc.get(&admin, foreign.id).await.unwrap();
    assert_eq!(reloaded.email, "client1@example.com");
}

#[tokio::test]
async fn admin_sees_everything_users_see_their_own() {
    let (db, admin, user) = setup().await;
    let svc = clients(&db);
    svc.create(&admin, draft(1)).await.unwrap();
    svc.create(&user, draft(2)).await.unwrap();

    let all = svc.list(&admin, Pagination::default()).await.unwrap();
    assert_eq!(all.total, 2);

    let own = svc.list(&user, Pagination::default()).await.unwrap();
    assert_eq!(own.total, 1);
    assert_eq!(own.items[0].email, "client2@example.com");

    // Export pre-filtering follows the same scope.
    assert_eq!(svc.list_for_export(&admin).await.unwrap().len(), 2);
    assert_eq!(svc.list_for_export(&user).await.unwrap().len(), 1);
}

#[tokio::test]
async fn order_requires_a_visible_client() {
    let (db, admin, user) = setup().await;
    let client_svc = clients(&db);
    let foreign = client_svc.create(&admin, draft(1)).await.unwrap();

    let orders = OrderService::new(
        SurrealOrderRepository::new(db.clone()),
        SurrealClientRepository::new(db.clone()),
        SurrealProductRepository::new(db.clone()),
    );

    // Unknown client is a field error.
    let err = orders
        .create(
            &user,
            OrderDraft {
                client_id: uuid::Uuid::new_v4(),
                courier_id: None,
                status_id: None,
                content: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FirmError::Validation(_)));

    // Another user's client is forbidden.
    let err = orders
        .create(
            &user,
            OrderDraft {
                client_id: foreign.id,
                courier_id: None,
                status_id: None,
                content: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FirmError::Forbidden { .. }));

    // The admin can order for any client.
    orders
        .create(
            &admin,
            OrderDraft {
                client_id: foreign.id,
                courier_id: None,
                status_id: None,
                content: None,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn catalog_rejects_bad_products_and_duplicate_categories() {
    let (db, _admin, _user) = setup().await;
    let catalog = CatalogService::new(
        SurrealProductRepository::new(db.clone()),
        SurrealCategoryRepository::new(db.clone()),
    );

    let err = catalog
        .create_product(ProductDraft {
            name: "  ".into(),
            price_cents: -5,
            category: None,
            stock: -1,
        })
        .await
        .unwrap_err();
    match err {
        FirmError::Validation(errors) => assert_eq!(errors.errors().len(), 3),
        other => panic!("expected Validation, got {other:?}"),
    }

    catalog
        .create_category(CreateCategory {
            name: "Widgets".into(),
        })
        .await
        .unwrap();
    let err = catalog
        .create_category(CreateCategory {
            name: "Widgets".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FirmError::Validation(_)));
}
