//! Integration tests for the client repository: CRUD, row scoping and
//! the delete cascade.

use firmdesk_core::error::FirmError;
use firmdesk_core::models::client::ClientDraft;
use firmdesk_core::models::order::{OrderDraft, OrderItemDraft};
use firmdesk_core::models::payment::PaymentDraft;
use firmdesk_core::models::product::ProductDraft;
use firmdesk_core::models::user::{CreateUser, Role};
use firmdesk_core::policy::RecordScope;
use firmdesk_core::repository::{
    ClientRepository, OrderRepository, Pagination, PaymentRepository, ProductRepository,
    UserRepository,
};
use firmdesk_db::repository::{
    SurrealClientRepository, SurrealOrderRepository, SurrealPaymentRepository,
    SurrealProductRepository, SurrealUserRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

type Db = surrealdb::engine::local::Db;

/// In-memory DB with migrations applied and one staff user created.
async fn setup() -> (SurrealClientRepository<Db>, Uuid, Surreal<Db>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    firmdesk_db::run_migrations(&db).await.unwrap();

    let users = SurrealUserRepository::new(db.clone());
    let user = users
        .create(CreateUser {
            username: "ivanov".into(),
            surname: "Иванов".into(),
            name: "Иван".into(),
            patronymic: "Иванович".into(),
            email: "ivanov@example.com".into(),
            password: "Sup3rSecret!".into(),
            role: Role::User,
        })
        .await
        .unwrap();

    (SurrealClientRepository::new(db.clone()), user.id, db)
}

fn draft(n: u32) -> ClientDraft {
    ClientDraft {
        surname: "Петров".into(),
        name: "Пётр".into(),
        email: format!("client{n}@example.com"),
    }
}

#[tokio::test]
async fn create_and_get_round_trip() {
    let (repo, creator, _db) = setup().await;

    let created = repo.create(creator, draft(1)).await.unwrap();
    assert_eq!(created.created_by, creator);

    let fetched = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.email, "client1@example.com");
    assert_eq!(fetched.surname, "Петров");

    let by_email = repo.get_by_email("client1@example.com").await.unwrap();
    assert_eq!(by_email.id, created.id);
}

#[tokio::test]
async fn missing_client_is_not_found() {
    let (repo, _creator, _db) = setup().await;

    let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, FirmError::NotFound { .. }));
}

#[tokio::test]
async fn duplicate_email_hits_the_unique_index() {
    let (repo, creator, _db) = setup().await;
    repo.create(creator, draft(1)).await.unwrap();

    let err = repo.create(creator, draft(1)).await.unwrap_err();
    assert!(matches!(
        err,
        FirmError::Duplicate { ref field, .. } if field == "email"
    ));
}

#[tokio::test]
async fn update_changes_fields() {
    let (repo, creator, _db) = setup().await;
    let created = repo.create(creator, draft(1)).await.unwrap();

    let updated = repo
        .update(
            created.id,
            ClientDraft {
                surname: "Сидоров".into(),
                name: "Семён".into(),
                email: "client1@example.com".into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.surname, "Сидоров");
    assert_eq!(updated.created_by, creator);
}

#[tokio::test]
async fn list_scopes_to_creator() {
    let (repo, creator, db) = setup().await;

    let users = SurrealUserRepository::new(db);
    let other = users
        .create(CreateUser {
            username: "petrov".into(),
            surname: "Петров".into(),
            name: "Пётр".into(),
            patronymic: String::new(),
            email: "petrov@example.com".into(),
            password: "Sup3rSecret!".into(),
            role: Role::User,
        })
        .await
        .unwrap();

    repo.create(creator, draft(1)).await.unwrap();
    repo.create(creator, draft(2)).await.unwrap();
    repo.create(other.id, draft(3)).await.unwrap();

    let all = repo
        .list(RecordScope::All, Pagination::default())
        .await
        .unwrap();
    assert_eq!(all.total, 3);

    let own = repo
        .list(RecordScope::CreatedBy(creator), Pagination::default())
        .await
        .unwrap();
    assert_eq!(own.total, 2);
    assert!(own.items.iter().all(|c| c.created_by == creator));
}

#[tokio::test]
async fn list_paginates() {
    let (repo, creator, _db) = setup().await;
    for n in 0..5 {
        repo.create(creator, draft(n)).await.unwrap();
    }

    let page = repo
        .list(
            RecordScope::All,
            Pagination {
                offset: 2,
                limit: 2,
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.offset, 2);
}

#[tokio::test]
async fn delete_cascades_to_dependents() {
    let (repo, creator, db) = setup().await;
    let client = repo.create(creator, draft(1)).await.unwrap();

    let products = SurrealProductRepository::new(db.clone());
    let product = products
        .create(ProductDraft {
            name: "Widget".into(),
            price_cents: 1500,
            category: None,
            stock: 10,
        })
        .await
        .unwrap();

    let orders = SurrealOrderRepository::new(db.clone());
    let order = orders
        .create(
            creator,
            OrderDraft {
                client_id: client.id,
                courier_id: None,
                status_id: None,
                content: Some("two widgets".into()),
            },
        )
        .await
        .unwrap();
    orders
        .add_item(
            order.id,
            OrderItemDraft {
                product_id: product.id,
                amount: 2,
                price_cents: 1500,
            },
        )
        .await
        .unwrap();

    let payments = SurrealPaymentRepository::new(db);
    let payment = payments
        .create(
            creator,
            PaymentDraft {
                order_id: order.id,
                client_id: client.id,
                status_id: None,
                amount_cents: 3000,
            },
        )
        .await
        .unwrap();

    repo.delete(client.id).await.unwrap();

    assert!(matches!(
        repo.get_by_id(client.id).await.unwrap_err(),
        FirmError::NotFound { .. }
    ));
    assert!(matches!(
        orders.get_by_id(order.id).await.unwrap_err(),
        FirmError::NotFound { .. }
    ));
    assert!(matches!(
        payments.get_by_id(payment.id).await.unwrap_err(),
        FirmError::NotFound { .. }
    ));
    assert!(orders.items(order.id).await.unwrap().is_empty());
}
