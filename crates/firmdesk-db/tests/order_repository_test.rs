//! Integration tests for orders, items, status dictionaries and the
//! rating constraint.

use firmdesk_core::error::FirmError;
use firmdesk_core::models::client::ClientDraft;
use firmdesk_core::models::courier::CourierDraft;
use firmdesk_core::models::feedback::FeedbackDraft;
use firmdesk_core::models::order::{OrderDraft, OrderItemDraft, UpdateOrder};
use firmdesk_core::models::status::StatusKind;
use firmdesk_core::models::user::{CreateUser, Role};
use firmdesk_core::repository::{
    ClientRepository, CourierRepository, FeedbackRepository, OrderRepository, StatusRepository,
    UserRepository,
};
use firmdesk_db::repository::{
    SurrealClientRepository, SurrealCourierRepository, SurrealFeedbackRepository,
    SurrealOrderRepository, SurrealStatusRepository, SurrealUserRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

type Db = surrealdb::engine::local::Db;

struct Fixture {
    db: Surreal<Db>,
    orders: SurrealOrderRepository<Db>,
    creator: Uuid,
    client_id: Uuid,
}

async fn setup() -> Fixture {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    firmdesk_db::run_migrations(&db).await.unwrap();

    let users = SurrealUserRepository::new(db.clone());
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

    let clients = SurrealClientRepository::new(db.clone());
    let client = clients
        .create(
            user.id,
            ClientDraft {
                surname: "Петров".into(),
                name: "Пётр".into(),
                email: "petrov@example.com".into(),
            },
        )
        .await
        .unwrap();

    Fixture {
        orders: SurrealOrderRepository::new(db.clone()),
        db,
        creator: user.id,
        client_id: client.id,
    }
}

fn order_draft(client_id: Uuid) -> OrderDraft {
    OrderDraft {
        client_id,
        courier_id: None,
        status_id: None,
        content: Some("two widgets".into()),
    }
}

#[tokio::test]
async fn create_and_get_round_trip() {
    let fx = setup().await;

    let order = fx
        .orders
        .create(fx.creator, order_draft(fx.client_id))
        .await
        .unwrap();
    assert_eq!(order.client_id, fx.client_id);
    assert_eq!(order.created_by, fx.creator);
    assert!(order.courier_id.is_none());

    let fetched = fx.orders.get_by_id(order.id).await.unwrap();
    assert_eq!(fetched.content.as_deref(), Some("two widgets"));
}

#[tokio::test]
async fn update_sets_and_clears_optional_references() {
    let fx = setup().await;
    let couriers = SurrealCourierRepository::new(fx.db.clone());
    let courier = couriers
        .create(
            fx.creator,
            CourierDraft {
                surname: "Сидоров".into(),
                name: "Семён".into(),
                email: "sidorov@example.com".into(),
            },
        )
        .await
        .unwrap();

    let order = fx
        .orders
        .create(fx.creator, order_draft(fx.client_id))
        .await
        .unwrap();

    let updated = fx
        .orders
        .update(
            order.id,
            UpdateOrder {
                courier_id: Some(Some(courier.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.courier_id, Some(courier.id));

    // Some(None) clears the assignment.
    let cleared = fx
        .orders
        .update(
            order.id,
            UpdateOrder {
                courier_id: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(cleared.courier_id.is_none());
}

#[tokio::test]
async fn items_are_added_listed_and_removed() {
    let fx = setup().await;
    let order = fx
        .orders
        .create(fx.creator, order_draft(fx.client_id))
        .await
        .unwrap();

    let item = fx
        .orders
        .add_item(
            order.id,
            OrderItemDraft {
                product_id: Uuid::new_v4(),
                amount: 2,
                price_cents: 1500,
            },
        )
        .await
        .unwrap();
    assert_eq!(item.order_id, order.id);
    assert_eq!(item.amount, 2);

    let items = fx.orders.items(order.id).await.unwrap();
    assert_eq!(items.len(), 1);

    fx.orders.remove_item(order.id, item.id).await.unwrap();
    assert!(fx.orders.items(order.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_cascades_to_items_and_feedback() {
    let fx = setup().await;
    let order = fx
        .orders
        .create(fx.creator, order_draft(fx.client_id))
        .await
        .unwrap();
    fx.orders
        .add_item(
            order.id,
            OrderItemDraft {
                product_id: Uuid::new_v4(),
                amount: 1,
                price_cents: 100,
            },
        )
        .await
        .unwrap();

    let feedback = SurrealFeedbackRepository::new(fx.db.clone());
    let review = feedback
        .create(
            fx.creator,
            FeedbackDraft {
                order_id: order.id,
                client_id: fx.client_id,
                comment: Some("great".into()),
                rating: 5,
            },
        )
        .await
        .unwrap();

    fx.orders.delete(order.id).await.unwrap();

    assert!(matches!(
        fx.orders.get_by_id(order.id).await.unwrap_err(),
        FirmError::NotFound { .. }
    ));
    assert!(fx.orders.items(order.id).await.unwrap().is_empty());
    assert!(matches!(
        feedback.get_by_id(review.id).await.unwrap_err(),
        FirmError::NotFound { .. }
    ));
}

#[tokio::test]
async fn out_of_range_rating_is_rejected_by_the_schema() {
    let fx = setup().await;
    let order = fx
        .orders
        .create(fx.creator, order_draft(fx.client_id))
        .await
        .unwrap();

    let feedback = SurrealFeedbackRepository::new(fx.db.clone());
    let result = feedback
        .create(
            fx.creator,
            FeedbackDraft {
                order_id: order.id,
                client_id: fx.client_id,
                comment: None,
                rating: 7,
            },
        )
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn deleting_a_status_nullifies_referencing_orders() {
    let fx = setup().await;
    let statuses = SurrealStatusRepository::new(fx.db.clone());
    let status = statuses.create(StatusKind::Order, "shipped").await.unwrap();

    let mut draft = order_draft(fx.client_id);
    draft.status_id = Some(status.id);
    let order = fx.orders.create(fx.creator, draft).await.unwrap();
    assert_eq!(order.status_id, Some(status.id));

    statuses.delete(StatusKind::Order, status.id).await.unwrap();

    let reloaded = fx.orders.get_by_id(order.id).await.unwrap();
    assert!(reloaded.status_id.is_none());
    assert!(statuses.list(StatusKind::Order).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_courier_nullifies_referencing_orders() {
    let fx = setup().await;
    let couriers = SurrealCourierRepository::new(fx.db.clone());
    let courier = couriers
        .create(
            fx.creator,
            CourierDraft {
                surname: "Сидоров".into(),
                name: "Семён".into(),
                email: "sidorov@example.com".into(),
            },
        )
        .await
        .unwrap();

    let mut draft = order_draft(fx.client_id);
    draft.courier_id = Some(courier.id);
    let order = fx.orders.create(fx.creator, draft).await.unwrap();

    couriers.delete(courier.id).await.unwrap();

    let reloaded = fx.orders.get_by_id(order.id).await.unwrap();
    assert!(reloaded.courier_id.is_none());
}
