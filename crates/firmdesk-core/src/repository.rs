//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Listing operations on
//! creator-owned entities take a [`RecordScope`] so the access policy
//! is applied at the query, not after the fact.

use uuid::Uuid;

use crate::error::FirmResult;
use crate::models::{
    category::{Category, CreateCategory},
    client::{Client, ClientDraft},
    courier::{Courier, CourierDraft},
    feedback::{Feedback, FeedbackDraft, UpdateFeedback},
    order::{Order, OrderDraft, OrderItem, OrderItemDraft, UpdateOrder},
    password_reset::{CreatePasswordReset, PasswordReset},
    payment::{Payment, PaymentDraft, UpdatePayment},
    product::{Product, ProductDraft, UpdateProduct},
    session::{CreateSession, Session},
    status::{Status, StatusKind},
    user::{CreateUser, User},
};
use crate::policy::RecordScope;

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Auth-side repositories
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = FirmResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = FirmResult<User>> + Send;
    fn get_by_username(&self, username: &str) -> impl Future<Output = FirmResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = FirmResult<User>> + Send;
    /// Replace the stored hash with one derived from `password`.
    fn set_password(&self, id: Uuid, password: &str)
    -> impl Future<Output = FirmResult<()>> + Send;
}

pub trait SessionRepository: Send + Sync {
    fn create(&self, input: CreateSession) -> impl Future<Output = FirmResult<Session>> + Send;
    fn get_by_token_hash(
        &self,
        token_hash: &str,
    ) -> impl Future<Output = FirmResult<Session>> + Send;
    fn invalidate(&self, id: Uuid) -> impl Future<Output = FirmResult<()>> + Send;
}

pub trait PasswordResetRepository: Send + Sync {
    fn create(
        &self,
        input: CreatePasswordReset,
    ) -> impl Future<Output = FirmResult<PasswordReset>> + Send;
    /// Atomically mark the matching unconsumed token as consumed and
    /// return it. Not-found covers both unknown and already-used tokens.
    fn consume(&self, token_hash: &str) -> impl Future<Output = FirmResult<PasswordReset>> + Send;
}

// ---------------------------------------------------------------------------
// Record repositories
// ---------------------------------------------------------------------------

pub trait ClientRepository: Send + Sync {
    fn create(
        &self,
        creator: Uuid,
        draft: ClientDraft,
    ) -> impl Future<Output = FirmResult<Client>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = FirmResult<Client>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = FirmResult<Client>> + Send;
    fn update(
        &self,
        id: Uuid,
        draft: ClientDraft,
    ) -> impl Future<Output = FirmResult<Client>> + Send;
    /// Cascades to the client's orders (and their items), payments and
    /// feedback.
    fn delete(&self, id: Uuid) -> impl Future<Output = FirmResult<()>> + Send;
    fn list(
        &self,
        scope: RecordScope,
        pagination: Pagination,
    ) -> impl Future<Output = FirmResult<PaginatedResult<Client>>> + Send;
    /// Unpaginated listing for the export renderers.
    fn list_all(&self, scope: RecordScope) -> impl Future<Output = FirmResult<Vec<Client>>> + Send;
}

pub trait CourierRepository: Send + Sync {
    fn create(
        &self,
        creator: Uuid,
        draft: CourierDraft,
    ) -> impl Future<Output = FirmResult<Courier>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = FirmResult<Courier>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = FirmResult<Courier>> + Send;
    fn update(
        &self,
        id: Uuid,
        draft: CourierDraft,
    ) -> impl Future<Output = FirmResult<Courier>> + Send;
    /// Nullifies `courier_id` on referencing orders before deleting.
    fn delete(&self, id: Uuid) -> impl Future<Output = FirmResult<()>> + Send;
    fn list(
        &self,
        scope: RecordScope,
        pagination: Pagination,
    ) -> impl Future<Output = FirmResult<PaginatedResult<Courier>>> + Send;
}

pub trait ProductRepository: Send + Sync {
    fn create(&self, draft: ProductDraft) -> impl Future<Output = FirmResult<Product>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = FirmResult<Product>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateProduct,
    ) -> impl Future<Output = FirmResult<Product>> + Send;
    /// Cascades to order items referencing the product.
    fn delete(&self, id: Uuid) -> impl Future<Output = FirmResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = FirmResult<PaginatedResult<Product>>> + Send;
}

pub trait CategoryRepository: Send + Sync {
    fn create(&self, input: CreateCategory) -> impl Future<Output = FirmResult<Category>> + Send;
    fn get_by_name(&self, name: &str) -> impl Future<Output = FirmResult<Category>> + Send;
    fn list(&self) -> impl Future<Output = FirmResult<Vec<Category>>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = FirmResult<()>> + Send;
}

pub trait StatusRepository: Send + Sync {
    fn create(
        &self,
        kind: StatusKind,
        name: &str,
    ) -> impl Future<Output = FirmResult<Status>> + Send;
    fn get_by_id(
        &self,
        kind: StatusKind,
        id: Uuid,
    ) -> impl Future<Output = FirmResult<Status>> + Send;
    fn list(&self, kind: StatusKind) -> impl Future<Output = FirmResult<Vec<Status>>> + Send;
    /// Nullifies `status_id` on referencing orders/payments before
    /// deleting.
    fn delete(&self, kind: StatusKind, id: Uuid) -> impl Future<Output = FirmResult<()>> + Send;
}

pub trait OrderRepository: Send + Sync {
    fn create(
        &self,
        creator: Uuid,
        draft: OrderDraft,
    ) -> impl Future<Output = FirmResult<Order>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = FirmResult<Order>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateOrder,
    ) -> impl Future<Output = FirmResult<Order>> + Send;
    /// Cascades to the order's items, payments and feedback.
    fn delete(&self, id: Uuid) -> impl Future<Output = FirmResult<()>> + Send;
    fn list(
        &self,
        scope: RecordScope,
        pagination: Pagination,
    ) -> impl Future<Output = FirmResult<PaginatedResult<Order>>> + Send;

    fn add_item(
        &self,
        order_id: Uuid,
        draft: OrderItemDraft,
    ) -> impl Future<Output = FirmResult<OrderItem>> + Send;
    fn items(&self, order_id: Uuid) -> impl Future<Output = FirmResult<Vec<OrderItem>>> + Send;
    fn remove_item(
        &self,
        order_id: Uuid,
        item_id: Uuid,
    ) -> impl Future<Output = FirmResult<()>> + Send;
}

pub trait PaymentRepository: Send + Sync {
    fn create(
        &self,
        creator: Uuid,
        draft: PaymentDraft,
    ) -> impl Future<Output = FirmResult<Payment>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = FirmResult<Payment>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdatePayment,
    ) -> impl Future<Output = FirmResult<Payment>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = FirmResult<()>> + Send;
    fn list(
        &self,
        scope: RecordScope,
        pagination: Pagination,
    ) -> impl Future<Output = FirmResult<PaginatedResult<Payment>>> + Send;
}

pub trait FeedbackRepository: Send + Sync {
    fn create(
        &self,
        creator: Uuid,
        draft: FeedbackDraft,
    ) -> impl Future<Output = FirmResult<Feedback>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = FirmResult<Feedback>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateFeedback,
    ) -> impl Future<Output = FirmResult<Feedback>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = FirmResult<()>> + Send;
    fn list(
        &self,
        scope: RecordScope,
        pagination: Pagination,
    ) -> impl Future<Output = FirmResult<PaginatedResult<Feedback>>> + Send;
}
