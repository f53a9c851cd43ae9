//! Order record service — orders and their items.

use firmdesk_core::error::{FirmError, FirmResult};
use firmdesk_core::models::order::{Order, OrderDraft, OrderItem, OrderItemDraft, UpdateOrder};
use firmdesk_core::repository::{
    ClientRepository, OrderRepository, PaginatedResult, Pagination, ProductRepository,
};
use firmdesk_core::validation::FieldErrors;
use firmdesk_core::Requester;
use tracing::debug;
use uuid::Uuid;

pub struct OrderService<O, C, P>
where
    O: OrderRepository,
    C: ClientRepository,
    P: ProductRepository,
{
    orders: O,
    clients: C,
    products: P,
}

impl<O, C, P> OrderService<O, C, P>
where
    O: OrderRepository,
    C: ClientRepository,
    P: ProductRepository,
{
    pub fn new(orders: O, clients: C, products: P) -> Self {
        Self {
            orders,
            clients,
            products,
        }
    }

    pub async fn list(
        &self,
        requester: &Requester,
        pagination: Pagination,
    ) -> FirmResult<PaginatedResult<Order>> {
        self.orders.list(requester.scope(), pagination).await
    }

    /// Create an order. The client is required and must be visible to
    /// the requester; the courier and status are optional references.
    pub async fn create(&self, requester: &Requester, draft: OrderDraft) -> FirmResult<Order> {
        let client = self.clients.get_by_id(draft.client_id).await.map_err(|e| {
            match e {
                FirmError::NotFound { .. } => {
                    let mut errors = FieldErrors::new();
                    errors.push("client_id", "client does not exist");
                    FirmError::Validation(errors)
                }
                other => other,
            }
        })?;
        if !requester.may_access(client.created_by) {
            return Err(FirmError::Forbidden {
                reason: "client belongs to another user".into(),
            });
        }

        debug!(client_id = %draft.client_id, "creating order");
        self.orders.create(requester.id, draft).await
    }

    pub async fn get(&self, requester: &Requester, id: Uuid) -> FirmResult<Order> {
        let order = self.orders.get_by_id(id).await?;
        if !requester.may_access(order.created_by) {
            return Err(FirmError::Forbidden {
                reason: "order belongs to another user".into(),
            });
        }
        Ok(order)
    }

    pub async fn update(
        &self,
        requester: &Requester,
        id: Uuid,
        input: UpdateOrder,
    ) -> FirmResult<Order> {
        self.get(requester, id).await?;

        if let Some(client_id) = input.client_id {
            if let Err(FirmError::NotFound { .. }) = self.clients.get_by_id(client_id).await {
                let mut errors = FieldErrors::new();
                errors.push("client_id", "client does not exist");
                return Err(errors.into());
            }
        }

        self.orders.update(id, input).await
    }

    pub async fn delete(&self, requester: &Requester, id: Uuid) -> FirmResult<()> {
        self.get(requester, id).await?;
        debug!(%id, "deleting order");
        self.orders.delete(id).await
    }

    /// Add an item to an order the requester can access. The amount
    /// must be positive and the product must exist.
    pub async fn add_item(
        &self,
        requester: &Requester,
        order_id: Uuid,
        draft: OrderItemDraft,
    ) -> FirmResult<OrderItem> {
        self.get(requester, order_id).await?;

        let mut errors = FieldErrors::new();
        if draft.amount <= 0 {
            errors.push("amount", "must be positive");
        }
        if draft.price_cents < 0 {
            errors.push("price_cents", "must not be negative");
        }
        if errors.is_empty() {
            if let Err(FirmError::NotFound { .. }) =
                self.products.get_by_id(draft.product_id).await
            {
                errors.push("product_id", "product does not exist");
            }
        }
        errors.into_result()?;

        self.orders.add_item(order_id, draft).await
    }

    pub async fn items(&self, requester: &Requester, order_id: Uuid) -> FirmResult<Vec<OrderItem>> {
        self.get(requester, order_id).await?;
        self.orders.items(order_id).await
    }

    pub async fn remove_item(
        &self,
        requester: &Requester,
        order_id: Uuid,
        item_id: Uuid,
    ) -> FirmResult<()> {
        self.get(requester, order_id).await?;
        self.orders.remove_item(order_id, item_id).await
    }
}
