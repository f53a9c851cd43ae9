//! Payment record service.

use firmdesk_core::error::{FirmError, FirmResult};
use firmdesk_core::models::payment::{Payment, PaymentDraft, UpdatePayment};
use firmdesk_core::repository::{
    ClientRepository, OrderRepository, PaginatedResult, Pagination, PaymentRepository,
};
use firmdesk_core::validation::FieldErrors;
use firmdesk_core::Requester;
use tracing::debug;
use uuid::Uuid;

pub struct PaymentService<P, O, C>
where
    P: PaymentRepository,
    O: OrderRepository,
    C: ClientRepository,
{
    payments: P,
    orders: O,
    clients: C,
}

impl<P, O, C> PaymentService<P, O, C>
where
    P: PaymentRepository,
    O: OrderRepository,
    C: ClientRepository,
{
    pub fn new(payments: P, orders: O, clients: C) -> Self {
        Self {
            payments,
            orders,
            clients,
        }
    }

    pub async fn list(
        &self,
        requester: &Requester,
        pagination: Pagination,
    ) -> FirmResult<PaginatedResult<Payment>> {
        self.payments.list(requester.scope(), pagination).await
    }

    pub async fn create(&self, requester: &Requester, draft: PaymentDraft) -> FirmResult<Payment> {
        let mut errors = FieldErrors::new();
        if draft.amount_cents <= 0 {
            errors.push("amount_cents", "must be positive");
        }
        if errors.is_empty() {
            if let Err(FirmError::NotFound { .. }) = self.orders.get_by_id(draft.order_id).await {
                errors.push("order_id", "order does not exist");
            }
            if let Err(FirmError::NotFound { .. }) = self.clients.get_by_id(draft.client_id).await
            {
                errors.push("client_id", "client does not exist");
            }
        }
        errors.into_result()?;

        debug!(order_id = %draft.order_id, "creating payment");
        self.payments.create(requester.id, draft).await
    }

    pub async fn get(&self, requester: &Requester, id: Uuid) -> FirmResult<Payment> {
        let payment = self.payments.get_by_id(id).await?;
        if !requester.may_access(payment.created_by) {
            return Err(FirmError::Forbidden {
                reason: "payment belongs to another user".into(),
            });
        }
        Ok(payment)
    }

    pub async fn update(
        &self,
        requester: &Requester,
        id: Uuid,
        input: UpdatePayment,
    ) -> FirmResult<Payment> {
        self.get(requester, id).await?;

        if let Some(amount_cents) = input.amount_cents {
            if amount_cents <= 0 {
                let mut errors = FieldErrors::new();
                errors.push("amount_cents", "must be positive");
                return Err(errors.into());
            }
        }

        self.payments.update(id, input).await
    }

    pub async fn delete(&self, requester: &Requester, id: Uuid) -> FirmResult<()> {
        self.get(requester, id).await?;
        self.payments.delete(id).await
    }
}
