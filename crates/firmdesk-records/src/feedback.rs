//! Feedback record service.

use firmdesk_core::error::{FirmError, FirmResult};
use firmdesk_core::models::feedback::{Feedback, FeedbackDraft, UpdateFeedback};
use firmdesk_core::repository::{
    ClientRepository, FeedbackRepository, OrderRepository, PaginatedResult, Pagination,
};
use firmdesk_core::validation::FieldErrors;
use firmdesk_core::Requester;
use uuid::Uuid;

fn check_rating(errors: &mut FieldErrors, rating: u32) {
    if !(1..=5).contains(&rating) {
        errors.push("rating", "must be between 1 and 5");
    }
}

pub struct FeedbackService<F, O, C>
where
    F: FeedbackRepository,
    O: OrderRepository,
    C: ClientRepository,
{
    feedback: F,
    orders: O,
    clients: C,
}

impl<F, O, C> FeedbackService<F, O, C>
where
    F: FeedbackRepository,
    O: OrderRepository,
    C: ClientRepository,
{
    pub fn new(feedback: F, orders: O, clients: C) -> Self {
        Self {
            feedback,
            orders,
            clients,
        }
    }

    pub async fn list(
        &self,
        requester: &Requester,
        pagination: Pagination,
    ) -> FirmResult<PaginatedResult<Feedback>> {
        self.feedback.list(requester.scope(), pagination).await
    }

    pub async fn create(
        &self,
        requester: &Requester,
        draft: FeedbackDraft,
    ) -> FirmResult<Feedback> {
        let mut errors = FieldErrors::new();
        check_rating(&mut errors, draft.rating);
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

        self.feedback.create(requester.id, draft).await
    }

    pub async fn get(&self, requester: &Requester, id: Uuid) -> FirmResult<Feedback> {
        let feedback = self.feedback.get_by_id(id).await?;
        if !requester.may_access(feedback.created_by) {
            return Err(FirmError::Forbidden {
                reason: "feedback belongs to another user".into(),
            });
        }
        Ok(feedback)
    }

    pub async fn update(
        &self,
        requester: &Requester,
        id: Uuid,
        input: UpdateFeedback,
    ) -> FirmResult<Feedback> {
        self.get(requester, id).await?;

        if let Some(rating) = input.rating {
            let mut errors = FieldErrors::new();
            check_rating(&mut errors, rating);
            errors.into_result()?;
        }

        self.feedback.update(id, input).await
    }

    pub async fn delete(&self, requester: &Requester, id: Uuid) -> FirmResult<()> {
        self.get(requester, id).await?;
        self.feedback.delete(id).await
    }
}
