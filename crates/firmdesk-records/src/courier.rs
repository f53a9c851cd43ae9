//! Courier record service. Same rules as [`crate::client`].

use firmdesk_core::error::{FirmError, FirmResult};
use firmdesk_core::models::courier::{Courier, CourierDraft};
use firmdesk_core::repository::{CourierRepository, PaginatedResult, Pagination};
use firmdesk_core::validation::{FieldErrors, check_email, check_name};
use firmdesk_core::Requester;
use tracing::debug;
use uuid::Uuid;

fn validate_draft(draft: &CourierDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_name(&mut errors, "surname", &draft.surname);
    check_name(&mut errors, "name", &draft.name);
    check_email(&mut errors, "email", &draft.email);
    errors
}

pub struct CourierService<R: CourierRepository> {
    repo: R,
}

impl<R: CourierRepository> CourierService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        requester: &Requester,
        pagination: Pagination,
    ) -> FirmResult<PaginatedResult<Courier>> {
        self.repo.list(requester.scope(), pagination).await
    }

    pub async fn create(&self, requester: &Requester, draft: CourierDraft) -> FirmResult<Courier> {
        let mut errors = validate_draft(&draft);
        if errors.is_empty() {
            match self.repo.get_by_email(&draft.email).await {
                Ok(_) => errors.push("email", "a courier with this e-mail already exists"),
                Err(FirmError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        errors.into_result()?;

        debug!(email = %draft.email, "creating courier");
        self.repo.create(requester.id, draft).await
    }

    pub async fn get(&self, requester: &Requester, id: Uuid) -> FirmResult<Courier> {
        let courier = self.repo.get_by_id(id).await?;
        if !requester.may_access(courier.created_by) {
            return Err(FirmError::Forbidden {
                reason: "courier belongs to another user".into(),
            });
        }
        Ok(courier)
    }

    pub async fn update(
        &self,
        requester: &Requester,
        id: Uuid,
        draft: CourierDraft,
    ) -> FirmResult<Courier> {
        let existing = self.get(requester, id).await?;

        let mut errors = validate_draft(&draft);
        if errors.is_empty() && draft.email != existing.email {
            match self.repo.get_by_email(&draft.email).await {
                Ok(_) => errors.push("email", "a courier with this e-mail already exists"),
                Err(FirmError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        errors.into_result()?;

        self.repo.update(id, draft).await
    }

    pub async fn delete(&self, requester: &Requester, id: Uuid) -> FirmResult<()> {
        self.get(requester, id).await?;
        debug!(%id, "deleting courier");
        self.repo.delete(id).await
    }
}
