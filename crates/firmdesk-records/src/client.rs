//! Client record service — validation, access policy, CRUD.
//!
//! Email uniqueness is checked in two phases: an application-level
//! lookup that produces a friendly field error, backed by the storage
//! UNIQUE index which rejects the second writer in a race.

use firmdesk_core::error::{FirmError, FirmResult};
use firmdesk_core::models::client::{Client, ClientDraft};
use firmdesk_core::repository::{ClientRepository, PaginatedResult, Pagination};
use firmdesk_core::validation::{FieldErrors, check_email, check_name};
use firmdesk_core::Requester;
use tracing::debug;
use uuid::Uuid;

fn validate_draft(draft: &ClientDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_name(&mut errors, "surname", &draft.surname);
    check_name(&mut errors, "name", &draft.name);
    check_email(&mut errors, "email", &draft.email);
    errors
}

pub struct ClientService<R: ClientRepository> {
    repo: R,
}

impl<R: ClientRepository> ClientService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List clients visible to the requester.
    pub async fn list(
        &self,
        requester: &Requester,
        pagination: Pagination,
    ) -> FirmResult<PaginatedResult<Client>> {
        self.repo.list(requester.scope(), pagination).await
    }

    /// All clients visible to the requester, for the export renderers.
    pub async fn list_for_export(&self, requester: &Requester) -> FirmResult<Vec<Client>> {
        self.repo.list_all(requester.scope()).await
    }

    pub async fn create(&self, requester: &Requester, draft: ClientDraft) -> FirmResult<Client> {
        let mut errors = validate_draft(&draft);
        if errors.is_empty() {
            // Friendly duplicate message before the index backstop.
            match self.repo.get_by_email(&draft.email).await {
                Ok(_) => errors.push("email", "a client with this e-mail already exists"),
                Err(FirmError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        errors.into_result()?;

        debug!(email = %draft.email, "creating client");
        self.repo.create(requester.id, draft).await
    }

    pub async fn get(&self, requester: &Requester, id: Uuid) -> FirmResult<Client> {
        let client = self.repo.get_by_id(id).await?;
        if !requester.may_access(client.created_by) {
            return Err(FirmError::Forbidden {
                reason: "client belongs to another user".into(),
            });
        }
        Ok(client)
    }

    pub async fn update(
        &self,
        requester: &Requester,
        id: Uuid,
        draft: ClientDraft,
    ) -> FirmResult<Client> {
        let existing = self.get(requester, id).await?;

        let mut errors = validate_draft(&draft);
        if errors.is_empty() && draft.email != existing.email {
            match self.repo.get_by_email(&draft.email).await {
                Ok(_) => errors.push("email", "a client with this e-mail already exists"),
                Err(FirmError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        errors.into_result()?;

        self.repo.update(id, draft).await
    }

    pub async fn delete(&self, requester: &Requester, id: Uuid) -> FirmResult<()> {
        // Ownership check before the cascade.
        self.get(requester, id).await?;
        debug!(%id, "deleting client");
        self.repo.delete(id).await
    }
}
