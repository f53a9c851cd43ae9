//! Status dictionary service (order and payment statuses).

use firmdesk_core::error::FirmResult;
use firmdesk_core::models::status::{Status, StatusKind};
use firmdesk_core::repository::StatusRepository;
use firmdesk_core::validation::FieldErrors;
use uuid::Uuid;

pub struct StatusService<R: StatusRepository> {
    repo: R,
}

impl<R: StatusRepository> StatusService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create(&self, kind: StatusKind, name: &str) -> FirmResult<Status> {
        let mut errors = FieldErrors::new();
        if name.trim().is_empty() {
            errors.push("name", "must not be empty");
        }
        errors.into_result()?;

        self.repo.create(kind, name).await
    }

    pub async fn list(&self, kind: StatusKind) -> FirmResult<Vec<Status>> {
        self.repo.list(kind).await
    }

    /// Removes the status; referencing orders/payments are nullified.
    pub async fn delete(&self, kind: StatusKind, id: Uuid) -> FirmResult<()> {
        self.repo.delete(kind, id).await
    }
}
