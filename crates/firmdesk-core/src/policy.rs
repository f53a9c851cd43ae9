//! Row-level access policy.
//!
//! One consolidated role check decides everything: admins see and touch
//! all records of a type, regular users only the records they created.
//! The requester identity is always passed explicitly into service and
//! repository calls; there is no ambient current-user state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::Role;

/// The authenticated identity a request acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub id: Uuid,
    pub role: Role,
}

/// Row filter derived from a requester's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    /// No creator filter (admin).
    All,
    /// Only rows created by the given user.
    CreatedBy(Uuid),
}

impl Requester {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    /// The list/export filter this requester is entitled to.
    pub fn scope(&self) -> RecordScope {
        match self.role {
            Role::Admin => RecordScope::All,
            Role::User => RecordScope::CreatedBy(self.id),
        }
    }

    /// Whether this requester may view/update/delete a record created
    /// by `created_by`.
    pub fn may_access(&self, created_by: Uuid) -> bool {
        self.role == Role::Admin || self.id == created_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_scope_is_unfiltered() {
        let admin = Requester::new(Uuid::new_v4(), Role::Admin);
        assert_eq!(admin.scope(), RecordScope::All);
        assert!(admin.may_access(Uuid::new_v4()));
    }

    #[test]
    fn user_scope_is_own_records_only() {
        let user = Requester::new(Uuid::new_v4(), Role::User);
        assert_eq!(user.scope(), RecordScope::CreatedBy(user.id));
        assert!(user.may_access(user.id));
        assert!(!user.may_access(Uuid::new_v4()));
    }
}
