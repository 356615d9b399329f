//! Object-level authorization.
//!
//! Every record that can be read or changed through the API answers one
//! question: which principal authored it. Tasks answer through their parent
//! list, so a task is never reachable by anyone the list is hidden from.

use uuid::Uuid;

use crate::database::models::{List, TaskWithList};
use crate::error::ApiError;
use crate::middleware::Principal;

pub trait Owned {
    /// Principal id that owns this record
    fn owner(&self) -> Uuid;

    /// Short label for logs, e.g. `list 4`
    fn label(&self) -> String;
}

impl Owned for List {
    fn owner(&self) -> Uuid {
        self.author
    }

    fn label(&self) -> String {
        format!("list {}", self.id)
    }
}

impl Owned for TaskWithList {
    fn owner(&self) -> Uuid {
        self.list.author
    }

    fn label(&self) -> String {
        format!("task {} (list {})", self.task.id, self.list.id)
    }
}

pub fn permit<R: Owned>(principal: &Principal, record: &R) -> bool {
    record.owner() == principal.id
}

/// `permit`, surfaced as a Forbidden error
pub fn authorize<R: Owned>(principal: &Principal, record: &R) -> Result<(), ApiError> {
    if permit(principal, record) {
        return Ok(());
    }
    tracing::warn!("Principal {} denied access to {}", principal.id, record.label());
    Err(ApiError::forbidden("You do not have permission to access this resource"))
}
