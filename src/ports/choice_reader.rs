//! Choice reader port (read side).
//!
//! Fetches choices with their applicant and character already resolved, so
//! the allocation engine and match board never chase references themselves.

use async_trait::async_trait;

use crate::domain::casting::Choice;
use crate::domain::foundation::{ChoiceId, DomainError, EventId};

/// Read port for casting choices.
#[async_trait]
pub trait ChoiceReader: Send + Sync {
    /// Fetches one cohort: all choices for an event, applicant and
    /// character resolved, ordered by character title then priority.
    async fn find_by_event(&self, event_id: EventId) -> Result<Vec<Choice>, DomainError>;

    /// Fetches a single choice by id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: ChoiceId) -> Result<Option<Choice>, DomainError>;
}
