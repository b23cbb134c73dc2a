//! ComputeAllocationHandler - Query handler for the advisory allocation.

use std::sync::Arc;

use crate::domain::casting::{AllocationEngine, AllocationOutcome};
use crate::domain::foundation::{DomainError, EventId};
use crate::ports::ChoiceReader;

/// Query for one event's allocation.
#[derive(Debug, Clone)]
pub struct ComputeAllocationQuery {
    pub event_id: EventId,
}

/// Error type for allocation computation.
#[derive(Debug, Clone)]
pub enum ComputeAllocationError {
    /// Domain error while loading the cohort.
    Domain(DomainError),
}

impl std::fmt::Display for ComputeAllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComputeAllocationError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ComputeAllocationError {}

impl From<DomainError> for ComputeAllocationError {
    fn from(err: DomainError) -> Self {
        ComputeAllocationError::Domain(err)
    }
}

/// Handler computing the advisory allocation for one event.
///
/// Read-only: it takes a snapshot of choice state at call time and never
/// persists the result. Two calls bracketing a vote cast may legitimately
/// differ; acceptance is a separate, external step.
pub struct ComputeAllocationHandler {
    choice_reader: Arc<dyn ChoiceReader>,
}

impl ComputeAllocationHandler {
    pub fn new(choice_reader: Arc<dyn ChoiceReader>) -> Self {
        Self { choice_reader }
    }

    pub async fn handle(
        &self,
        query: ComputeAllocationQuery,
    ) -> Result<AllocationOutcome, ComputeAllocationError> {
        let choices = self.choice_reader.find_by_event(query.event_id).await?;
        Ok(AllocationEngine::allocate(&choices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::casting::test_support::StaticChoiceReader;
    use crate::domain::casting::{ApplicantRef, CharacterRef, Choice, Priority};
    use crate::domain::foundation::{ApplicantId, CharacterId, ChoiceId, Timestamp};
    use uuid::Uuid;

    fn cohort_choice(
        event_id: EventId,
        applicant_name: &str,
        character_title: &str,
        priority: u8,
        votes: i32,
    ) -> Choice {
        Choice::reconstitute(
            ChoiceId::from_uuid(Uuid::new_v4()),
            event_id,
            ApplicantRef {
                id: ApplicantId::new(),
                name: applicant_name.to_string(),
            },
            CharacterRef {
                id: CharacterId::new(),
                title: character_title.to_string(),
            },
            Priority::new(priority).unwrap(),
            votes,
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn allocates_loaded_cohort() {
        let event_id = EventId::new();
        let reader = Arc::new(StaticChoiceReader::with_choices(vec![
            cohort_choice(event_id, "A", "Aria", 1, 2),
            cohort_choice(event_id, "B", "Rex", 2, 1),
        ]));

        let handler = ComputeAllocationHandler::new(reader);
        let outcome = handler
            .handle(ComputeAllocationQuery { event_id })
            .await
            .unwrap();

        assert_eq!(outcome.assigned.len(), 2);
        assert!(outcome.left_out.is_empty());
    }

    #[tokio::test]
    async fn empty_event_yields_empty_outcome() {
        let handler = ComputeAllocationHandler::new(Arc::new(StaticChoiceReader::empty()));
        let outcome = handler
            .handle(ComputeAllocationQuery {
                event_id: EventId::new(),
            })
            .await
            .unwrap();

        assert!(outcome.assigned.is_empty());
        assert!(outcome.left_out.is_empty());
    }

    #[tokio::test]
    async fn ignores_choices_from_other_events() {
        let event_id = EventId::new();
        let other_event = EventId::new();
        let reader = Arc::new(StaticChoiceReader::with_choices(vec![
            cohort_choice(event_id, "A", "Aria", 1, 2),
            cohort_choice(other_event, "B", "Rex", 1, 9),
        ]));

        let handler = ComputeAllocationHandler::new(reader);
        let outcome = handler
            .handle(ComputeAllocationQuery { event_id })
            .await
            .unwrap();

        assert_eq!(outcome.assigned.len(), 1);
        assert_eq!(outcome.assigned[0].character_title, "Aria");
    }

    #[tokio::test]
    async fn propagates_read_failures() {
        let handler = ComputeAllocationHandler::new(Arc::new(StaticChoiceReader::failing()));
        let result = handler
            .handle(ComputeAllocationQuery {
                event_id: EventId::new(),
            })
            .await;

        assert!(matches!(result, Err(ComputeAllocationError::Domain(_))));
    }
}
