//! Vote store port (write side of the vote ledger).
//!
//! Defines the contract for casting votes and reading the ledger back.
//! Implementations own the atomicity of the cast: the vote upsert and the
//! recomputation of the choice's aggregate must happen in one transactional
//! unit keyed by `(choice_id, voter_id)`.

use async_trait::async_trait;

use crate::domain::casting::{Vote, VoteValue};
use crate::domain::foundation::{ChoiceId, DomainError, EventId, VoterId};

/// Port for the vote ledger.
///
/// Implementations must ensure:
/// - At most one vote row per `(choice, voter)`; repeat casts update in place
/// - The choice's `votes` aggregate equals the sum of current vote values at
///   commit time, never recomputed from a stale snapshot
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Upserts a voter's vote on a choice and recomputes the aggregate.
    ///
    /// # Errors
    ///
    /// - `ChoiceNotFound` if the choice does not exist
    /// - `ConcurrentVoteConflict` if a write-write race could not be
    ///   resolved after one retry
    /// - `DatabaseError` on persistence failure
    async fn cast_vote(
        &self,
        choice_id: ChoiceId,
        voter_id: VoterId,
        value: VoteValue,
        justification: Option<String>,
    ) -> Result<Vote, DomainError>;

    /// Lists all votes for a choice, newest cast first.
    async fn list_votes_for_choice(&self, choice_id: ChoiceId) -> Result<Vec<Vote>, DomainError>;

    /// Lists all votes across an event's choices, for the match board.
    async fn list_votes_for_event(&self, event_id: EventId) -> Result<Vec<Vote>, DomainError>;
}
