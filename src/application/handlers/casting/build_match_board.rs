//! BuildMatchBoardHandler - Query handler for the organizer match board.

use std::sync::Arc;

use crate::domain::casting::{CharacterMatchGroup, MatchBoard};
use crate::domain::foundation::{DomainError, EventId, VoterId};
use crate::ports::{ChoiceReader, VoteStore};

/// Query for one event's match board.
#[derive(Debug, Clone)]
pub struct BuildMatchBoardQuery {
    pub event_id: EventId,
    /// Organizer viewing the board; their own votes get attached.
    pub requesting_voter: Option<VoterId>,
}

/// Error type for match board construction.
#[derive(Debug, Clone)]
pub enum BuildMatchBoardError {
    /// Domain error while loading choices or votes.
    Domain(DomainError),
}

impl std::fmt::Display for BuildMatchBoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildMatchBoardError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for BuildMatchBoardError {}

impl From<DomainError> for BuildMatchBoardError {
    fn from(err: DomainError) -> Self {
        BuildMatchBoardError::Domain(err)
    }
}

/// Handler assembling the match board for one event.
pub struct BuildMatchBoardHandler {
    choice_reader: Arc<dyn ChoiceReader>,
    vote_store: Arc<dyn VoteStore>,
}

impl BuildMatchBoardHandler {
    pub fn new(choice_reader: Arc<dyn ChoiceReader>, vote_store: Arc<dyn VoteStore>) -> Self {
        Self {
            choice_reader,
            vote_store,
        }
    }

    pub async fn handle(
        &self,
        query: BuildMatchBoardQuery,
    ) -> Result<Vec<CharacterMatchGroup>, BuildMatchBoardError> {
        let choices = self.choice_reader.find_by_event(query.event_id).await?;
        let votes = self.vote_store.list_votes_for_event(query.event_id).await?;

        Ok(MatchBoard::build(
            &choices,
            &votes,
            query.requesting_voter.as_ref(),
        ))
    }
}
