//! ListVotesHandler - Query handler for a choice's vote audit trail.

use std::sync::Arc;

use crate::domain::casting::Vote;
use crate::domain::foundation::{ChoiceId, DomainError};
use crate::ports::{ChoiceReader, VoteStore};

/// Query for one choice's votes.
#[derive(Debug, Clone)]
pub struct ListVotesQuery {
    pub choice_id: ChoiceId,
}

/// Error type for the vote listing.
#[derive(Debug, Clone)]
pub enum ListVotesError {
    /// Choice does not exist.
    ChoiceNotFound(ChoiceId),
    /// Domain error from the ledger.
    Domain(DomainError),
}

impl std::fmt::Display for ListVotesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListVotesError::ChoiceNotFound(id) => write!(f, "Choice not found: {}", id),
            ListVotesError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ListVotesError {}

impl From<DomainError> for ListVotesError {
    fn from(err: DomainError) -> Self {
        ListVotesError::Domain(err)
    }
}

/// Handler for the vote audit/detail view.
pub struct ListVotesHandler {
    vote_store: Arc<dyn VoteStore>,
    choice_reader: Arc<dyn ChoiceReader>,
}

impl ListVotesHandler {
    pub fn new(vote_store: Arc<dyn VoteStore>, choice_reader: Arc<dyn ChoiceReader>) -> Self {
        Self {
            vote_store,
            choice_reader,
        }
    }

    /// Returns the choice's votes, newest cast first.
    pub async fn handle(&self, query: ListVotesQuery) -> Result<Vec<Vote>, ListVotesError> {
        if self
            .choice_reader
            .find_by_id(query.choice_id)
            .await?
            .is_none()
        {
            return Err(ListVotesError::ChoiceNotFound(query.choice_id));
        }

        Ok(self.vote_store.list_votes_for_choice(query.choice_id).await?)
    }
}
