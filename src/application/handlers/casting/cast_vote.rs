//! CastVoteHandler - Command handler for casting a vote on a choice.

use std::sync::Arc;

use crate::domain::casting::{Vote, VoteValue};
use crate::domain::foundation::{ChoiceId, DomainError, ValidationError, VoterId};
use crate::ports::{ChoiceReader, VoteStore};

/// Command to cast (or re-cast) a vote on a choice.
#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    /// The choice being voted on.
    pub choice_id: ChoiceId,
    /// The reviewer casting the vote.
    pub voter_id: VoterId,
    /// Raw vote value; only +1 and -1 are accepted.
    pub value: i8,
    /// Optional free-text justification.
    pub justification: Option<String>,
}

/// Result of a successful cast.
#[derive(Debug, Clone)]
pub struct CastVoteResult {
    /// The vote row after the cast (new or updated in place).
    pub vote: Vote,
}

/// Error type for vote casting.
#[derive(Debug, Clone)]
pub enum CastVoteError {
    /// Vote value outside {+1, -1}; nothing was written.
    InvalidVoteValue(ValidationError),
    /// Choice does not exist.
    ChoiceNotFound(ChoiceId),
    /// Domain error from the ledger.
    Domain(DomainError),
}

impl std::fmt::Display for CastVoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CastVoteError::InvalidVoteValue(err) => write!(f, "Invalid vote value: {}", err),
            CastVoteError::ChoiceNotFound(id) => write!(f, "Choice not found: {}", id),
            CastVoteError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CastVoteError {}

impl From<DomainError> for CastVoteError {
    fn from(err: DomainError) -> Self {
        CastVoteError::Domain(err)
    }
}

/// Handler for casting votes.
pub struct CastVoteHandler {
    vote_store: Arc<dyn VoteStore>,
    choice_reader: Arc<dyn ChoiceReader>,
}

impl CastVoteHandler {
    pub fn new(vote_store: Arc<dyn VoteStore>, choice_reader: Arc<dyn ChoiceReader>) -> Self {
        Self {
            vote_store,
            choice_reader,
        }
    }

    pub async fn handle(&self, cmd: CastVoteCommand) -> Result<CastVoteResult, CastVoteError> {
        // 1. Validate the raw value before touching storage
        let value = VoteValue::try_from_i8(cmd.value).map_err(CastVoteError::InvalidVoteValue)?;

        // 2. Blank justifications are stored as absent
        let justification = cmd
            .justification
            .map(|j| j.trim().to_string())
            .filter(|j| !j.is_empty());

        // 3. Verify the choice exists
        if self.choice_reader.find_by_id(cmd.choice_id).await?.is_none() {
            return Err(CastVoteError::ChoiceNotFound(cmd.choice_id));
        }

        // 4. Upsert; the store recomputes the aggregate in the same
        //    transaction as the write
        let vote = self
            .vote_store
            .cast_vote(cmd.choice_id, cmd.voter_id, value, justification)
            .await?;

        Ok(CastVoteResult { vote })
    }
}
