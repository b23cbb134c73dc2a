//! Shared in-memory port doubles for casting handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::casting::{Choice, Vote, VoteValue};
use crate::domain::foundation::{ChoiceId, DomainError, ErrorCode, EventId, VoterId};
use crate::ports::{ChoiceReader, VoteStore};

/// Vote store double with real upsert-and-aggregate semantics.
pub struct InMemoryVoteStore {
    votes: Mutex<Vec<Vote>>,
    event_index: Mutex<HashMap<ChoiceId, EventId>>,
    fail_cast: bool,
}

impl InMemoryVoteStore {
    pub fn new() -> Self {
        Self {
            votes: Mutex::new(Vec::new()),
            event_index: Mutex::new(HashMap::new()),
            fail_cast: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            votes: Mutex::new(Vec::new()),
            event_index: Mutex::new(HashMap::new()),
            fail_cast: true,
        }
    }

    /// Associates choices with an event so `list_votes_for_event` can filter.
    pub fn index_event(&self, event_id: EventId, choice_ids: &[ChoiceId]) {
        let mut index = self.event_index.lock().unwrap();
        for choice_id in choice_ids {
            index.insert(*choice_id, event_id);
        }
    }

    /// Seeds an existing vote without going through `cast_vote`.
    pub fn seed_vote(&self, vote: Vote) {
        self.votes.lock().unwrap().push(vote);
    }

    pub fn vote_count(&self, choice_id: ChoiceId) -> usize {
        self.votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.choice_id() == choice_id)
            .count()
    }

    /// Sum of current vote values for a choice, as the adapter would keep it.
    pub fn aggregate(&self, choice_id: ChoiceId) -> i32 {
        self.votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.choice_id() == choice_id)
            .map(|v| v.value().value() as i32)
            .sum()
    }
}

#[async_trait]
impl VoteStore for InMemoryVoteStore {
    async fn cast_vote(
        &self,
        choice_id: ChoiceId,
        voter_id: VoterId,
        value: VoteValue,
        justification: Option<String>,
    ) -> Result<Vote, DomainError> {
        if self.fail_cast {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated cast failure",
            ));
        }

        let mut votes = self.votes.lock().unwrap();
        if let Some(existing) = votes
            .iter_mut()
            .find(|v| v.choice_id() == choice_id && v.voter_id() == &voter_id)
        {
            existing.recast(value, justification);
            return Ok(existing.clone());
        }

        let vote = Vote::new(choice_id, voter_id, value, justification);
        votes.push(vote.clone());
        Ok(vote)
    }

    async fn list_votes_for_choice(&self, choice_id: ChoiceId) -> Result<Vec<Vote>, DomainError> {
        let mut votes: Vec<Vote> = self
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.choice_id() == choice_id)
            .cloned()
            .collect();
        votes.sort_by(|a, b| b.cast_at().cmp(&a.cast_at()));
        Ok(votes)
    }

    async fn list_votes_for_event(&self, event_id: EventId) -> Result<Vec<Vote>, DomainError> {
        let index = self.event_index.lock().unwrap();
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| index.get(&v.choice_id()) == Some(&event_id))
            .cloned()
            .collect())
    }
}

/// Choice reader double backed by a fixed list.
pub struct StaticChoiceReader {
    choices: Vec<Choice>,
    fail_reads: bool,
}

impl StaticChoiceReader {
    pub fn empty() -> Self {
        Self {
            choices: Vec::new(),
            fail_reads: false,
        }
    }

    pub fn with_choice(choice: Choice) -> Self {
        Self {
            choices: vec![choice],
            fail_reads: false,
        }
    }

    pub fn with_choices(choices: Vec<Choice>) -> Self {
        Self {
            choices,
            fail_reads: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            choices: Vec::new(),
            fail_reads: true,
        }
    }
}

#[async_trait]
impl ChoiceReader for StaticChoiceReader {
    async fn find_by_event(&self, event_id: EventId) -> Result<Vec<Choice>, DomainError> {
        if self.fail_reads {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated read failure",
            ));
        }
        let mut choices: Vec<Choice> = self
            .choices
            .iter()
            .filter(|c| c.event_id() == event_id)
            .cloned()
            .collect();
        choices.sort_by(|a, b| {
            a.character()
                .title
                .cmp(&b.character().title)
                .then(a.priority().cmp(&b.priority()))
        });
        Ok(choices)
    }

    async fn find_by_id(&self, id: ChoiceId) -> Result<Option<Choice>, DomainError> {
        if self.fail_reads {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated read failure",
            ));
        }
        Ok(self.choices.iter().find(|c| c.id() == id).cloned())
    }
}
