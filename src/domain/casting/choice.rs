//! Choice entity - one applicant's ranked request to play a character.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    ApplicantId, CharacterId, ChoiceId, EventId, Timestamp, ValidationError,
};

/// Stated preference rank, 1 (most preferred) through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a Priority, returning error if outside [1, 5].
    pub fn new(rank: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&rank) {
            return Err(ValidationError::out_of_range(
                "priority",
                Self::MIN as i32,
                Self::MAX as i32,
                rank as i32,
            ));
        }
        Ok(Self(rank))
    }

    /// Returns the numeric rank.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns true for the most preferred rank.
    pub fn is_first(&self) -> bool {
        self.0 == Self::MIN
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Applicant as resolved onto a choice: id plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRef {
    pub id: ApplicantId,
    pub name: String,
}

/// Character as resolved onto a choice: id plus title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRef {
    pub id: CharacterId,
    pub title: String,
}

/// One applicant's ranked request to play a specific character.
///
/// Carries the denormalized `votes` aggregate, which persistence keeps equal
/// to the sum of current vote values for this choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    id: ChoiceId,
    event_id: EventId,
    applicant: ApplicantRef,
    character: CharacterRef,
    priority: Priority,
    votes: i32,
    created_at: Timestamp,
}

impl Choice {
    /// Creates a fresh choice with a zero vote aggregate.
    pub fn new(
        event_id: EventId,
        applicant: ApplicantRef,
        character: CharacterRef,
        priority: Priority,
    ) -> Self {
        Self {
            id: ChoiceId::new(),
            event_id,
            applicant,
            character,
            priority,
            votes: 0,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitutes a choice from persistence.
    pub fn reconstitute(
        id: ChoiceId,
        event_id: EventId,
        applicant: ApplicantRef,
        character: CharacterRef,
        priority: Priority,
        votes: i32,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            event_id,
            applicant,
            character,
            priority,
            votes,
            created_at,
        }
    }

    pub fn id(&self) -> ChoiceId {
        self.id
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn applicant(&self) -> &ApplicantRef {
        &self.applicant
    }

    pub fn character(&self) -> &CharacterRef {
        &self.character
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Current vote aggregate: sum of all vote values for this choice.
    pub fn votes(&self) -> i32 {
        self.votes
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
