//! Vote entity and the +1/-1 vote value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ChoiceId, Timestamp, ValidationError, VoteId, VoterId};

/// A reviewer's opinion on a choice: for (+1) or against (-1).
///
/// There is no abstain and no magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum VoteValue {
    Against = -1,
    For = 1,
}

impl VoteValue {
    /// Creates a VoteValue from an integer, returning error if not +1 or -1.
    pub fn try_from_i8(value: i8) -> Result<Self, ValidationError> {
        match value {
            -1 => Ok(VoteValue::Against),
            1 => Ok(VoteValue::For),
            _ => Err(ValidationError::out_of_range(
                "vote",
                -1,
                1,
                value as i32,
            )),
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> i8 {
        *self as i8
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            VoteValue::Against => "Against",
            VoteValue::For => "For",
        }
    }

    /// Returns true for an upvote.
    pub fn is_for(&self) -> bool {
        matches!(self, VoteValue::For)
    }
}

impl fmt::Display for VoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.value() > 0 { "+" } else { "" };
        write!(f, "{}{}", sign, self.value())
    }
}

/// One reviewer's vote on one choice.
///
/// At most one Vote exists per (choice, voter) pair; a repeat cast by the
/// same voter mutates the existing row via [`Vote::recast`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    id: VoteId,
    choice_id: ChoiceId,
    voter_id: VoterId,
    value: VoteValue,
    justification: Option<String>,
    cast_at: Timestamp,
}

impl Vote {
    /// Creates a fresh vote for a first-time cast.
    pub fn new(
        choice_id: ChoiceId,
        voter_id: VoterId,
        value: VoteValue,
        justification: Option<String>,
    ) -> Self {
        Self {
            id: VoteId::new(),
            choice_id,
            voter_id,
            value,
            justification,
            cast_at: Timestamp::now(),
        }
    }

    /// Reconstitutes a vote from persistence.
    pub fn reconstitute(
        id: VoteId,
        choice_id: ChoiceId,
        voter_id: VoterId,
        value: VoteValue,
        justification: Option<String>,
        cast_at: Timestamp,
    ) -> Self {
        Self {
            id,
            choice_id,
            voter_id,
            value,
            justification,
            cast_at,
        }
    }

    /// Replaces value and justification in place for a repeat cast.
    ///
    /// The row identity is preserved; only value, justification, and the
    /// cast timestamp change.
    pub fn recast(&mut self, value: VoteValue, justification: Option<String>) {
        self.value = value;
        self.justification = justification;
        self.cast_at = Timestamp::now();
    }

    pub fn id(&self) -> VoteId {
        self.id
    }

    pub fn choice_id(&self) -> ChoiceId {
        self.choice_id
    }

    pub fn voter_id(&self) -> &VoterId {
        &self.voter_id
    }

    pub fn value(&self) -> VoteValue {
        self.value
    }

    pub fn justification(&self) -> Option<&str> {
        self.justification.as_deref()
    }

    pub fn cast_at(&self) -> Timestamp {
        self.cast_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter(name: &str) -> VoterId {
        VoterId::new(name).unwrap()
    }

    #[test]
    fn vote_value_try_from_i8_accepts_valid_values() {
        assert_eq!(VoteValue::try_from_i8(1).unwrap(), VoteValue::For);
        assert_eq!(VoteValue::try_from_i8(-1).unwrap(), VoteValue::Against);
    }

    #[test]
    fn vote_value_try_from_i8_rejects_invalid_values() {
        assert!(VoteValue::try_from_i8(0).is_err());
        assert!(VoteValue::try_from_i8(2).is_err());
        assert!(VoteValue::try_from_i8(-2).is_err());
        assert!(VoteValue::try_from_i8(10).is_err());
    }

    #[test]
    fn vote_value_returns_correct_integer() {
        assert_eq!(VoteValue::For.value(), 1);
        assert_eq!(VoteValue::Against.value(), -1);
    }

    #[test]
    fn vote_value_label_returns_display_text() {
        assert_eq!(VoteValue::For.label(), "For");
        assert_eq!(VoteValue::Against.label(), "Against");
    }

    #[test]
    fn vote_value_displays_with_sign() {
        assert_eq!(format!("{}", VoteValue::For), "+1");
        assert_eq!(format!("{}", VoteValue::Against), "-1");
    }

    #[test]
    fn new_vote_carries_given_fields() {
        let choice_id = ChoiceId::new();
        let vote = Vote::new(
            choice_id,
            voter("reviewer-1"),
            VoteValue::For,
            Some("Strong fit".to_string()),
        );

        assert_eq!(vote.choice_id(), choice_id);
        assert_eq!(vote.voter_id().as_str(), "reviewer-1");
        assert_eq!(vote.value(), VoteValue::For);
        assert_eq!(vote.justification(), Some("Strong fit"));
    }

    #[test]
    fn recast_replaces_value_and_justification() {
        let mut vote = Vote::new(
            ChoiceId::new(),
            voter("reviewer-1"),
            VoteValue::For,
            Some("Looked good".to_string()),
        );
        let id = vote.id();

        vote.recast(VoteValue::Against, None);

        assert_eq!(vote.id(), id);
        assert_eq!(vote.value(), VoteValue::Against);
        assert_eq!(vote.justification(), None);
    }

    #[test]
    fn recast_advances_timestamp() {
        let mut vote = Vote::new(ChoiceId::new(), voter("reviewer-1"), VoteValue::For, None);
        let first_cast = vote.cast_at();

        vote.recast(VoteValue::For, None);

        assert!(!vote.cast_at().is_before(&first_cast));
    }

    #[test]
    fn reconstitute_preserves_all_fields() {
        let id = VoteId::new();
        let choice_id = ChoiceId::new();
        let cast_at = Timestamp::now();

        let vote = Vote::reconstitute(
            id,
            choice_id,
            voter("reviewer-2"),
            VoteValue::Against,
            Some("Does not match".to_string()),
            cast_at,
        );

        assert_eq!(vote.id(), id);
        assert_eq!(vote.choice_id(), choice_id);
        assert_eq!(vote.value(), VoteValue::Against);
        assert_eq!(vote.cast_at(), cast_at);
    }

    #[test]
    fn vote_value_serializes_as_variant_name() {
        let json = serde_json::to_string(&VoteValue::For).unwrap();
        assert_eq!(json, "\"For\"");
    }
}
