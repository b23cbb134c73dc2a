//! Match board read model: a cohort's choices grouped by character with
//! vote breakdowns, for organizer review.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::casting::{Choice, Priority, ScoreCalculator, Vote};
use crate::domain::foundation::{ApplicantId, CharacterId, ChoiceId, Timestamp, VoterId};

/// Vote counts for one choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub upvotes: usize,
    pub downvotes: usize,
    /// Net total, equal to the choice's stored aggregate.
    pub total: i32,
}

impl VoteTally {
    fn from_votes(votes: &[&Vote]) -> Self {
        let upvotes = votes.iter().filter(|v| v.value().is_for()).count();
        let downvotes = votes.len() - upvotes;
        let total = votes.iter().map(|v| v.value().value() as i32).sum();
        Self {
            upvotes,
            downvotes,
            total,
        }
    }
}

/// One reviewer's vote as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteDetail {
    pub voter_id: VoterId,
    pub value: i8,
    pub justification: Option<String>,
    pub cast_at: Timestamp,
}

impl From<&Vote> for VoteDetail {
    fn from(vote: &Vote) -> Self {
        Self {
            voter_id: vote.voter_id().clone(),
            value: vote.value().value(),
            justification: vote.justification().map(str::to_string),
            cast_at: vote.cast_at(),
        }
    }
}

/// One choice under a character heading, with its vote breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceMatchEntry {
    pub choice_id: ChoiceId,
    pub applicant_id: ApplicantId,
    pub applicant_name: String,
    pub priority: Priority,
    /// The score the allocation engine will sort this choice by.
    pub score: i32,
    pub tally: VoteTally,
    /// Full per-voter detail, newest cast first.
    pub votes: Vec<VoteDetail>,
    /// The requesting organizer's own existing vote, if any.
    pub own_vote: Option<VoteDetail>,
}

/// All choices targeting one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterMatchGroup {
    pub character_id: CharacterId,
    pub character_title: String,
    pub choices: Vec<ChoiceMatchEntry>,
}

/// Builder for the organizer-facing match board.
///
/// Pure grouping and counting over data the vote ledger already produced;
/// no allocation decision is made here.
pub struct MatchBoard;

impl MatchBoard {
    /// Groups a cohort's choices by character with vote statistics.
    ///
    /// Groups are ordered by character title; choices within a group by
    /// score descending with the allocation engine's tie-break. When
    /// `requesting_voter` is given, each entry carries that voter's own
    /// vote so the board can preselect it.
    pub fn build(
        choices: &[Choice],
        votes: &[Vote],
        requesting_voter: Option<&VoterId>,
    ) -> Vec<CharacterMatchGroup> {
        let mut votes_by_choice: HashMap<ChoiceId, Vec<&Vote>> = HashMap::new();
        for vote in votes {
            votes_by_choice.entry(vote.choice_id()).or_default().push(vote);
        }
        for choice_votes in votes_by_choice.values_mut() {
            choice_votes.sort_by(|a, b| {
                b.cast_at()
                    .cmp(&a.cast_at())
                    .then_with(|| a.voter_id().as_str().cmp(b.voter_id().as_str()))
            });
        }

        let mut groups: HashMap<CharacterId, CharacterMatchGroup> = HashMap::new();
        for choice in choices {
            let choice_votes = votes_by_choice
                .get(&choice.id())
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let own_vote = requesting_voter.and_then(|voter| {
                choice_votes
                    .iter()
                    .find(|v| v.voter_id() == voter)
                    .map(|v| VoteDetail::from(*v))
            });

            let entry = ChoiceMatchEntry {
                choice_id: choice.id(),
                applicant_id: choice.applicant().id,
                applicant_name: choice.applicant().name.clone(),
                priority: choice.priority(),
                score: ScoreCalculator::score_choice(choice),
                tally: VoteTally::from_votes(choice_votes),
                votes: choice_votes.iter().map(|v| VoteDetail::from(*v)).collect(),
                own_vote,
            };

            groups
                .entry(choice.character().id)
                .or_insert_with(|| CharacterMatchGroup {
                    character_id: choice.character().id,
                    character_title: choice.character().title.clone(),
                    choices: Vec::new(),
                })
                .choices
                .push(entry);
        }

        let mut board: Vec<CharacterMatchGroup> = groups.into_values().collect();
        for group in &mut board {
            group.choices.sort_by(|a, b| {
                b.score
                    .cmp(&a.score)
                    .then(a.priority.cmp(&b.priority))
                    .then(a.choice_id.cmp(&b.choice_id))
            });
        }
        board.sort_by(|a, b| {
            a.character_title
                .cmp(&b.character_title)
                .then(a.character_id.cmp(&b.character_id))
        });

        board
    }
}
