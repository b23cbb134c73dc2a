//! Greedy allocation of characters to applicants from scored choices.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::casting::{Choice, Priority, ScoreCalculator};
use crate::domain::foundation::{ApplicantId, CharacterId};

/// One proposed (applicant, character) pairing.
///
/// Advisory and ephemeral: recomputed on demand from current choice/vote
/// state, never persisted by this engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub applicant_id: ApplicantId,
    pub applicant_name: String,
    pub character_id: CharacterId,
    pub character_title: String,
    pub score: i32,
    pub priority: Priority,
    pub vote_score: i32,
}

/// Applicant who submitted choices but received no character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeftOutApplicant {
    pub applicant_id: ApplicantId,
    pub applicant_name: String,
}

/// Result of one allocation pass over a cohort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationOutcome {
    /// Proposed pairings, ordered by character title for display.
    pub assigned: Vec<Allocation>,
    /// Applicants with at least one choice but no pairing, ordered by name.
    pub left_out: Vec<LeftOutApplicant>,
}

/// Single-pass greedy allocator.
///
/// Not a maximum-weight matching; a skipped choice is never revisited.
pub struct AllocationEngine;

impl AllocationEngine {
    /// Computes a conflict-free allocation for one cohort of choices.
    ///
    /// # Algorithm
    /// 1. Score every choice.
    /// 2. Sort by score descending; ties by priority ascending, then
    ///    choice id ascending, giving a total deterministic order.
    /// 3. Walk once: commit a pairing iff both its character and its
    ///    applicant are still free; otherwise skip permanently.
    ///
    /// Each character id and each applicant id appears at most once in the
    /// output. The assigned list is re-sorted by character title, which is
    /// cosmetic and independent of the scan order. An empty cohort yields an
    /// empty outcome. O(n log n) in the number of choices.
    pub fn allocate(choices: &[Choice]) -> AllocationOutcome {
        let mut ranked: Vec<(i32, &Choice)> = choices
            .iter()
            .map(|choice| (ScoreCalculator::score_choice(choice), choice))
            .collect();

        ranked.sort_by(|(score_a, a), (score_b, b)| {
            score_b
                .cmp(score_a)
                .then(a.priority().cmp(&b.priority()))
                .then(a.id().cmp(&b.id()))
        });

        let mut taken_characters: HashSet<CharacterId> = HashSet::new();
        let mut taken_applicants: HashSet<ApplicantId> = HashSet::new();
        let mut assigned = Vec::new();

        for (score, choice) in ranked {
            if taken_characters.contains(&choice.character().id)
                || taken_applicants.contains(&choice.applicant().id)
            {
                continue;
            }

            taken_characters.insert(choice.character().id);
            taken_applicants.insert(choice.applicant().id);
            assigned.push(Allocation {
                applicant_id: choice.applicant().id,
                applicant_name: choice.applicant().name.clone(),
                character_id: choice.character().id,
                character_title: choice.character().title.clone(),
                score,
                priority: choice.priority(),
                vote_score: ScoreCalculator::vote_score(choice.votes()),
            });
        }

        assigned.sort_by(|a, b| {
            a.character_title
                .cmp(&b.character_title)
                .then(a.character_id.cmp(&b.character_id))
        });

        let left_out = Self::left_out(choices, &taken_applicants);

        AllocationOutcome { assigned, left_out }
    }

    /// Collects applicants present in the input but absent from the result.
    fn left_out(
        choices: &[Choice],
        taken_applicants: &HashSet<ApplicantId>,
    ) -> Vec<LeftOutApplicant> {
        let mut seen: HashSet<ApplicantId> = HashSet::new();
        let mut left_out: Vec<LeftOutApplicant> = choices
            .iter()
            .filter(|choice| !taken_applicants.contains(&choice.applicant().id))
            .filter(|choice| seen.insert(choice.applicant().id))
            .map(|choice| LeftOutApplicant {
                applicant_id: choice.applicant().id,
                applicant_name: choice.applicant().name.clone(),
            })
            .collect();

        left_out.sort_by(|a, b| {
            a.applicant_name
                .cmp(&b.applicant_name)
                .then(a.applicant_id.as_uuid().cmp(b.applicant_id.as_uuid()))
        });

        left_out
    }
}
