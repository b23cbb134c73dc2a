//! HTTP DTOs (Data Transfer Objects) for casting endpoints.
//!
//! These types define the JSON request/response structure for the casting
//! API. They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::domain::casting::{Allocation, AllocationOutcome, LeftOutApplicant, Vote};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to cast a vote on a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct CastVoteRequest {
    /// Vote value; only 1 and -1 are accepted.
    pub vote: i8,
    /// Optional justification shown on the match board.
    #[serde(default)]
    pub justification: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a single vote.
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    /// Vote row ID.
    pub id: String,
    /// The choice the vote is on.
    pub choice_id: String,
    /// The reviewer who cast it.
    pub voter_id: String,
    /// +1 or -1.
    pub vote: i8,
    /// Optional justification.
    pub justification: Option<String>,
    /// When the vote was (last) cast (ISO 8601).
    pub cast_at: String,
}

impl From<Vote> for VoteResponse {
    fn from(vote: Vote) -> Self {
        Self {
            id: vote.id().to_string(),
            choice_id: vote.choice_id().to_string(),
            voter_id: vote.voter_id().to_string(),
            vote: vote.value().value(),
            justification: vote.justification().map(str::to_string),
            cast_at: vote.cast_at().to_rfc3339(),
        }
    }
}

/// One proposed pairing in the allocation response.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationEntryResponse {
    pub applicant_id: String,
    pub applicant_name: String,
    pub character_id: String,
    pub character_title: String,
    pub score: i32,
    pub priority: u8,
    pub vote_score: i32,
}

impl From<Allocation> for AllocationEntryResponse {
    fn from(allocation: Allocation) -> Self {
        Self {
            applicant_id: allocation.applicant_id.to_string(),
            applicant_name: allocation.applicant_name,
            character_id: allocation.character_id.to_string(),
            character_title: allocation.character_title,
            score: allocation.score,
            priority: allocation.priority.value(),
            vote_score: allocation.vote_score,
        }
    }
}

/// Applicant without a pairing in the allocation response.
#[derive(Debug, Clone, Serialize)]
pub struct LeftOutResponse {
    pub applicant_id: String,
    pub applicant_name: String,
}

impl From<LeftOutApplicant> for LeftOutResponse {
    fn from(left_out: LeftOutApplicant) -> Self {
        Self {
            applicant_id: left_out.applicant_id.to_string(),
            applicant_name: left_out.applicant_name,
        }
    }
}

/// Response for the advisory allocation of one event.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationResponse {
    /// Proposed pairings, ordered by character title.
    pub assigned: Vec<AllocationEntryResponse>,
    /// Applicants left without a character, ordered by name.
    pub left_out: Vec<LeftOutResponse>,
}

impl From<AllocationOutcome> for AllocationResponse {
    fn from(outcome: AllocationOutcome) -> Self {
        Self {
            assigned: outcome
                .assigned
                .into_iter()
                .map(AllocationEntryResponse::from)
                .collect(),
            left_out: outcome
                .left_out
                .into_iter()
                .map(LeftOutResponse::from)
                .collect(),
        }
    }
}

/// Error response for API errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::casting::{Priority, VoteValue};
    use crate::domain::foundation::{ApplicantId, CharacterId, ChoiceId, VoterId};

    #[test]
    fn cast_vote_request_deserializes() {
        let json = r#"{"vote": 1, "justification": "Strong audition"}"#;
        let req: CastVoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.vote, 1);
        assert_eq!(req.justification.as_deref(), Some("Strong audition"));
    }

    #[test]
    fn cast_vote_request_justification_defaults_to_none() {
        let json = r#"{"vote": -1}"#;
        let req: CastVoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.vote, -1);
        assert!(req.justification.is_none());
    }

    #[test]
    fn vote_response_serializes_from_domain() {
        let vote = Vote::new(
            ChoiceId::new(),
            VoterId::new("reviewer-1").unwrap(),
            VoteValue::For,
            Some("Good fit".to_string()),
        );
        let response = VoteResponse::from(vote.clone());

        assert_eq!(response.vote, 1);
        assert_eq!(response.voter_id, "reviewer-1");
        assert_eq!(response.choice_id, vote.choice_id().to_string());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["vote"], 1);
        assert_eq!(json["justification"], "Good fit");
    }

    #[test]
    fn allocation_response_preserves_tuple_fields() {
        let outcome = AllocationOutcome {
            assigned: vec![Allocation {
                applicant_id: ApplicantId::new(),
                applicant_name: "Robin".to_string(),
                character_id: CharacterId::new(),
                character_title: "Aria".to_string(),
                score: 65,
                priority: Priority::new(3).unwrap(),
                vote_score: 50,
            }],
            left_out: vec![],
        };

        let response = AllocationResponse::from(outcome);
        assert_eq!(response.assigned.len(), 1);
        assert_eq!(response.assigned[0].score, 65);
        assert_eq!(response.assigned[0].priority, 3);
        assert_eq!(response.assigned[0].vote_score, 50);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["assigned"][0]["character_title"], "Aria");
        assert!(json["left_out"].as_array().unwrap().is_empty());
    }

    #[test]
    fn error_response_carries_code_and_message() {
        let err = ErrorResponse::new("INVALID_VOTE_VALUE", "Vote must be +1 or -1");
        assert_eq!(err.code, "INVALID_VOTE_VALUE");
        assert!(err.message.contains("+1 or -1"));
    }
}
