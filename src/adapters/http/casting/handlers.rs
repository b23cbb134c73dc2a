//! HTTP handlers for casting endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers: vote casting, vote listing, allocation, and the match board.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::casting::{
    BuildMatchBoardError, BuildMatchBoardHandler, BuildMatchBoardQuery, CastVoteCommand,
    CastVoteError, CastVoteHandler, ComputeAllocationError, ComputeAllocationHandler,
    ComputeAllocationQuery, ListVotesError, ListVotesHandler, ListVotesQuery,
};
use crate::domain::foundation::{ChoiceId, ErrorCode, EventId, VoterId};
use crate::ports::{ChoiceReader, VoteStore};

use super::dto::{AllocationResponse, CastVoteRequest, ErrorResponse, VoteResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct CastingAppState {
    pub vote_store: Arc<dyn VoteStore>,
    pub choice_reader: Arc<dyn ChoiceReader>,
}

impl CastingAppState {
    pub fn new(vote_store: Arc<dyn VoteStore>, choice_reader: Arc<dyn ChoiceReader>) -> Self {
        Self {
            vote_store,
            choice_reader,
        }
    }

    pub fn cast_vote_handler(&self) -> CastVoteHandler {
        CastVoteHandler::new(self.vote_store.clone(), self.choice_reader.clone())
    }

    pub fn list_votes_handler(&self) -> ListVotesHandler {
        ListVotesHandler::new(self.vote_store.clone(), self.choice_reader.clone())
    }

    pub fn compute_allocation_handler(&self) -> ComputeAllocationHandler {
        ComputeAllocationHandler::new(self.choice_reader.clone())
    }

    pub fn build_match_board_handler(&self) -> BuildMatchBoardHandler {
        BuildMatchBoardHandler::new(self.choice_reader.clone(), self.vote_store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Voter Context
// ════════════════════════════════════════════════════════════════════════════════

/// Authenticated voter context extracted from the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedVoter {
    pub voter_id: VoterId,
}

/// Rejection type for AuthenticatedVoter extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::bad_request("Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedVoter
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let voter_id = parts
                .headers
                .get("X-User-Id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| VoterId::new(s).ok())
                .ok_or(AuthenticationRequired)?;

            Ok(AuthenticatedVoter { voter_id })
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/choices/:id/votes - Cast or re-cast a vote on a choice
pub async fn cast_vote(
    State(state): State<CastingAppState>,
    Path(choice_id): Path<String>,
    voter: AuthenticatedVoter,
    Json(request): Json<CastVoteRequest>,
) -> Result<impl IntoResponse, CastingApiError> {
    let choice_id: ChoiceId = choice_id
        .parse()
        .map_err(|_| CastingApiError::BadRequest("Invalid choice ID format".to_string()))?;

    let handler = state.cast_vote_handler();
    let cmd = CastVoteCommand {
        choice_id,
        voter_id: voter.voter_id,
        value: request.vote,
        justification: request.justification,
    };

    let result = handler.handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(VoteResponse::from(result.vote))))
}

/// GET /api/choices/:id/votes - Vote audit trail for a choice
pub async fn list_votes(
    State(state): State<CastingAppState>,
    Path(choice_id): Path<String>,
    _voter: AuthenticatedVoter,
) -> Result<impl IntoResponse, CastingApiError> {
    let choice_id: ChoiceId = choice_id
        .parse()
        .map_err(|_| CastingApiError::BadRequest("Invalid choice ID format".to_string()))?;

    let handler = state.list_votes_handler();
    let votes = handler.handle(ListVotesQuery { choice_id }).await?;

    let response: Vec<VoteResponse> = votes.into_iter().map(VoteResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}

/// GET /api/events/:id/allocation - Advisory allocation for an event
pub async fn get_allocation(
    State(state): State<CastingAppState>,
    Path(event_id): Path<String>,
    _voter: AuthenticatedVoter,
) -> Result<impl IntoResponse, CastingApiError> {
    let event_id: EventId = event_id
        .parse()
        .map_err(|_| CastingApiError::BadRequest("Invalid event ID format".to_string()))?;

    let handler = state.compute_allocation_handler();
    let outcome = handler.handle(ComputeAllocationQuery { event_id }).await?;

    Ok((StatusCode::OK, Json(AllocationResponse::from(outcome))))
}

/// GET /api/events/:id/match-board - Choices grouped by character with votes
pub async fn get_match_board(
    State(state): State<CastingAppState>,
    Path(event_id): Path<String>,
    voter: AuthenticatedVoter,
) -> Result<impl IntoResponse, CastingApiError> {
    let event_id: EventId = event_id
        .parse()
        .map_err(|_| CastingApiError::BadRequest("Invalid event ID format".to_string()))?;

    let handler = state.build_match_board_handler();
    let board = handler
        .handle(BuildMatchBoardQuery {
            event_id,
            requesting_voter: Some(voter.voter_id),
        })
        .await?;

    Ok((StatusCode::OK, Json(board)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub enum CastingApiError {
    BadRequest(String),
    InvalidVote(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<CastVoteError> for CastingApiError {
    fn from(err: CastVoteError) -> Self {
        match err {
            CastVoteError::InvalidVoteValue(e) => CastingApiError::InvalidVote(e.to_string()),
            CastVoteError::ChoiceNotFound(id) => {
                CastingApiError::NotFound(format!("Choice not found: {}", id))
            }
            CastVoteError::Domain(e) if e.code == ErrorCode::ConcurrentVoteConflict => {
                CastingApiError::Conflict(e.to_string())
            }
            CastVoteError::Domain(e) => CastingApiError::Internal(e.to_string()),
        }
    }
}

impl From<ListVotesError> for CastingApiError {
    fn from(err: ListVotesError) -> Self {
        match err {
            ListVotesError::ChoiceNotFound(id) => {
                CastingApiError::NotFound(format!("Choice not found: {}", id))
            }
            ListVotesError::Domain(e) => CastingApiError::Internal(e.to_string()),
        }
    }
}

impl From<ComputeAllocationError> for CastingApiError {
    fn from(err: ComputeAllocationError) -> Self {
        match err {
            ComputeAllocationError::Domain(e) => CastingApiError::Internal(e.to_string()),
        }
    }
}

impl From<BuildMatchBoardError> for CastingApiError {
    fn from(err: BuildMatchBoardError) -> Self {
        match err {
            BuildMatchBoardError::Domain(e) => CastingApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for CastingApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            CastingApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            CastingApiError::InvalidVote(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("INVALID_VOTE_VALUE", msg),
            ),
            CastingApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("CHOICE_NOT_FOUND", msg),
            ),
            CastingApiError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse::new("CONCURRENT_VOTE_CONFLICT", msg),
            ),
            CastingApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;

    #[test]
    fn casting_api_error_maps_bad_request_to_400() {
        let err = CastingApiError::BadRequest("test".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn casting_api_error_maps_invalid_vote_to_400() {
        let err = CastingApiError::InvalidVote("test".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn casting_api_error_maps_not_found_to_404() {
        let err = CastingApiError::NotFound("test".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn casting_api_error_maps_conflict_to_409() {
        let err = CastingApiError::Conflict("test".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn casting_api_error_maps_internal_to_500() {
        let err = CastingApiError::Internal("test".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_vote_value_converts_to_invalid_vote() {
        let err = CastVoteError::InvalidVoteValue(ValidationError::out_of_range("vote", -1, 1, 0));
        let api_err = CastingApiError::from(err);
        assert!(matches!(api_err, CastingApiError::InvalidVote(_)));
    }

    #[test]
    fn concurrent_conflict_converts_to_conflict() {
        let err = CastVoteError::Domain(crate::domain::foundation::DomainError::new(
            ErrorCode::ConcurrentVoteConflict,
            "conflict",
        ));
        let api_err = CastingApiError::from(err);
        assert!(matches!(api_err, CastingApiError::Conflict(_)));
    }
}
