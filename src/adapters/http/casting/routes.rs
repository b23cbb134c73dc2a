//! Route configuration for casting endpoints.
//!
//! Configures Axum router with casting-related routes.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{cast_vote, get_allocation, get_match_board, list_votes, CastingAppState};

/// Creates the casting router with all endpoints.
///
/// Routes:
/// - `POST /api/choices/:id/votes` - Cast or re-cast a vote
/// - `GET /api/choices/:id/votes` - Vote audit trail for a choice
/// - `GET /api/events/:id/allocation` - Advisory allocation for an event
/// - `GET /api/events/:id/match-board` - Choices grouped by character
pub fn casting_router() -> Router<CastingAppState> {
    Router::new()
        .route("/api/choices/:id/votes", post(cast_vote).get(list_votes))
        .route("/api/events/:id/allocation", get(get_allocation))
        .route("/api/events/:id/match-board", get(get_match_board))
}
