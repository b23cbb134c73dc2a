//! HTTP adapter for the casting API.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AllocationEntryResponse, AllocationResponse, CastVoteRequest, ErrorResponse, LeftOutResponse,
    VoteResponse,
};
pub use handlers::{AuthenticatedVoter, CastingApiError, CastingAppState};
pub use routes::casting_router;
