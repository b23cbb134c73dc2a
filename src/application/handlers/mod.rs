//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod casting;

pub use casting::{
    BuildMatchBoardError, BuildMatchBoardHandler, BuildMatchBoardQuery,
    CastVoteCommand, CastVoteError, CastVoteHandler, CastVoteResult,
    ComputeAllocationError, ComputeAllocationHandler, ComputeAllocationQuery,
    ListVotesError, ListVotesHandler, ListVotesQuery,
};
