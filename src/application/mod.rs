//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates the write path (vote casting) from the read
//! paths (vote listing, allocation, match board).

pub mod handlers;

pub use handlers::{
    BuildMatchBoardHandler, BuildMatchBoardQuery, CastVoteCommand, CastVoteHandler,
    ComputeAllocationHandler, ComputeAllocationQuery, ListVotesHandler, ListVotesQuery,
};
