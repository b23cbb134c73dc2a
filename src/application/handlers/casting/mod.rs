//! Casting handlers - vote casting, vote listing, allocation, match board.

mod build_match_board;
mod cast_vote;
mod compute_allocation;
mod list_votes;

#[cfg(test)]
pub(crate) mod test_support;

pub use build_match_board::{BuildMatchBoardError, BuildMatchBoardHandler, BuildMatchBoardQuery};
pub use cast_vote::{CastVoteCommand, CastVoteError, CastVoteHandler, CastVoteResult};
pub use compute_allocation::{
    ComputeAllocationError, ComputeAllocationHandler, ComputeAllocationQuery,
};
pub use list_votes::{ListVotesError, ListVotesHandler, ListVotesQuery};
