//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `VoteStore` - Write side of the vote ledger (atomic upsert + aggregate)
//! - `ChoiceReader` - Cohort reads with applicant/character resolved

mod choice_reader;
mod vote_store;

pub use choice_reader::ChoiceReader;
pub use vote_store::VoteStore;
