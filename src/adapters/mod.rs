//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Database implementations of the casting ports
//! - `http` - REST API exposure

pub mod http;
pub mod postgres;

pub use http::{casting_router, CastingAppState};
pub use postgres::{PostgresChoiceReader, PostgresVoteStore};
