//! Casting Desk - LARP casting backoffice service
//!
//! This crate aggregates peer votes on applicants' ranked character choices
//! and computes a deterministic, conflict-free allocation of characters to
//! applicants.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
