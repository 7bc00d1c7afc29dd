// revpool/src/services/mod.rs

//! Collaborator interfaces the engine consumes, plus in-memory reference
//! implementations.
//!
//! The engine never reaches into the identity store or the submission
//! store directly; it talks to these two traits. The in-memory
//! implementations back the examples and tests and are usable as defaults
//! for single-process deployments.

pub mod group;
pub mod store;

pub use group::{GroupDirectory, InMemoryGroupDirectory};
pub use store::{InMemorySubmissionStore, SubmissionStore};
