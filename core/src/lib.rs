// src/lib.rs

//! Revpool: an ASYNC task-pool engine for multi-step submission review
//! workflows.
//!
//! Revpool drives submissions through a per-collection sequence of review
//! steps with features like:
//!  - Pool tasks open to a step's whole reviewer group.
//!  - Exclusive claims: racing claimants resolve to one winner, losers see
//!    `NotFound`.
//!  - Step-scoped action sets (approve / reject / edit-metadata) validated
//!    before dispatch.
//!  - Rejection routing back to the submitter's workspace, approval routing
//!    to the next step or the archive.
//!  - An authorization guard enforcing the owner / group-member / admin
//!    rules over a string-identifier surface.
//!  - Supervision orders for read-only visibility outside the reviewer path.

// Declare modules according to the planned structure
pub mod core;
pub mod engine;
pub mod error;
pub mod guard;
pub mod registry;
pub mod services;
pub mod supervision;

// --- Re-exports for the Public API ---

// Core types that users will interact with frequently
pub use crate::core::action::{Action, ActionKind};
pub use crate::core::actor::Actor;
pub use crate::core::ids::{
  CollectionId, EPersonId, GroupId, SupervisionOrderId, TaskId, WorkflowItemId,
};
pub use crate::core::item::WorkflowItem;
pub use crate::core::outcome::{ActionOutcome, SubmitOutcome};
pub use crate::core::step::{Step, StepConfig};
pub use crate::core::task::{ClaimedTask, PoolTask, TaskRef};

// The engine and its read-side result shape
pub use crate::engine::{TaskEngine, UserTasks};

// The guard is the surface a transport layer calls
pub use crate::guard::WorkflowGuard;

pub use crate::registry::StepRegistry;

pub use crate::services::{
  GroupDirectory, InMemoryGroupDirectory, InMemorySubmissionStore, SubmissionStore,
};

pub use crate::supervision::{SupervisionOrder, SupervisionOrders};

pub use crate::error::{RevpoolError, RevpoolResult};
