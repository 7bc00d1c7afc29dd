// revpool/src/core/task.rs

//! Defines the two task records the engine persists: the pooled form open
//! to a whole reviewer group, and the claimed form owned by exactly one
//! reviewer.

use crate::core::ids::{EPersonId, GroupId, TaskId, WorkflowItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A work item available to any member of the current step's reviewer group.
///
/// Exists iff the workflow item sits unclaimed at a step; at most one live
/// pool task per (item, step). Consumed by a successful claim, never
/// duplicated, never deleted directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolTask {
  pub id: TaskId,
  pub workflow_item: WorkflowItemId,
  /// Name of the step this task belongs to.
  pub step_name: String,
  /// 1-based ordinal of that step.
  pub step_ordinal: usize,
  /// Reviewer group eligible to claim. Membership is checked live at claim
  /// and at query time, not cached here.
  pub group: GroupId,
  pub created_at: DateTime<Utc>,
}

/// A pool task exclusively claimed by one reviewer, pending an action.
///
/// Exactly one per actively-claimed (item, step). Destroyed by unclaim
/// (re-pooled) or by a terminal action (approve/reject).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimedTask {
  pub id: TaskId,
  pub workflow_item: WorkflowItemId,
  pub step_name: String,
  pub step_ordinal: usize,
  /// Action-context name, taken from the step's primary action at claim time.
  pub action: String,
  /// The claiming reviewer. Only this identity may perform actions on the
  /// task; administrators may unclaim it but not act on it.
  pub owner: EPersonId,
  pub claimed_at: DateTime<Utc>,
}

/// The live task for a workflow item, whichever form it currently takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskRef {
  Pool(PoolTask),
  Claimed(ClaimedTask),
}
