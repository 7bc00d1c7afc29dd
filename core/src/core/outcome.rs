// revpool/src/core/outcome.rs

//! Defines the outcomes of the engine's submitting and acting operations.

use crate::core::ids::WorkflowItemId;
use crate::core::item::WorkflowItem;
use crate::core::task::PoolTask;

/// Outcome of finalizing a submission into a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
  /// The collection has no configured workflow; the item was published
  /// immediately and no task was ever created.
  Archived { item: WorkflowItemId },
  /// The item entered the workflow at step 1 and a pool task now awaits
  /// the first step's reviewer group.
  EnteredWorkflow { item: WorkflowItem, pool_task: PoolTask },
}

/// Outcome of a successfully performed action on a claimed task.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
  /// Approve on a non-final step: the item moved on and a fresh pool task
  /// awaits the next step's reviewer group.
  Advanced { pool_task: PoolTask },
  /// Approve on the final step: the item was published and every task and
  /// workflow record for it is gone.
  Archived,
  /// Reject: the item went back to the submitter's workspace; no pool task
  /// was created.
  ReturnedToWorkspace,
  /// Edit-metadata: the patch was applied and the task remains claimed.
  MetadataUpdated,
}
