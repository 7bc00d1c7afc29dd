// revpool/src/engine/queries.rs

//! Read-side lookups of the `TaskEngine`: tasks visible to a user and the
//! live task for an item.

use crate::core::actor::Actor;
use crate::core::ids::{EPersonId, WorkflowItemId};
use crate::core::task::{ClaimedTask, PoolTask, TaskRef};
use crate::error::{RevpoolError, RevpoolResult};
use tracing::{event, instrument, Level};

use super::TaskEngine;

/// Tasks visible to one user: pool tasks of groups they belong to, and
/// claimed tasks they own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserTasks {
  pub pool: Vec<PoolTask>,
  pub claimed: Vec<ClaimedTask>,
}

impl TaskEngine {
  /// Lists the tasks visible to `target`.
  ///
  /// A non-administrator may only query themselves; asking about anyone
  /// else is `Forbidden`. Pool-task visibility is a live membership check
  /// against each task's reviewer group, so a member added to the group
  /// mid-workflow sees the step's outstanding pool task immediately.
  #[instrument(
    name = "TaskEngine::find_by_user",
    skip_all,
    fields(target = %target),
    err(Display)
  )]
  pub async fn find_by_user(&self, actor: Actor, target: EPersonId) -> RevpoolResult<UserTasks> {
    let (user, admin) = actor.require_user()?;
    if !admin && user != target {
      return Err(RevpoolError::forbidden(
        "non-administrators may only query their own tasks",
      ));
    }

    let (pool_snapshot, claimed) = {
      let state = self.state.lock();
      let pool: Vec<PoolTask> = state.pool.values().cloned().collect();
      let claimed: Vec<ClaimedTask> = state
        .claimed
        .values()
        .filter(|task| task.owner == target)
        .cloned()
        .collect();
      (pool, claimed)
    };

    let mut pool = Vec::new();
    for task in pool_snapshot {
      if self.groups.is_member(target, task.group).await? {
        pool.push(task);
      }
    }

    // Stable order for callers: oldest first.
    pool.sort_by_key(|task| task.created_at);
    let mut claimed = claimed;
    claimed.sort_by_key(|task| task.claimed_at);

    event!(
      Level::DEBUG,
      pool = pool.len(),
      claimed = claimed.len(),
      "Task lookup by user."
    );
    Ok(UserTasks { pool, claimed })
  }

  /// The live task for `item`, whichever form it takes, or `None` when the
  /// item has no active workflow (never entered one, or already left it).
  ///
  /// Administrator only.
  #[instrument(
    name = "TaskEngine::find_by_item",
    skip_all,
    fields(item = %item),
    err(Display)
  )]
  pub async fn find_by_item(
    &self,
    actor: Actor,
    item: WorkflowItemId,
  ) -> RevpoolResult<Option<TaskRef>> {
    let (_user, admin) = actor.require_user()?;
    if !admin {
      return Err(RevpoolError::forbidden(
        "only administrators may look tasks up by item",
      ));
    }

    let state = self.state.lock();
    if let Some(task) = state.pool.values().find(|task| task.workflow_item == item) {
      return Ok(Some(TaskRef::Pool(task.clone())));
    }
    if let Some(task) = state.claimed.values().find(|task| task.workflow_item == item) {
      return Ok(Some(TaskRef::Claimed(task.clone())));
    }
    Ok(None)
  }
}
