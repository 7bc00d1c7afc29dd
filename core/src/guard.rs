// revpool/src/guard.rs

//! Defines the `WorkflowGuard`, the credential-and-identifier surface
//! wrapped around the `TaskEngine`.
//!
//! The guard is what a REST layer would call: identifiers arrive as
//! strings, credentials as an [`Actor`]. It enforces the outer taxonomy:
//! `Unauthorized` for anonymous callers, `BadRequest` for malformed UUIDs,
//! `UnprocessableEntity` for query parameters naming unknown entities,
//! `MethodNotAllowed` for operations that are intentionally unsupported;
//! and delegates everything eligibility-shaped to the engine.

use crate::core::action::Action;
use crate::core::actor::Actor;
use crate::core::ids::{EPersonId, TaskId, WorkflowItemId};
use crate::core::outcome::ActionOutcome;
use crate::core::task::{ClaimedTask, PoolTask, TaskRef};
use crate::engine::{TaskEngine, UserTasks};
use crate::error::{RevpoolError, RevpoolResult};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Authorization and input-validation wrapper over the task engine.
pub struct WorkflowGuard {
  engine: Arc<TaskEngine>,
  /// Identities the (excluded) identity store knows about. A task search
  /// for a well-formed UUID outside this set is `UnprocessableEntity`, the
  /// way a missing query-parameter reference should read.
  known_epersons: RwLock<HashSet<EPersonId>>,
}

impl WorkflowGuard {
  pub fn new(engine: Arc<TaskEngine>) -> Self {
    Self {
      engine,
      known_epersons: RwLock::new(HashSet::new()),
    }
  }

  /// Registers an identity as existing. Normally fed from the identity
  /// store at session establishment.
  pub fn register_eperson(&self, id: EPersonId) {
    self.known_epersons.write().insert(id);
  }

  pub fn engine(&self) -> &TaskEngine {
    &self.engine
  }

  /// Pool tasks visible to the EPerson named by `eperson_uuid`.
  #[instrument(name = "WorkflowGuard::list_pool_tasks", skip_all, err(Display))]
  pub async fn list_pool_tasks(
    &self,
    actor: Actor,
    eperson_uuid: &str,
  ) -> RevpoolResult<Vec<PoolTask>> {
    let tasks = self.find_user_tasks(actor, eperson_uuid).await?;
    Ok(tasks.pool)
  }

  /// Claimed tasks owned by the EPerson named by `eperson_uuid`.
  #[instrument(name = "WorkflowGuard::list_claimed_tasks", skip_all, err(Display))]
  pub async fn list_claimed_tasks(
    &self,
    actor: Actor,
    eperson_uuid: &str,
  ) -> RevpoolResult<Vec<ClaimedTask>> {
    let tasks = self.find_user_tasks(actor, eperson_uuid).await?;
    Ok(tasks.claimed)
  }

  /// Claims the pool task named by `task_uuid` for `actor`.
  #[instrument(name = "WorkflowGuard::claim_task", skip_all, err(Display))]
  pub async fn claim_task(&self, actor: Actor, task_uuid: &str) -> RevpoolResult<ClaimedTask> {
    actor.require_user()?;
    let task_id = TaskId::parse(task_uuid)?;
    self.engine.claim(task_id, actor).await
  }

  /// Returns the claimed task named by `task_uuid` to the pool.
  #[instrument(name = "WorkflowGuard::unclaim_task", skip_all, err(Display))]
  pub async fn unclaim_task(&self, actor: Actor, task_uuid: &str) -> RevpoolResult<PoolTask> {
    actor.require_user()?;
    let task_id = TaskId::parse(task_uuid)?;
    self.engine.unclaim(task_id, actor).await
  }

  /// Performs `action` on the claimed task named by `task_uuid`.
  #[instrument(name = "WorkflowGuard::perform_action", skip_all, err(Display))]
  pub async fn perform_action(
    &self,
    actor: Actor,
    task_uuid: &str,
    action: Action,
  ) -> RevpoolResult<ActionOutcome> {
    actor.require_user()?;
    let task_id = TaskId::parse(task_uuid)?;
    self.engine.perform_action(task_id, actor, action).await
  }

  /// The live task for the item named by `item_uuid`, or `None` ("no
  /// content") when the item has no active workflow. Administrator only.
  #[instrument(name = "WorkflowGuard::find_task_by_item", skip_all, err(Display))]
  pub async fn find_task_by_item(
    &self,
    actor: Actor,
    item_uuid: &str,
  ) -> RevpoolResult<Option<TaskRef>> {
    actor.require_user()?;
    let item_id = WorkflowItemId::parse(item_uuid)?;
    self.engine.find_by_item(actor, item_id).await
  }

  /// Pool tasks are consumed by claiming, never deleted. Always refused.
  #[instrument(name = "WorkflowGuard::delete_pool_task", skip_all, err(Display))]
  pub async fn delete_pool_task(&self, actor: Actor, _task_uuid: &str) -> RevpoolResult<()> {
    actor.require_user()?;
    Err(RevpoolError::MethodNotAllowed {
      message: "pool tasks cannot be deleted; claim the task instead".to_string(),
    })
  }

  async fn find_user_tasks(&self, actor: Actor, eperson_uuid: &str) -> RevpoolResult<UserTasks> {
    actor.require_user()?;
    let target = EPersonId::parse(eperson_uuid)?;
    if !self.known_epersons.read().contains(&target) {
      // Well-formed but unknown reference in a query parameter.
      event!(Level::DEBUG, %target, "Task search for unknown eperson.");
      return Err(RevpoolError::unprocessable(format!(
        "no such eperson: {}",
        target
      )));
    }
    self.engine.find_by_user(actor, target).await
  }
}
