// revpool/src/engine/transitions.rs

//! Contains the claim / unclaim / perform-action transitions of the
//! `TaskEngine`, plus the administrative withdraw.
//!
//! The claim is the concurrency-critical section: the pool-task removal
//! under the state lock is a compare-and-swap, so N racing claimants
//! resolve to exactly one claimed task and N-1 `NotFound` answers.

use crate::core::action::Action;
use crate::core::actor::Actor;
use crate::core::ids::{CollectionId, EPersonId, TaskId, WorkflowItemId};
use crate::core::outcome::ActionOutcome;
use crate::core::step::Step;
use crate::core::task::{ClaimedTask, PoolTask};
use crate::error::{RevpoolError, RevpoolResult};
use chrono::Utc;
use tracing::{event, instrument, Level};

use super::TaskEngine;

impl TaskEngine {
  /// Claims a pool task for `actor`, replacing it with a claimed task
  /// owned exclusively by them.
  ///
  /// Eligibility is a live check against the step's reviewer group;
  /// administrators are implicitly eligible. A task that no longer exists
  /// (including one a concurrent claimant just won) answers `NotFound`,
  /// never `Forbidden`: the caller should move on to another task, not
  /// retry this id.
  #[instrument(
    name = "TaskEngine::claim",
    skip_all,
    fields(task = %pool_task_id),
    err(Display)
  )]
  pub async fn claim(&self, pool_task_id: TaskId, actor: Actor) -> RevpoolResult<ClaimedTask> {
    let (user, admin) = actor.require_user()?;

    let (snapshot, collection) = {
      let state = self.state.lock();
      let task = state
        .pool
        .get(&pool_task_id)
        .cloned()
        .ok_or_else(|| RevpoolError::not_found(format!("pooltask {}", pool_task_id)))?;
      let collection = state
        .items
        .get(&task.workflow_item)
        .map(|record| record.collection)
        .ok_or_else(|| {
          RevpoolError::not_found(format!("workflowitem {}", task.workflow_item))
        })?;
      (task, collection)
    };

    let step = self.step_for(collection, snapshot.step_ordinal, &snapshot.step_name)?;

    // Membership is checked before the critical section; the guard below
    // must not be held across this await.
    if !admin && !self.groups.is_member(user, step.group).await? {
      return Err(RevpoolError::forbidden(
        "not a member of the step's reviewer group",
      ));
    }

    let mut state = self.state.lock();
    // Compare-and-swap on task existence: a concurrent claimant may have
    // consumed the pool task since the snapshot above.
    let Some(pool_task) = state.pool.remove(&pool_task_id) else {
      event!(Level::DEBUG, "Pool task gone; claim lost the race.");
      return Err(RevpoolError::not_found(format!("pooltask {}", pool_task_id)));
    };
    let claimed = ClaimedTask {
      id: TaskId::new(),
      workflow_item: pool_task.workflow_item,
      step_name: pool_task.step_name,
      step_ordinal: pool_task.step_ordinal,
      action: step.primary_action.clone(),
      owner: user,
      claimed_at: Utc::now(),
    };
    state.claimed.insert(claimed.id, claimed.clone());
    event!(
      Level::INFO,
      item = %claimed.workflow_item,
      step = %claimed.step_name,
      owner = %user,
      claimed_task = %claimed.id,
      "Pool task claimed."
    );
    Ok(claimed)
  }

  /// Returns a claimed task to the pool: the claimed task is destroyed and
  /// a fresh pool task is created for the same step, owner cleared.
  ///
  /// Allowed for the task's owner or an administrator.
  #[instrument(
    name = "TaskEngine::unclaim",
    skip_all,
    fields(task = %claimed_task_id),
    err(Display)
  )]
  pub async fn unclaim(&self, claimed_task_id: TaskId, actor: Actor) -> RevpoolResult<PoolTask> {
    let (user, admin) = actor.require_user()?;

    let mut state = self.state.lock();
    let claimed = match state.claimed.get(&claimed_task_id) {
      Some(claimed) => claimed.clone(),
      None => {
        return Err(RevpoolError::not_found(format!(
          "claimedtask {}",
          claimed_task_id
        )))
      }
    };
    if claimed.owner != user && !admin {
      return Err(RevpoolError::forbidden("not the owner of the claimed task"));
    }
    let collection = state
      .items
      .get(&claimed.workflow_item)
      .map(|record| record.collection)
      .ok_or_else(|| {
        RevpoolError::not_found(format!("workflowitem {}", claimed.workflow_item))
      })?;
    let step = self.step_for(collection, claimed.step_ordinal, &claimed.step_name)?;

    // All checks passed; swap the records under the same lock.
    state.claimed.remove(&claimed_task_id);
    let pool_task = PoolTask {
      id: TaskId::new(),
      workflow_item: claimed.workflow_item,
      step_name: claimed.step_name,
      step_ordinal: claimed.step_ordinal,
      group: step.group,
      created_at: Utc::now(),
    };
    state.pool.insert(pool_task.id, pool_task.clone());
    event!(
      Level::INFO,
      item = %pool_task.workflow_item,
      step = %pool_task.step_name,
      "Claimed task returned to the pool."
    );
    Ok(pool_task)
  }

  /// Performs `action` on a claimed task.
  ///
  /// Only the claiming owner may act: administrators may claim and
  /// unclaim on others' behalf but may NOT act on a task they do not own.
  /// That asymmetry is deliberate and load-bearing for the review model.
  ///
  /// An action kind outside the current step's configured set answers
  /// `UnprocessableEntity` and leaves all state untouched.
  #[instrument(
    name = "TaskEngine::perform_action",
    skip_all,
    fields(task = %claimed_task_id, action = %action.kind()),
    err(Display)
  )]
  pub async fn perform_action(
    &self,
    claimed_task_id: TaskId,
    actor: Actor,
    action: Action,
  ) -> RevpoolResult<ActionOutcome> {
    let (user, _admin) = actor.require_user()?;

    let (claimed, collection, submitter) = {
      let state = self.state.lock();
      let claimed = state
        .claimed
        .get(&claimed_task_id)
        .cloned()
        .ok_or_else(|| {
          RevpoolError::not_found(format!("claimedtask {}", claimed_task_id))
        })?;
      let record = state.items.get(&claimed.workflow_item).ok_or_else(|| {
        RevpoolError::not_found(format!("workflowitem {}", claimed.workflow_item))
      })?;
      (claimed, record.collection, record.submitter)
    };

    // Owner only. No admin override here.
    if claimed.owner != user {
      return Err(RevpoolError::forbidden("only the claiming owner may act on a task"));
    }

    let step = self.step_for(collection, claimed.step_ordinal, &claimed.step_name)?;
    if !step.permits(action.kind()) {
      return Err(RevpoolError::unprocessable(format!(
        "action '{}' is not legal for step '{}'",
        action.kind(),
        step.name
      )));
    }

    match action {
      Action::Approve => self.approve(claimed).await,
      Action::Reject { reason } => self.reject(claimed, submitter, reason).await,
      Action::EditMetadata { patch } => {
        // Consume the task while the patch is in flight so a concurrent
        // unclaim cannot re-pool it mid-edit; the owner gets it back
        // whether the store call succeeds or not.
        {
          let mut state = self.state.lock();
          if state.claimed.remove(&claimed.id).is_none() {
            return Err(RevpoolError::not_found(format!("claimedtask {}", claimed.id)));
          }
        }
        let item = claimed.workflow_item;
        let result = self.store.update_metadata(item, patch).await;
        self.state.lock().claimed.insert(claimed.id, claimed);
        result?;
        event!(Level::DEBUG, item = %item, "Metadata patch applied; task stays claimed.");
        Ok(ActionOutcome::MetadataUpdated)
      }
    }
  }

  async fn approve(&self, claimed: ClaimedTask) -> RevpoolResult<ActionOutcome> {
    // Consume the claimed task; a concurrent terminal action on the same
    // task loses here with NotFound.
    {
      let mut state = self.state.lock();
      if state.claimed.remove(&claimed.id).is_none() {
        return Err(RevpoolError::not_found(format!("claimedtask {}", claimed.id)));
      }
    }

    match self.enter_step(claimed.workflow_item, claimed.step_ordinal + 1).await {
      Ok(Some(pool_task)) => {
        event!(
          Level::INFO,
          item = %claimed.workflow_item,
          from = %claimed.step_name,
          to = %pool_task.step_name,
          "Step approved; item advanced."
        );
        Ok(ActionOutcome::Advanced { pool_task })
      }
      Ok(None) => {
        event!(Level::INFO, item = %claimed.workflow_item, "Final step approved; item archived.");
        Ok(ActionOutcome::Archived)
      }
      Err(err) => {
        // Restore the consumed task so the approval can be retried by its
        // owner once the collaborator recovers.
        self.state.lock().claimed.insert(claimed.id, claimed);
        Err(err)
      }
    }
  }

  async fn reject(
    &self,
    claimed: ClaimedTask,
    submitter: EPersonId,
    reason: String,
  ) -> RevpoolResult<ActionOutcome> {
    if reason.trim().is_empty() {
      // The claimed task stays intact.
      return Err(RevpoolError::unprocessable("rejection requires a non-empty reason"));
    }

    {
      let mut state = self.state.lock();
      if state.claimed.remove(&claimed.id).is_none() {
        return Err(RevpoolError::not_found(format!("claimedtask {}", claimed.id)));
      }
    }

    if let Err(err) = self
      .store
      .return_to_workspace(claimed.workflow_item, submitter)
      .await
    {
      self.state.lock().claimed.insert(claimed.id, claimed);
      return Err(err.into());
    }

    let mut state = self.state.lock();
    state.items.remove(&claimed.workflow_item);
    event!(
      Level::INFO,
      item = %claimed.workflow_item,
      step = %claimed.step_name,
      %submitter,
      reason = %reason,
      "Step rejected; item returned to the submitter's workspace."
    );
    Ok(ActionOutcome::ReturnedToWorkspace)
  }

  /// Withdraws an item from workflow entirely. Administrator only.
  ///
  /// Any live task is destroyed along with the workflow record, and the
  /// submission goes back to the submitter's workspace.
  #[instrument(
    name = "TaskEngine::abort",
    skip_all,
    fields(item = %item_id),
    err(Display)
  )]
  pub async fn abort(&self, item_id: WorkflowItemId, actor: Actor) -> RevpoolResult<()> {
    let (_user, admin) = actor.require_user()?;
    if !admin {
      return Err(RevpoolError::forbidden("only administrators may withdraw an item from workflow"));
    }

    let submitter = {
      let state = self.state.lock();
      state
        .items
        .get(&item_id)
        .map(|record| record.submitter)
        .ok_or_else(|| RevpoolError::not_found(format!("workflowitem {}", item_id)))?
    };

    self.store.return_to_workspace(item_id, submitter).await?;

    let mut state = self.state.lock();
    state.items.remove(&item_id);
    state.pool.retain(|_, task| task.workflow_item != item_id);
    state.claimed.retain(|_, task| task.workflow_item != item_id);
    event!(Level::INFO, item = %item_id, "Item withdrawn from workflow.");
    Ok(())
  }

  /// Resolves the step a task record points at. A missing step here means
  /// the registry and the task tables disagree, which registration-time
  /// immutability rules out short of a configuration bug.
  fn step_for(
    &self,
    collection: CollectionId,
    ordinal: usize,
    step_name: &str,
  ) -> RevpoolResult<Step> {
    self
      .registry
      .step_at(collection, ordinal)
      .filter(|step| step.name == step_name)
      .ok_or_else(|| RevpoolError::Config {
        message: format!(
          "step '{}' (ordinal {}) is not configured for collection {}",
          step_name, ordinal, collection
        ),
      })
  }
}
